//! Vivarium application layer: the interactive debugger and the headless
//! runner built on `vivarium_core`.

pub mod app;

pub use app::App;
