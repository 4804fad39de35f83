pub mod organism;
pub mod tile;
