pub mod input;
pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use vivarium_tui::Tui;

/// Installs a Ctrl+C listener that only raises the returned flag.
pub fn shutdown_flag() -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received, stopping");
        shutdown_clone.store(true, Ordering::SeqCst);
    });
    shutdown
}

impl App {
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let frame_rate = Duration::from_millis(16);
        let mut last_frame: Option<Instant> = None;
        let shutdown = shutdown_flag();

        while self.running && !shutdown.load(Ordering::SeqCst) {
            if last_frame.map_or(true, |t| t.elapsed() >= frame_rate) {
                tui.terminal.draw(|f| self.draw(f))?;
                last_frame = Some(Instant::now());
            }

            // Block briefly while paused so the loop does not spin.
            let timeout = if self.paused { frame_rate } else { Duration::ZERO };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if !self.paused || std::mem::take(&mut self.step_requested) {
                self.step();
            }
        }
        tui.terminal.draw(|f| self.draw(f))?;
        Ok(())
    }
}
