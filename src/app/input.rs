use crossterm::event::{KeyCode, KeyEvent};

use crate::app::state::App;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('n') if self.paused => self.step_requested = true,
            KeyCode::Char('d') => self.show_dump = !self.show_dump,
            _ => {}
        }
    }
}
