use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::state::App;
use vivarium_tui::{DumpPanel, ViewportWidget};

const KEY_HELP: &str = "[q] quit [space] pause [n] step [d] dump";

impl App {
    pub fn draw(&self, f: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());
        let sidebar = if self.show_dump { 40 } else { 0 };
        let [viewport, panel] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(sidebar)]).areas(main);

        f.render_widget(ViewportWidget::new(&self.world), viewport);
        if self.show_dump {
            let snapshot = self
                .world
                .focus()
                .and_then(|id| self.world.organism_snapshot(id));
            f.render_widget(DumpPanel::new(snapshot.as_ref()), panel);
        }

        let metrics = self.world.metrics();
        let state = if self.paused { "PAUSED" } else { "RUNNING" };
        let line = format!(
            " {state} | Tick: {} | Pop: {} | Peak: {} | Deaths: {} | {KEY_HELP}",
            self.world.tick_count(),
            self.world.population().len(),
            metrics.peak_population(),
            metrics.total_deaths(),
        );
        let color = if self.paused { Color::Yellow } else { Color::Green };
        f.render_widget(Paragraph::new(line).style(Style::default().fg(color)), status);
    }
}
