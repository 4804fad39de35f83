use vivarium_core::{TickReport, World};

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub world: World,
    /// Stop after this many ticks; 0 runs until extinction.
    pub max_ticks: u64,
    pub show_dump: bool,
    pub last_report: Option<TickReport>,
    /// Single step requested while paused.
    pub step_requested: bool,
}

impl App {
    pub fn new(world: World, max_ticks: u64) -> Self {
        Self {
            running: true,
            paused: false,
            world,
            max_ticks,
            show_dump: false,
            last_report: None,
            step_requested: false,
        }
    }

    /// Advances the world one tick and stops the app once nothing is left
    /// alive or the tick limit is reached.
    pub fn step(&mut self) {
        let report = self.world.tick();
        if report.is_extinct() {
            tracing::info!(tick = report.tick, "Everybody died");
            self.running = false;
        }
        if self.max_ticks > 0 && report.tick >= self.max_ticks {
            self.running = false;
        }
        self.last_report = Some(report);
    }

    /// Ticks until the app stops or `interrupted` returns true.
    pub fn run_headless<F: Fn() -> bool>(&mut self, interrupted: F) {
        while self.running && !interrupted() {
            self.step();
        }
    }
}
