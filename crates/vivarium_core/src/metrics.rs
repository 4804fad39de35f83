//! Run statistics and structured logging.
//!
//! Tracks births, deaths by cause and the population peak, and emits a
//! periodic `info` summary so long headless runs stay observable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::lifecycle::DeathCause;
use crate::world::TickReport;

#[derive(Debug, Clone)]
pub struct Metrics {
    ticks: u64,
    births: u64,
    deaths: HashMap<DeathCause, u64>,
    population: usize,
    peak_population: usize,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// `log_interval == 0` disables the periodic summary.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            ticks: 0,
            births: 0,
            deaths: HashMap::new(),
            population: 0,
            peak_population: 0,
            log_interval,
            start_time: Instant::now(),
        }
    }

    pub fn record_birth(&mut self) {
        self.births += 1;
        self.population += 1;
        self.peak_population = self.peak_population.max(self.population);
    }

    pub fn record_death(&mut self, cause: DeathCause) {
        *self.deaths.entry(cause).or_insert(0) += 1;
        self.population = self.population.saturating_sub(1);
    }

    pub fn record_tick(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.births += report.births as u64;
        for record in &report.deaths {
            *self.deaths.entry(record.cause).or_insert(0) += 1;
        }
        self.population = report.population;
        self.peak_population = self.peak_population.max(report.population);

        if self.log_interval > 0 && self.ticks % self.log_interval == 0 {
            tracing::info!(
                tick = report.tick,
                population = report.population,
                births = self.births,
                deaths = self.total_deaths(),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births
    }

    #[must_use]
    pub fn deaths(&self, cause: DeathCause) -> u64 {
        self.deaths.get(&cause).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_deaths(&self) -> u64 {
        self.deaths.values().sum()
    }

    #[must_use]
    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Ticks per second since creation.
    #[must_use]
    pub fn tick_rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. Later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
