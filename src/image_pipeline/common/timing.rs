use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Durations of the steps of one photo run, in execution order.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    totals: HashMap<&'static str, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &'static str, duration: Duration) {
        self.steps.push(StepTiming { name, duration });
        *self.totals.entry(name).or_insert(Duration::ZERO) += duration;
    }

    /// Runs `step`, recording how long it took.
    pub fn time<T>(&mut self, name: &'static str, step: impl FnOnce() -> T) -> T {
        let timer = Timer::start(name);
        let value = step();
        let (name, duration) = timer.stop();
        self.record(name, duration);
        value
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.totals.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for step in &self.steps {
            let share = if total.as_secs_f64() > 0.0 {
                step.duration.as_secs_f64() / total.as_secs_f64() * 100.0
            } else {
                0.0
            };
            info!(
                step = step.name,
                millis = step.duration.as_secs_f64() * 1000.0,
                share = format_args!("{:.1}%", share),
                "pipeline step"
            );
        }
        info!(millis = total.as_secs_f64() * 1000.0, "pipeline total");
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}
