use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wall time of one pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTiming {
    pub step: String,
    pub millis: f64,
}

/// Ordered step timings for one segmentation run.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` inside an info span named `step` and records its wall time.
    ///
    /// The time is recorded even when `f` returns an error value.
    pub fn time<T>(&mut self, step: &'static str, f: impl FnOnce() -> T) -> T {
        let _span = tracing::info_span!("step", name = step).entered();
        let start = Instant::now();
        let value = f();
        self.steps.push(StepTiming {
            step: step.to_string(),
            millis: start.elapsed().as_secs_f64() * 1000.0,
        });
        value
    }

    pub fn total_millis(&self) -> f64 {
        self.steps.iter().map(|s| s.millis).sum()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepTiming> {
        self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_millis();
        for step in &self.steps {
            let share = if total > 0.0 { step.millis / total * 100.0 } else { 0.0 };
            debug!(step = %step.step, millis = step.millis, "{share:.1}% of run");
        }
        debug!(millis = total, "segmentation run total");
    }
}
