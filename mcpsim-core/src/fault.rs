use std::time::Duration;

use rand::Rng;

/// Latency and error-injection bounds, fixed for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaultConfig {
    /// Lower bound of the uniform delay distribution.
    pub delay_min: Duration,
    /// Upper bound of the uniform delay distribution.
    pub delay_max: Duration,
    /// Probability of substituting an error response, in [0, 1].
    pub error_rate: f64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            delay_min: Duration::from_millis(500),
            delay_max: Duration::from_secs(3),
            error_rate: 0.1,
        }
    }
}

impl FaultConfig {
    /// Preset for quick interactive runs: 0.1-0.5s delays, no errors.
    pub fn fast() -> Self {
        Self {
            delay_min: Duration::from_millis(100),
            delay_max: Duration::from_millis(500),
            error_rate: 0.0,
        }
    }

    /// Preset for stress rendering: 2-8s delays, 20% errors.
    pub fn slow() -> Self {
        Self {
            delay_min: Duration::from_secs(2),
            delay_max: Duration::from_secs(8),
            error_rate: 0.2,
        }
    }

    /// Checks the invariants `sample` relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.delay_min > self.delay_max {
            return Err(format!(
                "delay-min ({:.2}s) exceeds delay-max ({:.2}s)",
                self.delay_min.as_secs_f64(),
                self.delay_max.as_secs_f64()
            ));
        }
        if !self.error_rate.is_finite() || !(0.0..=1.0).contains(&self.error_rate) {
            return Err(format!(
                "error-rate ({}) must be within 0.0-1.0",
                self.error_rate
            ));
        }
        Ok(())
    }

    /// Draws one delay and one error decision, independent of prior draws.
    ///
    /// The config must have passed `validate`; the delay is uniform over
    /// `[delay_min, delay_max]` and the error decision is a Bernoulli trial
    /// with probability `error_rate`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> FaultDecision {
        let delay = Duration::from_secs_f64(
            rng.gen_range(self.delay_min.as_secs_f64()..=self.delay_max.as_secs_f64()),
        );
        let inject_error = rng.gen_bool(self.error_rate);
        FaultDecision {
            delay,
            inject_error,
        }
    }
}

/// Outcome of one fault-injector draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultDecision {
    pub delay: Duration,
    pub inject_error: bool,
}
