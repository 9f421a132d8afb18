//! Annealing configuration and temperature schedules.

use crate::error::{Error, Result};

/// Generator for a per-iteration temperature schedule.
///
/// The runner consumes a plain slice of temperatures, one per iteration;
/// this enum produces common shapes of that slice.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - PowerLog: `T_k = exp(ln(last) * (k/n)^p)`, the fast-cooling form of
///   time-limited flight-routing solvers (`p = 0.3` there)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureSchedule {
    /// `T_k = initial * alpha^k`.
    Geometric { initial: f64, alpha: f64 },

    /// Linear interpolation from `initial` to `last`.
    Linear { initial: f64, last: f64 },

    /// Starts at 1.0 and decays to `last` following `(k/n)^exponent`
    /// on a log scale. Small exponents cool fast early on.
    PowerLog { last: f64, exponent: f64 },
}

impl Default for TemperatureSchedule {
    fn default() -> Self {
        TemperatureSchedule::PowerLog {
            last: 0.002,
            exponent: 0.3,
        }
    }
}

impl TemperatureSchedule {
    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(Error::invalid_input(format!("{name} must be positive, got {v}")))
            }
        };
        match *self {
            TemperatureSchedule::Geometric { initial, alpha } => {
                positive("initial temperature", initial)?;
                if !(alpha > 0.0 && alpha <= 1.0) {
                    return Err(Error::invalid_input(format!(
                        "geometric alpha must be in (0, 1], got {alpha}"
                    )));
                }
            }
            TemperatureSchedule::Linear { initial, last } => {
                positive("initial temperature", initial)?;
                positive("last temperature", last)?;
            }
            TemperatureSchedule::PowerLog { last, exponent } => {
                positive("last temperature", last)?;
                positive("exponent", exponent)?;
            }
        }
        Ok(())
    }

    /// Materializes `iterations` temperatures.
    pub fn temperatures(&self, iterations: usize) -> Result<Vec<f64>> {
        self.validate()?;
        // Fraction of the run completed at step k, reaching 1.0 on the last step.
        let span = iterations.saturating_sub(1).max(1) as f64;

        let schedule = (0..iterations)
            .map(|k| {
                let progress = k as f64 / span;
                match *self {
                    TemperatureSchedule::Geometric { initial, alpha } => {
                        initial * alpha.powi(k as i32)
                    }
                    TemperatureSchedule::Linear { initial, last } => {
                        initial + (last - initial) * progress
                    }
                    TemperatureSchedule::PowerLog { last, exponent } => {
                        (last.ln() * progress.powf(exponent)).exp()
                    }
                }
            })
            .collect::<Vec<_>>();

        validate_schedule(&schedule)?;
        Ok(schedule)
    }
}

/// Rejects schedules containing non-positive or non-finite temperatures.
pub fn validate_schedule(temperatures: &[f64]) -> Result<()> {
    match temperatures
        .iter()
        .position(|t| !(*t > 0.0 && t.is_finite()))
    {
        Some(idx) => Err(Error::invalid_input(format!(
            "temperature at iteration {idx} must be positive and finite, got {}",
            temperatures[idx]
        ))),
        None => Ok(()),
    }
}

/// Configuration for an annealing run.
///
/// # Examples
///
/// ```
/// use trip_anneal::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_window(20)
///     .with_check_interval(500)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Largest `|i - j|` for which Insert and Revert are evaluated next to
    /// Swap. Beyond it only Swap is considered.
    pub window: usize,

    /// Iterations between drift checks and history samples.
    pub check_interval: usize,

    /// Maximum allowed gap between the tracked and recomputed cost.
    pub drift_tolerance: f64,

    /// Random seed for [`AnnealRunner::run_seeded`](super::AnnealRunner::run_seeded).
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            window: 30,
            check_interval: 100,
            drift_tolerance: 1e-6,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_check_interval(mut self, n: usize) -> Self {
        self.check_interval = n;
        self
    }

    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::invalid_input("window must be at least 1"));
        }
        if self.check_interval == 0 {
            return Err(Error::invalid_input("check_interval must be at least 1"));
        }
        if !(self.drift_tolerance > 0.0 && self.drift_tolerance.is_finite()) {
            return Err(Error::invalid_input(format!(
                "drift_tolerance must be positive, got {}",
                self.drift_tolerance
            )));
        }
        Ok(())
    }
}
