//! Crate error type.

use thiserror::Error as ThisError;

/// Errors raised while building an itinerary or running the annealer.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Ill-formed zones, cost tensor, configuration, schedule or dataset.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The incrementally tracked cost diverged from a full recomputation.
    #[error(
        "cost drift at iteration {iteration}: tracked {tracked}, recomputed {recomputed}"
    )]
    Drift {
        iteration: usize,
        tracked: f64,
        recomputed: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_message_mentions_both_costs() {
        let err = Error::Drift {
            iteration: 300,
            tracked: 1.5,
            recomputed: 1.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("1.5"));
        assert!(msg.contains("1.25"));
    }

    #[test]
    fn test_invalid_input_constructor() {
        let err = Error::invalid_input("zone 2 is empty");
        assert!(matches!(err, Error::InvalidInput(ref m) if m == "zone 2 is empty"));
    }
}
