//! Simulated annealing over an itinerary.
//!
//! A single-solution trajectory search: each iteration proposes one local
//! move, evaluates it through the move's incremental delta, and applies
//! the Metropolis rule at the iteration's temperature. Uphill moves become
//! rarer as the schedule cools.
//!
//! The run is strictly sequential. Independent runs (restarts, parameter
//! sweeps) each need their own [`Itinerary`](crate::itinerary::Itinerary)
//! and random source.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{validate_schedule, AnnealConfig, TemperatureSchedule};
pub use runner::{AnnealResult, AnnealRunner, MoveCounts};
pub use types::RandomSource;
