//! Minimum-cost multi-day trip planning by simulated annealing.
//!
//! A trip visits an ordered sequence of zones, one per day, each zone being
//! a pool of interchangeable cities. The first zone is the home city and
//! the last the set of acceptable return cities. Flight prices depend on
//! the origin, the destination and the day, so both the order of the
//! interior zones and the city chosen in each zone affect the total.
//!
//! - [`cost`]: the day-indexed, normalized price table.
//! - [`itinerary`]: the search state and its four local moves (swap,
//!   insert, revert, select-city), each with an exact incremental delta.
//! - [`anneal`]: the Metropolis loop driving those moves over a
//!   temperature schedule, with periodic drift checks.
//! - [`dataset`]: resolves city names and a flight list into zones and a
//!   cost table.
//!
//! # Examples
//!
//! ```
//! use trip_anneal::anneal::{AnnealConfig, AnnealRunner, TemperatureSchedule};
//! use trip_anneal::dataset::{Dataset, Flight};
//!
//! let flights = vec![
//!     Flight::new("PRG", "BCN", 0, 90.0),
//!     Flight::new("PRG", "LIS", 0, 40.0),
//!     Flight::new("BCN", "LIS", 1, 60.0),
//!     Flight::new("LIS", "BCN", 1, 30.0),
//!     Flight::new("LIS", "PRG", 2, 70.0),
//!     Flight::new("BCN", "PRG", 2, 50.0),
//! ];
//! let data = Dataset::build(&["PRG"], &[vec!["BCN"], vec!["LIS"]], &flights).unwrap();
//! let mut itinerary = data.itinerary().unwrap();
//!
//! let schedule = TemperatureSchedule::default().temperatures(2_000).unwrap();
//! let config = AnnealConfig::default().with_seed(1);
//! let result = AnnealRunner::run_seeded(&mut itinerary, &schedule, &config).unwrap();
//!
//! assert_eq!(data.city_names(&result.best_path), ["PRG", "LIS", "BCN", "PRG"]);
//! assert!((data.costs().denormalize(result.best_cost) - 120.0).abs() < 1e-6);
//! ```

pub mod anneal;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod itinerary;

pub use error::{Error, Result};
