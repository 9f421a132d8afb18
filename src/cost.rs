//! Day-indexed flight cost lookup.
//!
//! A dense `[origin][dest][day]` table of normalized prices. Values lie in
//! `[0, 1]` after division by the largest price; a missing flight holds
//! [`NO_FLIGHT`].

use crate::error::{Error, Result};

/// Normalized cost of a city pair with no flight on a given day.
pub const NO_FLIGHT: f64 = 10.0;

/// Read-only 3D cost table.
///
/// # Examples
///
/// ```
/// use trip_anneal::cost::{CostTensor, NO_FLIGHT};
///
/// let mut costs = CostTensor::new(3, 2, 250.0);
/// costs.set(0, 1, 0, 0.4);
/// assert_eq!(costs.get(0, 1, 0), 0.4);
/// assert_eq!(costs.get(1, 0, 0), NO_FLIGHT);
/// assert_eq!(costs.denormalize(0.4), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct CostTensor {
    data: Vec<f64>,
    cities: usize,
    days: usize,
    max_price: f64,
}

impl CostTensor {
    /// Creates a table where every pair and day is [`NO_FLIGHT`].
    pub fn new(cities: usize, days: usize, max_price: f64) -> Self {
        Self {
            data: vec![NO_FLIGHT; cities * cities * days],
            cities,
            days,
            max_price,
        }
    }

    /// Wraps already-normalized values laid out origin-major, then
    /// destination, then day.
    pub fn from_normalized(
        data: Vec<f64>,
        cities: usize,
        days: usize,
        max_price: f64,
    ) -> Result<Self> {
        if data.len() != cities * cities * days {
            return Err(Error::invalid_input(format!(
                "cost tensor needs {} entries for {cities} cities and {days} days, got {}",
                cities * cities * days,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(Error::invalid_input(format!(
                "cost tensor entries must be finite and non-negative, got {bad}"
            )));
        }
        Ok(Self {
            data,
            cities,
            days,
            max_price,
        })
    }

    /// Builds the table from raw prices, dividing each by `max_price`.
    /// Entries that are `None` become [`NO_FLIGHT`].
    pub fn from_prices(
        prices: &[Option<f64>],
        cities: usize,
        days: usize,
        max_price: f64,
    ) -> Result<Self> {
        if !(max_price > 0.0 && max_price.is_finite()) {
            return Err(Error::invalid_input(format!(
                "max_price must be positive, got {max_price}"
            )));
        }
        let data = prices
            .iter()
            .map(|p| p.map_or(NO_FLIGHT, |price| price / max_price))
            .collect();
        Self::from_normalized(data, cities, days, max_price)
    }

    #[inline]
    fn offset(&self, origin: usize, dest: usize, day: usize) -> usize {
        debug_assert!(origin < self.cities && dest < self.cities && day < self.days);
        (origin * self.cities + dest) * self.days + day
    }

    /// Normalized cost of flying `origin -> dest` on `day`.
    #[inline]
    pub fn get(&self, origin: usize, dest: usize, day: usize) -> f64 {
        self.data[self.offset(origin, dest, day)]
    }

    /// Overwrites one normalized entry.
    pub fn set(&mut self, origin: usize, dest: usize, day: usize, cost: f64) {
        let idx = self.offset(origin, dest, day);
        self.data[idx] = cost;
    }

    pub fn cities(&self) -> usize {
        self.cities
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Converts a normalized cost back to currency.
    pub fn denormalize(&self, cost: f64) -> f64 {
        cost * self.max_price
    }
}
