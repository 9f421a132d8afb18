//! Named trip data: resolves city names to dense indices and builds the
//! normalized cost tensor from a flight list.
//!
//! Indices are assigned by concatenating the home candidates and then each
//! destination zone, one index per occurrence. The itinerary zones are
//! `[[home[0]]] + destinations + [home...]`, so the departure city has index
//! 0 and also heads the return zone.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::cost::CostTensor;
use crate::error::{Error, Result};
use crate::itinerary::Itinerary;

/// One priced flight. `day` is 0-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flight {
    pub from: String,
    pub to: String,
    pub day: usize,
    pub price: f64,
}

impl Flight {
    pub fn new(from: impl Into<String>, to: impl Into<String>, day: usize, price: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            day,
            price,
        }
    }
}

/// Zones and costs resolved from names.
///
/// # Examples
///
/// ```
/// use trip_anneal::dataset::{Dataset, Flight};
///
/// let flights = vec![
///     Flight::new("PRG", "BCN", 0, 80.0),
///     Flight::new("BCN", "PRG", 1, 120.0),
/// ];
/// let data = Dataset::build(&["PRG"], &[vec!["BCN"]], &flights).unwrap();
/// let itinerary = data.itinerary().unwrap();
/// assert_eq!(data.city_names(&itinerary.current_path()), ["PRG", "BCN", "PRG"]);
/// assert!((data.costs().denormalize(itinerary.full_cost()) - 200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    names: Vec<String>,
    zones: Vec<Vec<usize>>,
    costs: Arc<CostTensor>,
}

impl Dataset {
    /// Resolves `home` (departure city first, then other acceptable return
    /// cities) and `destinations` against `flights`.
    ///
    /// Duplicate flights for the same route and day keep the cheapest
    /// price. Costs are divided by the most expensive flight.
    pub fn build<S: AsRef<str>>(
        home: &[S],
        destinations: &[Vec<S>],
        flights: &[Flight],
    ) -> Result<Self> {
        if home.is_empty() {
            return Err(Error::invalid_input("home zone has no cities"));
        }
        if let Some(z) = destinations.iter().position(Vec::is_empty) {
            return Err(Error::invalid_input(format!(
                "destination zone {z} has no cities"
            )));
        }

        let names: Vec<String> = home
            .iter()
            .chain(destinations.iter().flatten())
            .map(|s| s.as_ref().to_owned())
            .collect();

        let mut indices: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            indices.entry(name.clone()).or_default().push(idx);
        }

        let mut zones = Vec::with_capacity(destinations.len() + 2);
        zones.push(vec![0]);
        let mut next = home.len();
        for zone in destinations {
            zones.push((next..next + zone.len()).collect());
            next += zone.len();
        }
        zones.push((0..home.len()).collect());

        let cities = names.len();
        let days = zones.len() - 1;
        let lookup = |name: &str| {
            indices.get(name).ok_or_else(|| {
                Error::invalid_input(format!("flight references unknown city {name:?}"))
            })
        };

        let mut prices: Vec<Option<f64>> = vec![None; cities * cities * days];
        let mut max_price = 0.0f64;
        for flight in flights {
            if flight.day >= days {
                return Err(Error::invalid_input(format!(
                    "flight {} -> {} on day {} is outside the {days}-day trip",
                    flight.from, flight.to, flight.day
                )));
            }
            if !(flight.price >= 0.0 && flight.price.is_finite()) {
                return Err(Error::invalid_input(format!(
                    "flight {} -> {} has invalid price {}",
                    flight.from, flight.to, flight.price
                )));
            }
            for &origin in lookup(flight.from.as_str())? {
                for &dest in lookup(flight.to.as_str())? {
                    let slot = &mut prices[(origin * cities + dest) * days + flight.day];
                    *slot = Some(slot.map_or(flight.price, |p| p.min(flight.price)));
                }
            }
            max_price = max_price.max(flight.price);
        }

        if max_price <= 0.0 {
            return Err(Error::invalid_input(
                "flight list must contain at least one positive price",
            ));
        }

        let costs = CostTensor::from_prices(&prices, cities, days, max_price)?;
        debug!(
            "dataset: {cities} cities in {} zones, {} flights, max price {max_price}",
            zones.len(),
            flights.len()
        );

        Ok(Self {
            names,
            zones,
            costs: Arc::new(costs),
        })
    }

    /// Fresh itinerary in the identity assignment.
    pub fn itinerary(&self) -> Result<Itinerary> {
        Itinerary::new(self.zones.clone(), Arc::clone(&self.costs))
    }

    pub fn zones(&self) -> &[Vec<usize>] {
        &self.zones
    }

    pub fn costs(&self) -> &CostTensor {
        &self.costs
    }

    pub fn city_name(&self, city: usize) -> &str {
        &self.names[city]
    }

    /// Maps a path of city indices back to names.
    pub fn city_names(&self, path: &[usize]) -> Vec<&str> {
        path.iter().map(|&c| self.city_name(c)).collect()
    }
}
