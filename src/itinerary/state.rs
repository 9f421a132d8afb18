//! Itinerary state: zones, the day/zone permutation and active cities.

use std::sync::Arc;

use crate::cost::CostTensor;
use crate::error::{Error, Result};

/// A `(zone, alternative position)` pair eligible for the select-city move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectableSlot {
    pub zone: usize,
    pub alt: usize,
}

/// Mutable search state for one annealing run.
///
/// Each zone's city list keeps its active city at position 0. Days and
/// zones are related by a bijection stored in both directions; day 0 is
/// always zone 0 and the last day is always the last zone. The two
/// arrays are private and only change through the move mutators
/// (see [`Move`](super::Move)), each of which updates both before returning.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub(super) zones: Vec<Vec<usize>>,
    pub(super) day_to_zone: Vec<usize>,
    pub(super) zone_to_day: Vec<usize>,
    selectable: Vec<SelectableSlot>,
    city_count: usize,
    costs: Arc<CostTensor>,
}

impl Itinerary {
    /// Builds the identity assignment (day `d` visits zone `d`) with the
    /// first city of every zone active.
    ///
    /// `zones[0]` must hold only the home city; the last zone holds the
    /// home city's return candidates. Every city index must be a valid
    /// tensor index and the tensor must cover `zones.len() - 1` days.
    pub fn new(zones: Vec<Vec<usize>>, costs: impl Into<Arc<CostTensor>>) -> Result<Self> {
        let costs = costs.into();
        let path_len = zones.len();

        if path_len < 2 {
            return Err(Error::invalid_input(format!(
                "an itinerary needs at least 2 zones, got {path_len}"
            )));
        }
        if let Some(z) = zones.iter().position(Vec::is_empty) {
            return Err(Error::invalid_input(format!("zone {z} has no cities")));
        }
        if zones[0].len() != 1 {
            return Err(Error::invalid_input(format!(
                "zone 0 must contain only the home city, got {} cities",
                zones[0].len()
            )));
        }
        if costs.days() < path_len - 1 {
            return Err(Error::invalid_input(format!(
                "{path_len} zones need {} flight days, cost tensor has {}",
                path_len - 1,
                costs.days()
            )));
        }
        for (z, zone) in zones.iter().enumerate() {
            if let Some(&city) = zone.iter().find(|&&c| c >= costs.cities()) {
                return Err(Error::invalid_input(format!(
                    "zone {z} references city {city}, cost tensor has {} cities",
                    costs.cities()
                )));
            }
        }

        let selectable = zones
            .iter()
            .enumerate()
            .flat_map(|(zone, cities)| {
                (1..cities.len()).map(move |alt| SelectableSlot { zone, alt })
            })
            .collect();
        let city_count = zones.iter().map(Vec::len).sum();

        Ok(Self {
            zones,
            day_to_zone: (0..path_len).collect(),
            zone_to_day: (0..path_len).collect(),
            selectable,
            city_count,
            costs,
        })
    }

    /// Number of days (equal to the number of zones).
    pub fn path_len(&self) -> usize {
        self.day_to_zone.len()
    }

    /// City at position `alt` of the zone visited on `day`.
    ///
    /// `alt == 0` is the active city; other positions answer "what if this
    /// alternative were active" for delta evaluation.
    #[inline]
    pub fn path(&self, day: usize, alt: usize) -> usize {
        self.zones[self.day_to_zone[day]][alt]
    }

    /// Active city visited on `day`.
    #[inline]
    pub fn city(&self, day: usize) -> usize {
        self.path(day, 0)
    }

    /// Snapshot of the active city for every day.
    pub fn current_path(&self) -> Vec<usize> {
        (0..self.path_len()).map(|d| self.city(d)).collect()
    }

    /// Recomputes the total cost from scratch in O(path_len).
    pub fn full_cost(&self) -> f64 {
        (0..self.path_len() - 1)
            .map(|d| self.cost(self.city(d), self.city(d + 1), d))
            .sum()
    }

    #[inline]
    pub(super) fn cost(&self, origin: usize, dest: usize, day: usize) -> f64 {
        self.costs.get(origin, dest, day)
    }

    pub fn day_to_zone(&self, day: usize) -> usize {
        self.day_to_zone[day]
    }

    pub fn zone_to_day(&self, zone: usize) -> usize {
        self.zone_to_day[zone]
    }

    /// Cities of `zone`, active city first.
    pub fn zone(&self, zone: usize) -> &[usize] {
        &self.zones[zone]
    }

    pub fn active_city(&self, zone: usize) -> usize {
        self.zones[zone][0]
    }

    pub fn selectable_slots(&self) -> &[SelectableSlot] {
        &self.selectable
    }

    /// Total number of city entries over all zones.
    pub fn city_count(&self) -> usize {
        self.city_count
    }

    /// Number of days a permutation move may target.
    pub fn interior_days(&self) -> usize {
        self.path_len().saturating_sub(2)
    }

    #[inline]
    pub fn is_interior(&self, day: usize) -> bool {
        day > 0 && day + 1 < self.path_len()
    }

    pub fn costs(&self) -> &CostTensor {
        &self.costs
    }

    /// Checks the day/zone bijection and the pinned endpoints.
    pub fn is_consistent(&self) -> bool {
        let n = self.path_len();
        self.day_to_zone[0] == 0
            && self.day_to_zone[n - 1] == n - 1
            && (0..n).all(|d| self.zone_to_day[self.day_to_zone[d]] == d)
            && (0..n).all(|z| self.day_to_zone[self.zone_to_day[z]] == z)
    }
}
