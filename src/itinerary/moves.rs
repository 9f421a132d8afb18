//! Local moves over an [`Itinerary`] with incremental cost deltas.
//!
//! Every operator comes as a pair: a pure `*_delta` function returning
//! `full_cost(after) - full_cost(before)` without touching the state, and a
//! mutator applying the same change.
//!
//! | Move        | Effect                                  | Delta cost |
//! |-------------|-----------------------------------------|------------|
//! | Swap        | exchange the zones of two days          | O(1)       |
//! | Insert      | move one zone to another day, shifting  | O(\|i-j\|) |
//! | Revert      | reverse the zone order over a day range | O(\|i-j\|) |
//! | SelectCity  | make an alternative city active         | O(1)       |
//!
//! Edge `d` joins day `d` to day `d + 1` and is priced with day `d`. Since
//! prices depend on the day and on the direction, Insert and Revert must
//! reprice every edge whose day index shifts.
//!
//! # Panics
//!
//! Permutation moves panic unless `i != j` and both are interior days
//! (`1..=path_len-2`). Select-city panics on position 0, a position past the
//! end of the zone, or the home zone.

use super::state::Itinerary;

/// Move type tag, used for acceptance counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Swap,
    Insert,
    Revert,
    SelectCity,
}

/// A concrete move with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the zones on days `i` and `j`.
    Swap(usize, usize),
    /// Relocate the zone on day `i` to day `j`.
    Insert(usize, usize),
    /// Reverse the zones on days `min(i,j)..=max(i,j)`.
    Revert(usize, usize),
    /// Activate city position `alt` of `zone`.
    SelectCity { zone: usize, alt: usize },
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Swap(..) => MoveKind::Swap,
            Move::Insert(..) => MoveKind::Insert,
            Move::Revert(..) => MoveKind::Revert,
            Move::SelectCity { .. } => MoveKind::SelectCity,
        }
    }

    /// Cost change this move would cause on `itinerary`.
    pub fn delta(&self, itinerary: &Itinerary) -> f64 {
        match *self {
            Move::Swap(i, j) => itinerary.swap_delta(i, j),
            Move::Insert(i, j) => itinerary.insert_delta(i, j),
            Move::Revert(i, j) => itinerary.revert_delta(i, j),
            Move::SelectCity { zone, alt } => itinerary.select_city_delta(zone, alt),
        }
    }

    pub fn apply(&self, itinerary: &mut Itinerary) {
        match *self {
            Move::Swap(i, j) => itinerary.swap(i, j),
            Move::Insert(i, j) => itinerary.insert(i, j),
            Move::Revert(i, j) => itinerary.revert(i, j),
            Move::SelectCity { zone, alt } => itinerary.select_city(zone, alt),
        }
    }
}

impl Itinerary {
    fn check_days(&self, i: usize, j: usize) {
        assert!(i != j, "move needs two distinct days, got {i} twice");
        assert!(
            self.is_interior(i) && self.is_interior(j),
            "days ({i}, {j}) must lie in 1..={}",
            self.path_len().saturating_sub(2)
        );
    }

    fn check_slot(&self, zone: usize, alt: usize) {
        assert!(
            zone > 0 && zone < self.path_len(),
            "zone {zone} cannot change its city"
        );
        assert!(
            alt > 0 && alt < self.zones[zone].len(),
            "zone {zone} has no alternative at position {alt}"
        );
    }

    /// Price of travelling from the city on day `from` to the city on
    /// day `to`, charged at `day`.
    #[inline]
    fn leg(&self, from: usize, to: usize, day: usize) -> f64 {
        self.cost(self.city(from), self.city(to), day)
    }

    // ---- Swap ----

    pub fn swap_delta(&self, i: usize, j: usize) -> f64 {
        self.check_days(i, j);

        let (before, after) = if i.abs_diff(j) > 1 {
            (
                self.leg(i - 1, i, i - 1)
                    + self.leg(i, i + 1, i)
                    + self.leg(j - 1, j, j - 1)
                    + self.leg(j, j + 1, j),
                self.leg(i - 1, j, i - 1)
                    + self.leg(j, i + 1, i)
                    + self.leg(j - 1, i, j - 1)
                    + self.leg(i, j + 1, j),
            )
        } else {
            // Adjacent days share the middle edge.
            let (k, l) = (i.min(j), i.max(j));
            (
                self.leg(k - 1, k, k - 1) + self.leg(k, l, k) + self.leg(l, l + 1, l),
                self.leg(k - 1, l, k - 1) + self.leg(l, k, k) + self.leg(k, l + 1, l),
            )
        };

        after - before
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.check_days(i, j);
        self.day_to_zone.swap(i, j);
        self.zone_to_day[self.day_to_zone[i]] = i;
        self.zone_to_day[self.day_to_zone[j]] = j;
    }

    // ---- Insert ----

    pub fn insert_delta(&self, i: usize, j: usize) -> f64 {
        self.check_days(i, j);

        let mut before;
        let mut after;

        if i < j {
            // Days i+1..=j move one day earlier, the zone from i lands on j.
            before = self.leg(i - 1, i, i - 1) + self.leg(j - 1, j, j - 1) + self.leg(j, j + 1, j);
            after = self.leg(i - 1, i + 1, i - 1) + self.leg(j, i, j - 1) + self.leg(i, j + 1, j);

            for k in i..j - 1 {
                before += self.leg(k, k + 1, k);
                after += self.leg(k + 1, k + 2, k);
            }
        } else {
            // Days j..i move one day later, the zone from i lands on j.
            before = self.leg(j - 1, j, j - 1) + self.leg(j, j + 1, j) + self.leg(i, i + 1, i);
            after = self.leg(j - 1, i, j - 1) + self.leg(i, j, j) + self.leg(i - 1, i + 1, i);

            for k in j + 1..i {
                before += self.leg(k, k + 1, k);
                after += self.leg(k - 1, k, k);
            }
        }

        after - before
    }

    pub fn insert(&mut self, i: usize, j: usize) {
        self.check_days(i, j);
        let (k, l) = (i.min(j), i.max(j));
        if i < j {
            self.day_to_zone[k..=l].rotate_left(1);
        } else {
            self.day_to_zone[k..=l].rotate_right(1);
        }
        self.reindex(k, l);
    }

    // ---- Revert ----

    pub fn revert_delta(&self, i: usize, j: usize) -> f64 {
        self.check_days(i, j);
        let (k, l) = (i.min(j), i.max(j));

        let mut before = self.leg(k - 1, k, k - 1) + self.leg(l, l + 1, l);
        let mut after = self.leg(k - 1, l, k - 1) + self.leg(k, l + 1, l);

        // Edge k+m after the reversal runs from old day l-m to old day l-m-1.
        for m in 0..l - k {
            before += self.leg(k + m, k + m + 1, k + m);
            after += self.leg(l - m, l - m - 1, k + m);
        }

        after - before
    }

    pub fn revert(&mut self, i: usize, j: usize) {
        self.check_days(i, j);
        let (k, l) = (i.min(j), i.max(j));
        self.day_to_zone[k..=l].reverse();
        self.reindex(k, l);
    }

    fn reindex(&mut self, first: usize, last: usize) {
        for day in first..=last {
            self.zone_to_day[self.day_to_zone[day]] = day;
        }
    }

    // ---- SelectCity ----

    pub fn select_city_delta(&self, zone: usize, alt: usize) -> f64 {
        self.check_slot(zone, alt);
        let day = self.zone_to_day[zone];
        let current = self.zones[zone][0];
        let candidate = self.zones[zone][alt];

        let prev = self.city(day - 1);
        let mut before = self.cost(prev, current, day - 1);
        let mut after = self.cost(prev, candidate, day - 1);

        if day + 1 < self.path_len() {
            let next = self.city(day + 1);
            before += self.cost(current, next, day);
            after += self.cost(candidate, next, day);
        }

        after - before
    }

    pub fn select_city(&mut self, zone: usize, alt: usize) {
        self.check_slot(zone, alt);
        self.zones[zone].swap(0, alt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTensor;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn scenario() -> Itinerary {
        let mut costs = CostTensor::new(5, 3, 100.0);
        costs.set(0, 1, 0, 0.2);
        costs.set(1, 3, 1, 0.3);
        costs.set(3, 0, 2, 0.1);
        costs.set(3, 4, 2, 0.05);
        Itinerary::new(vec![vec![0], vec![1, 2], vec![3], vec![0, 4]], costs).unwrap()
    }

    /// Random zones over a fully random tensor, with the home city 0 shared
    /// by the first and last zone.
    fn random_itinerary(seed: u64, path_len: usize) -> Itinerary {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut zones = vec![vec![0]];
        let mut next = 1;
        for _ in 1..path_len - 1 {
            let size = rng.random_range(1..4);
            zones.push((next..next + size).collect());
            next += size;
        }
        zones.push(vec![0, next]);
        let cities = next + 1;
        let days = path_len - 1;
        let data = (0..cities * cities * days)
            .map(|_| {
                if rng.random_bool(0.1) {
                    crate::cost::NO_FLIGHT
                } else {
                    rng.random::<f64>()
                }
            })
            .collect();
        let costs = CostTensor::from_normalized(data, cities, days, 1.0).unwrap();
        Itinerary::new(zones, costs).unwrap()
    }

    fn assert_delta_matches(it: &mut Itinerary, mv: Move) {
        let before = it.full_cost();
        let delta = mv.delta(it);
        mv.apply(it);
        let after = it.full_cost();
        assert!(
            (delta - (after - before)).abs() < EPS,
            "{mv:?}: delta {delta}, recomputed {}",
            after - before
        );
        assert!(it.is_consistent(), "{mv:?} broke the day/zone bijection");
    }

    #[test]
    fn test_select_city_scenario() {
        let mut it = scenario();
        let delta = it.select_city_delta(3, 1);
        assert!((delta - (-0.05)).abs() < EPS);
        it.select_city(3, 1);
        assert!((it.full_cost() - 0.55).abs() < EPS);
        assert_eq!(it.current_path(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_swap_adjacent_and_distant() {
        let mut it = random_itinerary(1, 10);
        assert_delta_matches(&mut it, Move::Swap(3, 4));
        assert_delta_matches(&mut it, Move::Swap(5, 4));
        assert_delta_matches(&mut it, Move::Swap(1, 8));
        assert_delta_matches(&mut it, Move::Swap(6, 2));
        assert_delta_matches(&mut it, Move::Swap(2, 4));
    }

    #[test]
    fn test_insert_forward_and_backward() {
        let mut it = random_itinerary(2, 12);
        assert_delta_matches(&mut it, Move::Insert(1, 2));
        assert_delta_matches(&mut it, Move::Insert(2, 1));
        assert_delta_matches(&mut it, Move::Insert(1, 10));
        assert_delta_matches(&mut it, Move::Insert(10, 1));
        assert_delta_matches(&mut it, Move::Insert(3, 7));
        assert_delta_matches(&mut it, Move::Insert(9, 4));
    }

    #[test]
    fn test_insert_moves_zone_and_shifts_block() {
        let mut it = random_itinerary(3, 7);
        let zones: Vec<usize> = (0..7).map(|d| it.day_to_zone(d)).collect();
        it.insert(1, 4);
        let moved: Vec<usize> = (0..7).map(|d| it.day_to_zone(d)).collect();
        assert_eq!(
            moved,
            vec![zones[0], zones[2], zones[3], zones[4], zones[1], zones[5], zones[6]]
        );
        it.insert(4, 1);
        let restored: Vec<usize> = (0..7).map(|d| it.day_to_zone(d)).collect();
        assert_eq!(restored, zones);
    }

    #[test]
    fn test_revert_ranges() {
        let mut it = random_itinerary(4, 12);
        assert_delta_matches(&mut it, Move::Revert(1, 2));
        assert_delta_matches(&mut it, Move::Revert(10, 1));
        assert_delta_matches(&mut it, Move::Revert(3, 8));
        assert_delta_matches(&mut it, Move::Revert(5, 4));
    }

    #[test]
    fn test_revert_is_involution() {
        let mut it = random_itinerary(5, 9);
        it.swap(2, 6);
        let d2z: Vec<usize> = (0..9).map(|d| it.day_to_zone(d)).collect();
        let z2d: Vec<usize> = (0..9).map(|z| it.zone_to_day(z)).collect();
        it.revert(2, 7);
        assert_ne!((0..9).map(|d| it.day_to_zone(d)).collect::<Vec<_>>(), d2z);
        it.revert(2, 7);
        assert_eq!((0..9).map(|d| it.day_to_zone(d)).collect::<Vec<_>>(), d2z);
        assert_eq!((0..9).map(|z| it.zone_to_day(z)).collect::<Vec<_>>(), z2d);
    }

    #[test]
    fn test_swap_is_involution() {
        let mut it = random_itinerary(6, 8);
        let (zi, zj) = (it.day_to_zone(2), it.day_to_zone(5));
        it.swap(2, 5);
        assert_eq!((it.day_to_zone(2), it.day_to_zone(5)), (zj, zi));
        it.swap(2, 5);
        assert_eq!((it.day_to_zone(2), it.day_to_zone(5)), (zi, zj));
    }

    #[test]
    fn test_select_city_is_involution() {
        let mut it = scenario();
        it.select_city(1, 1);
        assert_eq!(it.active_city(1), 2);
        it.select_city(1, 1);
        assert_eq!(it.active_city(1), 1);
    }

    #[test]
    fn test_select_city_after_permutation() {
        let mut it = random_itinerary(7, 10);
        it.revert(2, 8);
        it.insert(3, 6);
        let slots = it.selectable_slots().to_vec();
        for slot in slots {
            assert_delta_matches(
                &mut it,
                Move::SelectCity {
                    zone: slot.zone,
                    alt: slot.alt,
                },
            );
        }
    }

    #[test]
    fn test_random_move_sequence_keeps_deltas_exact() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut it = random_itinerary(8, 15);
        for _ in 0..500 {
            let i = rng.random_range(1..14);
            let mut j = rng.random_range(1..13);
            if j >= i {
                j += 1;
            }
            let mv = match rng.random_range(0..4) {
                0 => Move::Swap(i, j),
                1 => Move::Insert(i, j),
                2 => Move::Revert(i, j),
                _ => {
                    let slots = it.selectable_slots();
                    let slot = slots[rng.random_range(0..slots.len())];
                    Move::SelectCity {
                        zone: slot.zone,
                        alt: slot.alt,
                    }
                }
            };
            assert_delta_matches(&mut it, mv);
        }
    }

    #[test]
    fn test_move_kind() {
        assert_eq!(Move::Swap(1, 2).kind(), MoveKind::Swap);
        assert_eq!(Move::Insert(1, 2).kind(), MoveKind::Insert);
        assert_eq!(Move::Revert(1, 2).kind(), MoveKind::Revert);
        assert_eq!(Move::SelectCity { zone: 1, alt: 1 }.kind(), MoveKind::SelectCity);
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_swap_same_day_panics() {
        scenario().swap_delta(1, 1);
    }

    #[test]
    #[should_panic(expected = "must lie in")]
    fn test_insert_endpoint_panics() {
        scenario().insert_delta(0, 2);
    }

    #[test]
    #[should_panic(expected = "must lie in")]
    fn test_revert_last_day_panics() {
        let mut it = scenario();
        it.revert(1, 3);
    }

    #[test]
    #[should_panic(expected = "no alternative")]
    fn test_select_city_active_position_panics() {
        scenario().select_city_delta(1, 0);
    }
}
