//! Annealing loop over an [`Itinerary`].
//!
//! # Algorithm
//!
//! For each temperature `T` of the schedule:
//!
//! 1. With probability `|selectable slots| / |cities|` propose a random
//!    select-city move; otherwise draw two distinct interior days and take
//!    the cheapest of Swap, Insert and Revert (only Swap when the days are
//!    further apart than the configured window).
//! 2. Accept if `delta <= 0`, else with probability `exp(-delta / T)`.
//! 3. On acceptance apply the move, add `delta` to the running cost and
//!    snapshot the path when it beats the best cost so far.
//! 4. Every `check_interval` iterations recompute the full cost and abort
//!    with [`Error::Drift`] if it strays from the running cost.

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{validate_schedule, AnnealConfig};
use super::types::RandomSource;
use crate::error::{Error, Result};
use crate::itinerary::{Itinerary, Move, MoveKind};

/// Accepted moves per move type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCounts {
    pub select_city: usize,
    pub swap: usize,
    pub insert: usize,
    pub revert: usize,
}

impl MoveCounts {
    fn record(&mut self, kind: MoveKind) {
        match kind {
            MoveKind::SelectCity => self.select_city += 1,
            MoveKind::Swap => self.swap += 1,
            MoveKind::Insert => self.insert += 1,
            MoveKind::Revert => self.revert += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.select_city + self.swap + self.insert + self.revert
    }
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Running cost sampled at every drift check.
    pub cost_history: Vec<f64>,

    /// Proposed delta of the iteration at every drift check.
    pub delta_history: Vec<f64>,

    /// Lowest cost reached.
    pub best_cost: f64,

    /// Active city per day at the lowest cost.
    pub best_path: Vec<usize>,

    /// Cost of the itinerary before the first iteration.
    pub initial_cost: f64,

    /// Iterations executed (the schedule length).
    pub iterations: usize,

    /// Accepted moves per type.
    pub accepted: MoveCounts,
}

/// Executes simulated annealing on an itinerary.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs with a `StdRng` seeded from `config.seed`, or from the thread
    /// RNG when no seed is set.
    pub fn run_seeded(
        itinerary: &mut Itinerary,
        temperatures: &[f64],
        config: &AnnealConfig,
    ) -> Result<AnnealResult> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::run(itinerary, temperatures, config, &mut rng)
    }

    /// Runs one iteration per entry of `temperatures`.
    ///
    /// The itinerary is left in its final state; the best path is returned
    /// in the result.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an invalid config or schedule, and
    /// [`Error::Drift`] when the running cost diverges from a full
    /// recomputation. A drift aborts the run.
    pub fn run<R: RandomSource>(
        itinerary: &mut Itinerary,
        temperatures: &[f64],
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        config.validate()?;
        validate_schedule(temperatures)?;

        let mut cost = itinerary.full_cost();
        let initial_cost = cost;
        let mut best_cost = cost;
        let mut best_path = itinerary.current_path();

        let mut cost_history = Vec::new();
        let mut delta_history = Vec::new();
        let mut accepted = MoveCounts::default();

        let p_select = itinerary.selectable_slots().len() as f64 / itinerary.city_count() as f64;
        info!(
            "annealing {} zones ({} cities, sizes {:?}) over {} iterations, p_select = {p_select:.4}",
            itinerary.path_len(),
            itinerary.city_count(),
            (0..itinerary.path_len())
                .map(|z| itinerary.zone(z).len())
                .collect::<Vec<_>>(),
            temperatures.len(),
        );

        for (idx, &temperature) in temperatures.iter().enumerate() {
            let proposal = propose(itinerary, config, p_select, rng);
            let delta = proposal.map_or(0.0, |(_, d)| d);

            if let Some((mv, delta)) = proposal {
                // Metropolis criterion
                let accept = delta <= 0.0 || rng.uniform() <= (-delta / temperature).exp();

                if accept {
                    mv.apply(itinerary);
                    accepted.record(mv.kind());
                    cost += delta;

                    if cost < best_cost {
                        best_cost = cost;
                        best_path = itinerary.current_path();
                    }
                }
            }

            if idx > 0 && idx.is_multiple_of(config.check_interval) {
                check_drift(itinerary, cost, idx, config.drift_tolerance)?;
                cost_history.push(cost);
                delta_history.push(delta);
                debug!(
                    "progress {:.2}%: cost {cost:.6}, best {best_cost:.6}",
                    100.0 * idx as f64 / temperatures.len() as f64
                );
            }
        }

        info!(
            "best cost {best_cost:.6} (from {initial_cost:.6}); accepted select_city {}, swap {}, insert {}, revert {}",
            accepted.select_city, accepted.swap, accepted.insert, accepted.revert
        );

        Ok(AnnealResult {
            cost_history,
            delta_history,
            best_cost,
            best_path,
            initial_cost,
            iterations: temperatures.len(),
            accepted,
        })
    }
}

/// Draws one move and its delta, or `None` when the chosen branch has no
/// legal move.
fn propose<R: RandomSource>(
    itinerary: &Itinerary,
    config: &AnnealConfig,
    p_select: f64,
    rng: &mut R,
) -> Option<(Move, f64)> {
    if rng.uniform() < p_select {
        let slots = itinerary.selectable_slots();
        let slot = slots[rng.choose_index(slots.len())];
        let mv = Move::SelectCity {
            zone: slot.zone,
            alt: slot.alt,
        };
        return Some((mv, mv.delta(itinerary)));
    }

    if itinerary.interior_days() < 2 {
        return None;
    }

    let days = rng.choose_distinct(itinerary.interior_days(), 2);
    let (i, j) = (days[0] + 1, days[1] + 1);

    let swap = Move::Swap(i, j);
    let mut best = (swap, swap.delta(itinerary));

    if i.abs_diff(j) <= config.window {
        for mv in [Move::Insert(i, j), Move::Revert(i, j)] {
            let delta = mv.delta(itinerary);
            if delta < best.1 {
                best = (mv, delta);
            }
        }
    }

    Some(best)
}

fn check_drift(itinerary: &Itinerary, tracked: f64, iteration: usize, tolerance: f64) -> Result<()> {
    let recomputed = itinerary.full_cost();
    // Negated so that a NaN on either side also fails.
    if !((recomputed - tracked).abs() < tolerance) {
        error!("running cost {tracked} drifted from recomputed {recomputed} at iteration {iteration}");
        return Err(Error::Drift {
            iteration,
            tracked,
            recomputed,
        });
    }
    Ok(())
}
