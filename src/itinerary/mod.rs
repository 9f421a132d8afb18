//! Itinerary state and its local moves.
//!
//! An itinerary visits one zone per day. Zone 0 (home) is pinned to the
//! first day and the return zone to the last; the interior days carry a
//! permutation of the destination zones. Within each zone exactly one city
//! is active.
//!
//! The four moves ([`Move::Swap`], [`Move::Insert`], [`Move::Revert`],
//! [`Move::SelectCity`]) each pair an incremental cost delta with a
//! mutator, so the annealer can evaluate a proposal without recomputing
//! the whole path.

mod moves;
mod state;

pub use moves::{Move, MoveKind};
pub use state::{Itinerary, SelectableSlot};
