//! The seam between the decision core and the game engine.
//!
//! Everything the core consumes from the host is behind the [`GameHost`]
//! trait: routing, attacker resolution, resource accounting, and the
//! spawn/upgrade/remove attempt calls. The core never mutates resource
//! pools itself and never assumes an attempt succeeded without checking
//! its outcome, because allocation earlier in the same turn can exhaust
//! a pool mid-sequence. Implementations exist for the live engine (in
//! the match adapter, outside this crate) and for offline use
//! ([`crate::sim::Arena`]).

use crate::location::Location;
use crate::units::{CostTable, Currency, Occupant, UnitKind};

/// Why the host rejected a placement attempt.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
    InsufficientResource,
    /// Upgrade/remove aimed at a cell with no eligible owned structure.
    NoTarget,
}

/// Result of a spawn/upgrade/remove attempt. The live engine reports
/// these as bare falsy values; the typed form keeps the reason so
/// callers and tests can assert on why an attempt was skipped.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlacementOutcome {
    /// Attempt succeeded; for mobile spawns the count of units placed.
    Placed(u32),
    Rejected(RejectReason),
}

impl PlacementOutcome {
    pub fn placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed(_))
    }

    pub fn count(&self) -> u32 {
        match self {
            PlacementOutcome::Placed(count) => *count,
            PlacementOutcome::Rejected(_) => 0,
        }
    }
}

/// Host-provided game state for one turn.
pub trait GameHost {
    fn turn_number(&self) -> u32;
    fn my_health(&self) -> f32;
    fn enemy_health(&self) -> f32;

    /// Validity of a cell on the playable diamond.
    fn in_arena_bounds(&self, cell: Location) -> bool;

    fn contains_stationary_unit(&self, cell: Location) -> bool;

    /// Board iteration: every occupied cell with its stationary occupants.
    fn stationary_units(&self) -> Vec<(Location, Vec<Occupant>)>;

    /// Deterministic route from `start` to the opposing edge under the
    /// current snapshot, or `None` when no route exists. The returned
    /// path starts at `start`.
    fn find_path_to_edge(&self, start: Location) -> Option<Vec<Location>>;

    /// Enemy defenders currently able to attack a unit occupying `cell`,
    /// with `extra_range` widening the check.
    fn attackers_in_range(&self, cell: Location, extra_range: f32) -> Vec<Occupant>;

    fn resource(&self, currency: Currency) -> f32;
    fn cost_of(&self, kind: UnitKind) -> CostTable;

    /// Attempt a single placement. Never retried by the core.
    fn attempt_spawn(&mut self, kind: UnitKind, cell: Location) -> PlacementOutcome {
        self.attempt_spawn_many(kind, cell, 1)
    }

    /// Attempt up to `limit` placements at one cell (mobile units stack;
    /// structures ignore the limit).
    fn attempt_spawn_many(&mut self, kind: UnitKind, cell: Location, limit: u32)
        -> PlacementOutcome;

    fn attempt_upgrade(&mut self, cell: Location) -> PlacementOutcome;

    /// Flag an owned structure for removal (takes effect next turn).
    fn attempt_remove(&mut self, cell: Location) -> PlacementOutcome;

    /// Finalize and transmit the turn's accumulated intents. Must be the
    /// last host call of a turn.
    fn submit_turn(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        assert!(PlacementOutcome::Placed(3).placed());
        assert_eq!(PlacementOutcome::Placed(3).count(), 3);
        let rejected = PlacementOutcome::Rejected(RejectReason::Occupied);
        assert!(!rejected.placed());
        assert_eq!(rejected.count(), 0);
    }
}
