//! Best-effort reinforcement around a weak or breached point.
//!
//! Deliberately cheap: this runs for every recorded breach, every turn.
//! The weak point is shifted into the defended half with fixed offset
//! rules, the row is clamped into a workable band, and a constant
//! neighbor set is filled in priority order until the budget check
//! fails. Not an optimal placement search.

use crate::host::GameHost;
use crate::location::{GridPoint, Location};
use crate::units::{Currency, UnitKind};
use log::debug;

/// Column band that is shifted outward (toward the front line) rather
/// than pulled back.
const INNER_COLUMNS: std::ops::Range<i16> = 3..14;
/// Columns at or beyond this stay where they are.
const OUTER_COLUMN: i16 = 25;
/// Minimum row for a reinforcement anchor.
const ROW_FLOOR: i16 = 5;
/// Rows below this are pushed two steps deeper.
const ROW_PUSH_BAND: i16 = 10;
/// Column window in which a one-step-down neighbor is also tried.
const DOWNWARD_WINDOW: std::ops::RangeInclusive<i16> = 9..=17;

/// Candidate cells around `weak_point`, in placement priority order:
/// one step up, one step sideways toward center, optionally one step
/// down inside the mid-board window, then the shifted point itself.
pub fn reinforcement_neighborhood(weak_point: Location) -> Vec<GridPoint> {
    let mut point = GridPoint::from(weak_point);

    if INNER_COLUMNS.contains(&point.x()) {
        point = point + (2, 0);
    } else if point.x() < OUTER_COLUMN {
        point = point + (-2, 0);
    }

    if point.y() < ROW_FLOOR {
        point = GridPoint::new(point.x(), ROW_FLOOR);
    } else if point.y() < ROW_PUSH_BAND {
        point = point + (0, 2);
    }

    let sideways = if point.x() > 13 { (-2, 0) } else { (2, 0) };
    let mut neighborhood = vec![point + (0, 2), point + sideways];
    if DOWNWARD_WINDOW.contains(&point.x()) {
        neighborhood.push(point + (0, -1));
    }
    neighborhood.push(point);
    neighborhood
}

/// Attempt turret placements around `weak_point`, skipping any cell on
/// the current route from `anchor` (the last deployment cell): walling
/// in your own egress path blocks the next wave. Attempts stop the
/// moment the mobility budget check fails, preserving neighbor order as
/// a priority order. Returns the cells that were attempted; individual
/// rejections are non-fatal and never retried.
pub fn reinforce<H: GameHost>(
    host: &mut H,
    weak_point: Location,
    anchor: Location,
) -> Vec<Location> {
    let Some(path) = host.find_path_to_edge(anchor) else {
        return Vec::new();
    };

    let turret_price = host.cost_of(UnitKind::Turret).get(Currency::Mobility);
    let mut attempted = Vec::new();

    for point in reinforcement_neighborhood(weak_point) {
        if host.resource(Currency::Mobility) < turret_price {
            break;
        }
        let Some(cell) = point.as_location() else {
            continue;
        };
        if path.contains(&cell) {
            continue;
        }
        let outcome = host.attempt_spawn(UnitKind::Turret, cell);
        if !outcome.placed() {
            debug!("reinforce: spawn at {:?} rejected ({:?})", cell, outcome);
        }
        attempted.push(cell);
    }

    attempted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{PlacementOutcome, RejectReason};
    use crate::units::{CostTable, Occupant, Owner};

    #[test]
    fn inner_columns_shift_outward_and_low_rows_clamp() {
        // Column 13 sits in the inner band (shift +2), row 0 clamps to
        // the floor. Mid-window column keeps the downward neighbor.
        let neighborhood = reinforcement_neighborhood(Location::new(13, 0));
        assert_eq!(
            neighborhood,
            vec![
                GridPoint::new(15, 7),
                GridPoint::new(13, 5),
                GridPoint::new(15, 4),
                GridPoint::new(15, 5),
            ]
        );
    }

    #[test]
    fn outer_columns_pull_back_toward_center() {
        // Column 20 pulls back to 18; row 13 stays; column 18 is past
        // the downward window, so only three candidates.
        let neighborhood = reinforcement_neighborhood(Location::new(20, 13));
        assert_eq!(
            neighborhood,
            vec![
                GridPoint::new(18, 15),
                GridPoint::new(16, 13),
                GridPoint::new(18, 13),
            ]
        );
    }

    #[test]
    fn far_columns_stay_put() {
        let neighborhood = reinforcement_neighborhood(Location::new(26, 12));
        assert_eq!(
            neighborhood,
            vec![
                GridPoint::new(26, 14),
                GridPoint::new(24, 12),
                GridPoint::new(26, 12),
            ]
        );
    }

    /// Host double that prices turrets in mobility points and drains one
    /// point per attempt, so the budget gate trips mid-neighborhood.
    struct DrainingHost {
        mobility: f32,
        anchor_path: Option<Vec<Location>>,
        attempts: Vec<Location>,
    }

    impl DrainingHost {
        fn new(mobility: f32, anchor_path: Option<Vec<Location>>) -> Self {
            DrainingHost {
                mobility,
                anchor_path,
                attempts: Vec::new(),
            }
        }
    }

    impl GameHost for DrainingHost {
        fn turn_number(&self) -> u32 {
            1
        }
        fn my_health(&self) -> f32 {
            30.0
        }
        fn enemy_health(&self) -> f32 {
            30.0
        }
        fn in_arena_bounds(&self, _cell: Location) -> bool {
            true
        }
        fn contains_stationary_unit(&self, _cell: Location) -> bool {
            false
        }
        fn stationary_units(&self) -> Vec<(Location, Vec<Occupant>)> {
            Vec::new()
        }
        fn find_path_to_edge(&self, _start: Location) -> Option<Vec<Location>> {
            self.anchor_path.clone()
        }
        fn attackers_in_range(&self, _cell: Location, _extra: f32) -> Vec<Occupant> {
            Vec::new()
        }
        fn resource(&self, currency: Currency) -> f32 {
            match currency {
                Currency::Mobility => self.mobility,
                Currency::Structure => 100.0,
            }
        }
        fn cost_of(&self, _kind: UnitKind) -> CostTable {
            CostTable::new(2.0, 1.0)
        }
        fn attempt_spawn_many(
            &mut self,
            _kind: UnitKind,
            cell: Location,
            _limit: u32,
        ) -> PlacementOutcome {
            self.mobility -= 1.0;
            self.attempts.push(cell);
            PlacementOutcome::Placed(1)
        }
        fn attempt_upgrade(&mut self, _cell: Location) -> PlacementOutcome {
            PlacementOutcome::Rejected(RejectReason::NoTarget)
        }
        fn attempt_remove(&mut self, _cell: Location) -> PlacementOutcome {
            PlacementOutcome::Rejected(RejectReason::NoTarget)
        }
        fn submit_turn(&mut self) {}
    }

    #[test]
    fn stops_at_first_failed_budget_check() {
        // Four candidates for [13, 0]; two mobility points cover exactly
        // two attempts, then the gate fails and nothing further runs.
        let mut host = DrainingHost::new(2.0, Some(vec![Location::new(13, 0)]));
        let attempted = reinforce(&mut host, Location::new(13, 0), Location::new(13, 0));
        assert_eq!(attempted.len(), 2);
        assert_eq!(host.attempts, attempted);
        assert_eq!(
            attempted,
            vec![Location::new(15, 7), Location::new(13, 5)]
        );
    }

    #[test]
    fn skips_cells_on_the_anchor_path_without_attempting() {
        let path = vec![
            Location::new(13, 0),
            Location::new(13, 5),
            Location::new(15, 4),
        ];
        let mut host = DrainingHost::new(10.0, Some(path.clone()));
        let attempted = reinforce(&mut host, Location::new(13, 0), Location::new(13, 0));
        assert!(attempted.iter().all(|cell| !path.contains(cell)));
        assert_eq!(
            attempted,
            vec![Location::new(15, 7), Location::new(15, 5)]
        );
    }

    #[test]
    fn unroutable_anchor_attempts_nothing() {
        let mut host = DrainingHost::new(10.0, None);
        let attempted = reinforce(&mut host, Location::new(13, 0), Location::new(13, 0));
        assert!(attempted.is_empty());
        assert!(host.attempts.is_empty());
    }

    #[test]
    fn insufficient_budget_upfront_attempts_nothing() {
        let mut host = DrainingHost::new(0.5, Some(vec![Location::new(13, 0)]));
        let attempted = reinforce(&mut host, Location::new(13, 0), Location::new(13, 0));
        assert!(attempted.is_empty());
    }
}
