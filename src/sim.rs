//! Deterministic offline arena.
//!
//! A [`GameHost`] implementation for native targets, so the decision
//! core tests and benches without the live engine: diamond bounds on
//! the 28x28 grid, breadth-first routing to the opposing edge, Euclidean
//! turret range resolution, and dual resource pools with reason-tagged
//! placement semantics. Resource accrual between turns is a host
//! concern the arena does not model; tests set pools explicitly.
//!
//! Not a combat simulator. It resolves placement, routing and attacker
//! queries against a static snapshot; it never plays out action frames.

use crate::constants::*;
use crate::host::{GameHost, PlacementOutcome, RejectReason};
use crate::location::{edges_of, EdgeFlags, Location};
use crate::units::{CostTable, Currency, Occupant, Owner, UnitKind};
use fnv::FnvHashMap;
use pathfinding::prelude::bfs;
use std::sync::atomic::{AtomicU32, Ordering};

const TURRET_RANGE: f32 = 2.5;
const TURRET_RANGE_UPGRADED: f32 = 3.5;
const TURRET_DAMAGE: f32 = 5.0;
const TURRET_DAMAGE_UPGRADED: f32 = 15.0;

const STARTING_HEALTH: f32 = 30.0;
const STARTING_STRUCTURE_POINTS: f32 = 40.0;
const STARTING_MOBILITY_POINTS: f32 = 5.0;

/// Default price tables, `[structure points, mobility points]` per kind
/// in config order. Override per test with [`Arena::set_cost`].
const DEFAULT_COSTS: [CostTable; 6] = [
    CostTable::new(0.5, 0.0), // wall
    CostTable::new(4.0, 0.0), // support
    CostTable::new(2.0, 0.0), // turret
    CostTable::new(0.0, 1.0), // scout
    CostTable::new(0.0, 3.0), // demolisher
    CostTable::new(0.0, 1.0), // interceptor
];

#[derive(Clone, Debug)]
struct SimStructure {
    kind: UnitKind,
    owner: Owner,
    upgraded: bool,
}

impl SimStructure {
    fn occupant(&self) -> Occupant {
        let damage = match (self.kind, self.upgraded) {
            (UnitKind::Turret, false) => TURRET_DAMAGE,
            (UnitKind::Turret, true) => TURRET_DAMAGE_UPGRADED,
            _ => 0.0,
        };
        Occupant {
            kind: self.kind,
            owner: self.owner,
            damage_to_mobile: damage,
            upgraded: self.upgraded,
        }
    }

    fn attack_range(&self) -> f32 {
        match (self.kind, self.upgraded) {
            (UnitKind::Turret, false) => TURRET_RANGE,
            (UnitKind::Turret, true) => TURRET_RANGE_UPGRADED,
            _ => 0.0,
        }
    }
}

pub struct Arena {
    turn: u32,
    my_health: f32,
    enemy_health: f32,
    resources: [f32; 2],
    costs: [CostTable; 6],
    structures: FnvHashMap<Location, SimStructure>,
    pending_removal: Vec<Location>,
    deploys: Vec<(UnitKind, Location, u32)>,
    remove_attempts: u32,
    submitted: bool,
    path_queries: AtomicU32,
}

impl Arena {
    pub fn new() -> Arena {
        Arena {
            turn: 0,
            my_health: STARTING_HEALTH,
            enemy_health: STARTING_HEALTH,
            resources: [STARTING_STRUCTURE_POINTS, STARTING_MOBILITY_POINTS],
            costs: DEFAULT_COSTS,
            structures: FnvHashMap::default(),
            pending_removal: Vec::new(),
            deploys: Vec::new(),
            remove_attempts: 0,
            submitted: false,
            path_queries: AtomicU32::new(0),
        }
    }

    // ----- board setup ------------------------------------------------

    /// Place a structure directly, bypassing budget and half-board
    /// rules. Returns false if the cell is off the diamond or occupied.
    pub fn seed_structure(&mut self, cell: Location, kind: UnitKind, owner: Owner) -> bool {
        if !self.in_arena_bounds(cell) || self.structures.contains_key(&cell) {
            return false;
        }
        self.structures.insert(
            cell,
            SimStructure {
                kind,
                owner,
                upgraded: false,
            },
        );
        true
    }

    pub fn set_health(&mut self, own: f32, enemy: f32) {
        self.my_health = own;
        self.enemy_health = enemy;
    }

    pub fn set_resource(&mut self, currency: Currency, amount: f32) {
        self.resources[currency.index()] = amount;
    }

    pub fn set_cost(&mut self, kind: UnitKind, cost: CostTable) {
        self.costs[kind.config_index()] = cost;
    }

    /// Apply pending removals and start the next turn.
    pub fn advance_turn(&mut self) {
        for cell in self.pending_removal.drain(..) {
            self.structures.remove(&cell);
        }
        self.deploys.clear();
        self.submitted = false;
        self.turn += 1;
    }

    // ----- inspection -------------------------------------------------

    pub fn deployed_this_turn(&self) -> &[(UnitKind, Location, u32)] {
        &self.deploys
    }

    pub fn pending_removals(&self) -> &[Location] {
        &self.pending_removal
    }

    /// Total `attempt_remove` calls observed, successful or not.
    pub fn remove_attempts(&self) -> u32 {
        self.remove_attempts
    }

    pub fn turn_submitted(&self) -> bool {
        self.submitted
    }

    /// Total routing queries served, for short-circuit instrumentation.
    pub fn path_query_count(&self) -> u32 {
        self.path_queries.load(Ordering::Relaxed)
    }

    fn passable(&self, cell: Location) -> bool {
        !self.structures.contains_key(&cell)
    }

    fn neighbors(&self, cell: Location) -> Vec<Location> {
        let x = cell.x() as i16;
        let y = cell.y() as i16;
        [(0, 1), (1, 0), (0, -1), (-1, 0)]
            .iter()
            .filter_map(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= ARENA_SIZE as i16 || ny >= ARENA_SIZE as i16 {
                    return None;
                }
                let next = Location::new(nx as u8, ny as u8);
                (self.in_arena_bounds(next) && self.passable(next)).then_some(next)
            })
            .collect()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl GameHost for Arena {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn my_health(&self) -> f32 {
        self.my_health
    }

    fn enemy_health(&self) -> f32 {
        self.enemy_health
    }

    fn in_arena_bounds(&self, cell: Location) -> bool {
        let x = cell.x() as i16;
        let y = cell.y() as i16;
        let half = HALF_ARENA as i16;
        if x >= ARENA_SIZE as i16 || y >= ARENA_SIZE as i16 {
            return false;
        }
        if y < half {
            x >= half - 1 - y && x <= half + y
        } else {
            x >= y - half && x <= (ARENA_SIZE as i16 - 1) + half - y
        }
    }

    fn contains_stationary_unit(&self, cell: Location) -> bool {
        self.structures.contains_key(&cell)
    }

    fn stationary_units(&self) -> Vec<(Location, Vec<Occupant>)> {
        self.structures
            .iter()
            .map(|(&cell, unit)| (cell, vec![unit.occupant()]))
            .collect()
    }

    fn find_path_to_edge(&self, start: Location) -> Option<Vec<Location>> {
        self.path_queries.fetch_add(1, Ordering::Relaxed);
        if !self.in_arena_bounds(start) || !self.passable(start) {
            return None;
        }
        let mut targets = edges_of(start).opposite();
        if targets.is_empty() {
            // Mid-board start: route toward the far half.
            targets = if (start.y() as i16) < HALF_ARENA as i16 {
                EdgeFlags::TOP_LEFT | EdgeFlags::TOP_RIGHT
            } else {
                EdgeFlags::BOTTOM_LEFT | EdgeFlags::BOTTOM_RIGHT
            };
        }
        bfs(
            &start,
            |&cell| self.neighbors(cell),
            |&cell| edges_of(cell).intersects(targets),
        )
    }

    fn attackers_in_range(&self, cell: Location, extra_range: f32) -> Vec<Occupant> {
        let x = cell.x() as f32;
        let y = cell.y() as f32;
        self.structures
            .iter()
            .filter(|(_, unit)| unit.owner == Owner::Enemy)
            .filter(|(loc, unit)| {
                let range = unit.attack_range() + extra_range;
                if range <= 0.0 {
                    return false;
                }
                let dx = loc.x() as f32 - x;
                let dy = loc.y() as f32 - y;
                dx * dx + dy * dy <= range * range
            })
            .map(|(_, unit)| unit.occupant())
            .collect()
    }

    fn resource(&self, currency: Currency) -> f32 {
        self.resources[currency.index()]
    }

    fn cost_of(&self, kind: UnitKind) -> CostTable {
        self.costs[kind.config_index()]
    }

    fn attempt_spawn_many(
        &mut self,
        kind: UnitKind,
        cell: Location,
        limit: u32,
    ) -> PlacementOutcome {
        if !self.in_arena_bounds(cell) {
            return PlacementOutcome::Rejected(RejectReason::OutOfBounds);
        }

        if kind.is_structure() {
            // Structures deploy on the home half only.
            if cell.y() >= HALF_ARENA {
                return PlacementOutcome::Rejected(RejectReason::OutOfBounds);
            }
            if self.structures.contains_key(&cell) {
                return PlacementOutcome::Rejected(RejectReason::Occupied);
            }
            let price = self.cost_of(kind).structure_points;
            let pool = &mut self.resources[Currency::Structure.index()];
            if *pool < price {
                return PlacementOutcome::Rejected(RejectReason::InsufficientResource);
            }
            *pool -= price;
            self.structures.insert(
                cell,
                SimStructure {
                    kind,
                    owner: Owner::Ally,
                    upgraded: false,
                },
            );
            return PlacementOutcome::Placed(1);
        }

        // Mobile units deploy on the home edges and stack freely.
        if !edges_of(cell).intersects(EdgeFlags::BOTTOM_LEFT | EdgeFlags::BOTTOM_RIGHT) {
            return PlacementOutcome::Rejected(RejectReason::OutOfBounds);
        }
        if self.structures.contains_key(&cell) {
            return PlacementOutcome::Rejected(RejectReason::Occupied);
        }
        let price = self.cost_of(kind).mobility_points;
        let pool = &mut self.resources[Currency::Mobility.index()];
        let affordable = if price > 0.0 {
            (*pool / price).floor() as u32
        } else {
            limit
        };
        let count = limit.min(affordable);
        if count == 0 {
            return PlacementOutcome::Rejected(RejectReason::InsufficientResource);
        }
        *pool -= price * count as f32;
        self.deploys.push((kind, cell, count));
        PlacementOutcome::Placed(count)
    }

    fn attempt_upgrade(&mut self, cell: Location) -> PlacementOutcome {
        if !self.in_arena_bounds(cell) {
            return PlacementOutcome::Rejected(RejectReason::OutOfBounds);
        }
        let price = match self.structures.get(&cell) {
            Some(unit) if unit.owner == Owner::Ally && !unit.upgraded => {
                self.cost_of(unit.kind).structure_points
            }
            _ => return PlacementOutcome::Rejected(RejectReason::NoTarget),
        };
        let pool = &mut self.resources[Currency::Structure.index()];
        if *pool < price {
            return PlacementOutcome::Rejected(RejectReason::InsufficientResource);
        }
        *pool -= price;
        if let Some(unit) = self.structures.get_mut(&cell) {
            unit.upgraded = true;
        }
        PlacementOutcome::Placed(1)
    }

    fn attempt_remove(&mut self, cell: Location) -> PlacementOutcome {
        self.remove_attempts += 1;
        if !self.in_arena_bounds(cell) {
            return PlacementOutcome::Rejected(RejectReason::OutOfBounds);
        }
        match self.structures.get(&cell) {
            Some(unit) if unit.owner == Owner::Ally => {
                if !self.pending_removal.contains(&cell) {
                    self.pending_removal.push(cell);
                }
                PlacementOutcome::Placed(1)
            }
            _ => PlacementOutcome::Rejected(RejectReason::NoTarget),
        }
    }

    fn submit_turn(&mut self) {
        self.submitted = true;
    }
}
