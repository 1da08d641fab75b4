//! Tagged unit/resource data structures replacing the engine's
//! stringly-typed config shorthands and duck-typed unit objects. The
//! mapping back to engine identifiers lives in [`crate::config`].

use serde::{Deserialize, Serialize};

/// Unit archetypes, in the order the engine's `unitInformation` config
/// table lists them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitKind {
    Wall,
    Support,
    Turret,
    Scout,
    Demolisher,
    Interceptor,
}

impl UnitKind {
    /// Config-table order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
    ];

    /// Index of this archetype in the engine's `unitInformation` table.
    pub fn config_index(self) -> usize {
        match self {
            UnitKind::Wall => 0,
            UnitKind::Support => 1,
            UnitKind::Turret => 2,
            UnitKind::Scout => 3,
            UnitKind::Demolisher => 4,
            UnitKind::Interceptor => 5,
        }
    }

    pub fn is_structure(self) -> bool {
        matches!(self, UnitKind::Wall | UnitKind::Support | UnitKind::Turret)
    }

    pub fn is_mobile(self) -> bool {
        !self.is_structure()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Owner {
    Ally,
    Enemy,
}

/// The two independent budgets: structure points buy stationary units,
/// mobility points buy mobile units. Indices match the engine's cost
/// tables (structure = 0, mobility = 1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Currency {
    Structure,
    Mobility,
}

impl Currency {
    pub fn index(self) -> usize {
        match self {
            Currency::Structure => 0,
            Currency::Mobility => 1,
        }
    }
}

/// Per-currency price pair for one unit kind.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CostTable {
    pub structure_points: f32,
    pub mobility_points: f32,
}

impl CostTable {
    pub const fn new(structure_points: f32, mobility_points: f32) -> CostTable {
        CostTable {
            structure_points,
            mobility_points,
        }
    }

    pub fn get(self, currency: Currency) -> f32 {
        match currency {
            Currency::Structure => self.structure_points,
            Currency::Mobility => self.mobility_points,
        }
    }
}

/// A stationary unit as reported by the host (board iteration and
/// attacker queries).
#[derive(Clone, Debug)]
pub struct Occupant {
    pub kind: UnitKind,
    pub owner: Owner,
    /// Damage dealt per hit against mobile units. Zero for archetypes
    /// that cannot attack.
    pub damage_to_mobile: f32,
    pub upgraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_order_matches_indices() {
        for (index, kind) in UnitKind::ALL.iter().enumerate() {
            assert_eq!(kind.config_index(), index);
        }
    }

    #[test]
    fn archetype_split() {
        assert!(UnitKind::Turret.is_structure());
        assert!(UnitKind::Scout.is_mobile());
        assert!(!UnitKind::Support.is_mobile());
    }

    #[test]
    fn cost_table_indexing() {
        let cost = CostTable::new(2.0, 1.0);
        assert_eq!(cost.get(Currency::Structure), 2.0);
        assert_eq!(cost.get(Currency::Mobility), 1.0);
    }
}
