//! Path cost estimation: the damage a mobile unit would soak traversing
//! a route under the current board snapshot.

use crate::host::GameHost;
use crate::location::Location;
use crate::units::UnitKind;

/// Risk of deploying at a cell. An unreachable cell is distinct from a
/// zero-risk route: it scores zero for minimum-selection purposes but
/// must never satisfy a "safe route" fast path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathRisk {
    Unreachable,
    Exposed(f32),
}

impl PathRisk {
    /// Numeric score used for minimum selection.
    pub fn score(&self) -> f32 {
        match self {
            PathRisk::Unreachable => 0.0,
            PathRisk::Exposed(damage) => *damage,
        }
    }

    /// True only for a reachable route with zero accumulated damage.
    pub fn is_safe(&self) -> bool {
        matches!(self, PathRisk::Exposed(damage) if *damage == 0.0)
    }
}

/// Sum of per-hit turret damage over every cell of `path`. Pure with
/// respect to the snapshot; an empty path accumulates nothing. Only the
/// ranged-defender archetype contributes, melee-only obstacles do not.
pub fn estimate_path_damage<H: GameHost>(host: &H, path: &[Location]) -> f32 {
    path.iter()
        .map(|&cell| {
            host.attackers_in_range(cell, 0.0)
                .iter()
                .filter(|attacker| attacker.kind == UnitKind::Turret)
                .map(|attacker| attacker.damage_to_mobile)
                .sum::<f32>()
        })
        .sum()
}

/// Route from `cell` under the current snapshot and estimate its damage.
pub fn assess<H: GameHost>(host: &H, cell: Location) -> PathRisk {
    match host.find_path_to_edge(cell) {
        None => PathRisk::Unreachable,
        Some(path) => PathRisk::Exposed(estimate_path_damage(host, &path)),
    }
}
