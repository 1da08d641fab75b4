use crate::constants::*;
use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Compact cell coordinate on the 28x28 grid.
///
/// Serializes as the engine's `[x, y]` wire pair rather than the packed
/// integer, so locations embed directly in config and event-feed JSON.
/// Whether a cell lies on the playable diamond is the host's predicate
/// (`GameHost::in_arena_bounds`); this type only guarantees the square.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub const fn new(x: u8, y: u8) -> Self {
        Location {
            packed: ((x as u16) << 8) | (y as u16),
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.x(), self.y()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y) = <(u8, u8)>::deserialize(deserializer)?;
        if x >= ARENA_SIZE || y >= ARENA_SIZE {
            return Err(D::Error::custom(format!(
                "cell [{x}, {y}] lies outside the {ARENA_SIZE}x{ARENA_SIZE} grid"
            )));
        }
        Ok(Location::new(x, y))
    }
}

/// Signed coordinate used during reinforcement derivation, where offset
/// arithmetic may leave the grid before clamping pulls it back.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GridPoint {
    x: i16,
    y: i16,
}

impl GridPoint {
    pub fn new(x: i16, y: i16) -> GridPoint {
        GridPoint { x, y }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn as_location(&self) -> Option<Location> {
        if self.x >= 0
            && self.y >= 0
            && self.x < ARENA_SIZE as i16
            && self.y < ARENA_SIZE as i16
        {
            Some(Location::new(self.x as u8, self.y as u8))
        } else {
            None
        }
    }
}

impl From<Location> for GridPoint {
    fn from(loc: Location) -> Self {
        GridPoint {
            x: loc.x() as i16,
            y: loc.y() as i16,
        }
    }
}

impl std::ops::Add<(i16, i16)> for GridPoint {
    type Output = Self;
    fn add(self, other: (i16, i16)) -> Self {
        Self {
            x: self.x + other.0,
            y: self.y + other.1,
        }
    }
}

bitflags! {
    /// Diamond-edge membership. Mobile units deploy on the bottom edges
    /// and route toward the diagonally opposite edge.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EdgeFlags: u8 {
        const BOTTOM_LEFT = 1;
        const BOTTOM_RIGHT = 2;
        const TOP_LEFT = 4;
        const TOP_RIGHT = 8;
    }
}

impl EdgeFlags {
    /// The edge(s) a unit deployed on these edge(s) routes toward.
    pub fn opposite(self) -> EdgeFlags {
        let mut out = EdgeFlags::empty();
        if self.contains(EdgeFlags::BOTTOM_LEFT) {
            out |= EdgeFlags::TOP_RIGHT;
        }
        if self.contains(EdgeFlags::BOTTOM_RIGHT) {
            out |= EdgeFlags::TOP_LEFT;
        }
        if self.contains(EdgeFlags::TOP_LEFT) {
            out |= EdgeFlags::BOTTOM_RIGHT;
        }
        if self.contains(EdgeFlags::TOP_RIGHT) {
            out |= EdgeFlags::BOTTOM_LEFT;
        }
        out
    }
}

/// Edge membership of a cell on the playable diamond.
pub fn edges_of(cell: Location) -> EdgeFlags {
    let x = cell.x() as i16;
    let y = cell.y() as i16;
    let half = HALF_ARENA as i16;
    let mut flags = EdgeFlags::empty();
    if y < half {
        if x == half - 1 - y {
            flags |= EdgeFlags::BOTTOM_LEFT;
        }
        if x == half + y {
            flags |= EdgeFlags::BOTTOM_RIGHT;
        }
    } else {
        if x == y - half {
            flags |= EdgeFlags::TOP_LEFT;
        }
        if x == (ARENA_SIZE as i16 - 1) + half - y {
            flags |= EdgeFlags::TOP_RIGHT;
        }
    }
    flags
}

/// All cells on the given edge(s), bottom edges first, ascending row order.
pub fn edge_cells(flags: EdgeFlags) -> Vec<Location> {
    let mut cells = Vec::new();
    if flags.contains(EdgeFlags::BOTTOM_LEFT) {
        for y in 0..HALF_ARENA {
            cells.push(Location::new(HALF_ARENA - 1 - y, y));
        }
    }
    if flags.contains(EdgeFlags::BOTTOM_RIGHT) {
        for y in 0..HALF_ARENA {
            cells.push(Location::new(HALF_ARENA + y, y));
        }
    }
    if flags.contains(EdgeFlags::TOP_LEFT) {
        for y in HALF_ARENA..ARENA_SIZE {
            cells.push(Location::new(y - HALF_ARENA, y));
        }
    }
    if flags.contains(EdgeFlags::TOP_RIGHT) {
        for y in HALF_ARENA..ARENA_SIZE {
            cells.push(Location::new((ARENA_SIZE - 1) + HALF_ARENA - y, y));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks_coordinates() {
        let loc = Location::new(13, 27);
        assert_eq!(loc.x(), 13);
        assert_eq!(loc.y(), 27);
        assert_eq!(Location::from_packed(loc.packed_repr()), loc);
    }

    #[test]
    fn serializes_as_wire_pair() {
        let value = serde_json::to_value(Location::new(20, 13)).unwrap();
        assert_eq!(value, serde_json::json!([20, 13]));

        let parsed: Location = serde_json::from_value(serde_json::json!([7, 6])).unwrap();
        assert_eq!(parsed, Location::new(7, 6));
    }

    #[test]
    fn rejects_cells_off_the_grid() {
        assert!(serde_json::from_value::<Location>(serde_json::json!([28, 0])).is_err());
        assert!(serde_json::from_value::<Location>(serde_json::json!([-1, 5])).is_err());
    }

    #[test]
    fn grid_point_round_trips_inside_the_square() {
        let p = GridPoint::from(Location::new(20, 13)) + (-2, 0);
        assert_eq!(p.as_location(), Some(Location::new(18, 13)));
        assert_eq!(GridPoint::new(-1, 5).as_location(), None);
        assert_eq!(GridPoint::new(5, 28).as_location(), None);
    }

    #[test]
    fn edge_membership_on_the_diamond() {
        assert_eq!(edges_of(Location::new(13, 0)), EdgeFlags::BOTTOM_LEFT);
        assert_eq!(edges_of(Location::new(14, 0)), EdgeFlags::BOTTOM_RIGHT);
        assert_eq!(edges_of(Location::new(0, 13)), EdgeFlags::BOTTOM_LEFT);
        assert_eq!(edges_of(Location::new(0, 14)), EdgeFlags::TOP_LEFT);
        assert_eq!(edges_of(Location::new(27, 14)), EdgeFlags::TOP_RIGHT);
        assert_eq!(edges_of(Location::new(13, 5)), EdgeFlags::empty());
        assert_eq!(
            edges_of(Location::new(17, 3)),
            EdgeFlags::BOTTOM_RIGHT,
        );
    }

    #[test]
    fn deploy_edges_route_to_the_opposite_corner() {
        assert_eq!(EdgeFlags::BOTTOM_LEFT.opposite(), EdgeFlags::TOP_RIGHT);
        assert_eq!(EdgeFlags::BOTTOM_RIGHT.opposite(), EdgeFlags::TOP_LEFT);
        assert_eq!(
            (EdgeFlags::TOP_LEFT | EdgeFlags::TOP_RIGHT).opposite(),
            EdgeFlags::BOTTOM_LEFT | EdgeFlags::BOTTOM_RIGHT,
        );
    }

    #[test]
    fn edge_cell_enumeration_matches_membership() {
        let bottom_left = edge_cells(EdgeFlags::BOTTOM_LEFT);
        assert_eq!(bottom_left.len(), 14);
        assert!(bottom_left
            .iter()
            .all(|&c| edges_of(c).contains(EdgeFlags::BOTTOM_LEFT)));
        assert_eq!(bottom_left[0], Location::new(13, 0));
        assert_eq!(bottom_left[13], Location::new(0, 13));
    }
}
