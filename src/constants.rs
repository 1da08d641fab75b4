pub const ARENA_SIZE: u8 = 28;
pub const HALF_ARENA: u8 = 14;

/// Health-differential thresholds for the collapse/rebuild state machine.
/// A deficit larger than `COLLAPSE_DEFICIT` while own health is under
/// `COLLAPSE_OWN_FLOOR` abandons measured play; either emergency floor
/// does so unconditionally.
pub const COLLAPSE_DEFICIT: f32 = 8.0;
pub const COLLAPSE_OWN_FLOOR: f32 = 16.0;
pub const ENEMY_EMERGENCY_FLOOR: f32 = 6.0;
pub const OWN_EMERGENCY_FLOOR: f32 = 11.0;
pub const RECOVERY_LEAD: f32 = 7.0;

/// Offensive cadence for a given turn number: waves launch every
/// `period` turns, stepping down as the match matures.
pub fn offense_period(turn: u32) -> u32 {
    match turn {
        0..=9 => 1,
        10..=14 => 2,
        15..=29 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_steps_down_with_match_age() {
        assert_eq!(offense_period(0), 1);
        assert_eq!(offense_period(9), 1);
        assert_eq!(offense_period(10), 2);
        assert_eq!(offense_period(14), 2);
        assert_eq!(offense_period(15), 3);
        assert_eq!(offense_period(29), 3);
        assert_eq!(offense_period(30), 4);
        assert_eq!(offense_period(200), 4);
    }
}
