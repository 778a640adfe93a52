//! Player progression record and the arithmetic that governs it.

use serde::{Deserialize, Serialize};

/// Base HP before the per-level bonus.
pub const BASE_MAX_HP: i32 = 80;
/// Max HP gained per level.
pub const MAX_HP_PER_LEVEL: i32 = 20;
/// XP needed to leave level 1; each later level needs 20% more.
pub const XP_BASE: f64 = 75.0;
pub const XP_GROWTH: f64 = 1.2;
/// HP restored on each level-up, capped at the new max.
pub const LEVEL_UP_HEAL: i32 = 30;
/// Hard ceilings on loaded/merged records. A save can hold any finite JSON
/// number; values past these would overflow the max-HP and threshold math,
/// so sanitization clamps instead of trusting them.
pub const LEVEL_CAP: u32 = 10_000;
pub const XP_CAP: i32 = 1_000_000_000;

/// Persisted progression record.
///
/// Invariants (maintained by this module, assumed elsewhere):
/// - `level >= 1`
/// - `max_hp == 80 + level * 20`, recomputed whenever level changes
/// - `0 <= hp <= max_hp`
/// - `xp >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hp: i32,
    #[serde(rename = "maxHp", default)]
    pub max_hp: i32,
    pub xp: i32,
    pub level: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl PlayerState {
    /// First-session state: level 1, full HP, no XP.
    pub fn fresh() -> Self {
        PlayerState {
            hp: 100,
            max_hp: 100,
            xp: 0,
            level: 1,
        }
    }

    /// XP required to advance out of the current level. Real-valued; compared
    /// against the integer `xp` total.
    pub fn xp_threshold(&self) -> f64 {
        XP_BASE * XP_GROWTH.powi(self.level as i32 - 1)
    }

    /// Recompute `max_hp` from the current level and clamp `hp` into range.
    pub fn recompute_max_hp(&mut self) {
        self.max_hp = max_hp_for_level(self.level);
        self.hp = self.hp.clamp(0, self.max_hp);
    }

    /// Consume banked XP across as many thresholds as it covers. Each level
    /// gained restores some HP, capped at the new max. The integer XP carry
    /// is floored at zero when the real-valued threshold leaves a fraction.
    pub fn apply_level_ups(&mut self) {
        while self.level < LEVEL_CAP && (self.xp as f64) >= self.xp_threshold() {
            let threshold = self.xp_threshold();
            self.level += 1;
            self.xp = ((self.xp as f64 - threshold).max(0.0)).floor() as i32;
            self.max_hp = max_hp_for_level(self.level);
            self.hp = (self.hp + LEVEL_UP_HEAL).min(self.max_hp);
        }
    }

    /// Repair a record that came from storage or an untrusted merge so the
    /// invariants above hold. A dead `hp` is revived to the full max for the
    /// level; a stored game-over must not resume as a dead player.
    pub fn sanitize_loaded(&mut self) {
        self.level = self.level.clamp(1, LEVEL_CAP);
        self.xp = self.xp.clamp(0, XP_CAP);
        self.max_hp = max_hp_for_level(self.level);
        if self.hp <= 0 {
            self.hp = self.max_hp;
        }
        self.hp = self.hp.min(self.max_hp);
    }
}

/// `80 + level * 20`, the derived max-HP curve. Levels past [`LEVEL_CAP`]
/// are treated as the cap so the arithmetic cannot overflow.
pub fn max_hp_for_level(level: u32) -> i32 {
    BASE_MAX_HP + level.min(LEVEL_CAP) as i32 * MAX_HP_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_first_session_defaults() {
        let p = PlayerState::fresh();
        assert_eq!((p.hp, p.max_hp, p.xp, p.level), (100, 100, 0, 1));
    }

    #[test]
    fn max_hp_curve() {
        assert_eq!(max_hp_for_level(1), 100);
        assert_eq!(max_hp_for_level(2), 120);
        assert_eq!(max_hp_for_level(5), 180);
    }

    #[test]
    fn threshold_grows_twenty_percent_per_level() {
        let mut p = PlayerState::fresh();
        assert_eq!(p.xp_threshold(), 75.0);
        p.level = 2;
        assert!((p.xp_threshold() - 90.0).abs() < 1e-9);
        p.level = 3;
        assert!((p.xp_threshold() - 108.0).abs() < 1e-9);
    }

    #[test]
    fn exact_threshold_levels_up_with_zero_carry() {
        // Five correct answers at 15 XP each = 75, exactly the level-1 bar.
        let mut p = PlayerState::fresh();
        p.xp = 75;
        p.apply_level_ups();
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 0);
        assert_eq!(p.max_hp, 120);
        // 100 + 30 heal, capped at the new max of 120.
        assert_eq!(p.hp, 120);
    }

    #[test]
    fn overflow_xp_crosses_multiple_thresholds() {
        // 75 + 90 = 165 covers levels 1 and 2 in one resolution.
        let mut p = PlayerState::fresh();
        p.xp = 170;
        p.apply_level_ups();
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 5);
        assert_eq!(p.max_hp, 140);
    }

    #[test]
    fn below_threshold_is_untouched() {
        let mut p = PlayerState::fresh();
        p.xp = 74;
        p.apply_level_ups();
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 74);
    }

    #[test]
    fn heal_is_capped_at_new_max() {
        let mut p = PlayerState::fresh();
        p.hp = 10;
        p.xp = 75;
        p.apply_level_ups();
        assert_eq!(p.level, 2);
        assert_eq!(p.hp, 40);
    }

    #[test]
    fn sanitize_revives_dead_load_at_level_max() {
        let mut p = PlayerState {
            hp: 0,
            max_hp: 0,
            xp: 10,
            level: 3,
        };
        p.sanitize_loaded();
        assert_eq!(p.hp, 140);
        assert_eq!(p.max_hp, 140);
    }

    #[test]
    fn sanitize_clamps_absurd_level_and_xp() {
        let mut p = PlayerState {
            hp: 100,
            max_hp: 0,
            xp: i32::MAX,
            level: 200_000_000,
        };
        p.sanitize_loaded();
        assert_eq!(p.level, LEVEL_CAP);
        assert_eq!(p.xp, XP_CAP);
        assert_eq!(p.max_hp, max_hp_for_level(LEVEL_CAP));
    }

    #[test]
    fn max_hp_curve_is_total_for_any_level() {
        // Levels past the cap must not overflow the multiply.
        assert_eq!(max_hp_for_level(u32::MAX), max_hp_for_level(LEVEL_CAP));
    }

    #[test]
    fn level_ups_stop_at_the_cap() {
        let mut p = PlayerState {
            hp: 100,
            max_hp: 0,
            xp: XP_CAP,
            level: LEVEL_CAP,
        };
        p.apply_level_ups();
        assert_eq!(p.level, LEVEL_CAP, "cap must not be exceeded");
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let mut p = PlayerState {
            hp: 999,
            max_hp: 0,
            xp: -5,
            level: 0,
        };
        p.sanitize_loaded();
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
        assert_eq!(p.max_hp, 100);
        assert_eq!(p.hp, 100);
    }
}
