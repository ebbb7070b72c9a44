//! Skill definitions and the leveling curve.

use super::ids::SkillId;

/// Static definition of a skill.
///
/// The curve is linear: reaching the next level from level `n` costs
/// `base_xp + n * xp_step`. Experience carried past a threshold rolls into
/// the next level, so one large grant can produce several level-ups.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default = "default_base_xp"))]
    pub base_xp: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_xp_step"))]
    pub xp_step: u32,
}

fn default_base_xp() -> u32 {
    100
}

fn default_xp_step() -> u32 {
    25
}

impl SkillDef {
    /// XP required to advance from `level` to `level + 1`.
    pub fn xp_to_next(&self, level: u32) -> u32 {
        self.base_xp.saturating_add(level.saturating_mul(self.xp_step))
    }

    /// Applies an XP grant to `(level, xp)` and returns the new progress
    /// plus the number of levels gained.
    pub fn apply_xp(&self, level: u32, xp: u32, gained: u32) -> (u32, u32, u32) {
        let mut level = level;
        let mut xp = xp.saturating_add(gained);
        let mut levels_gained = 0;

        loop {
            let threshold = self.xp_to_next(level);
            if xp < threshold {
                break;
            }
            xp -= threshold;
            level += 1;
            levels_gained += 1;
        }

        (level, xp, levels_gained)
    }
}
