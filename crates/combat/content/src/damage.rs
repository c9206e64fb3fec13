//! Catalog-driven damage calculator.

use combat_core::{DamageOracle, DamageRequest, DamageRoll, Facing};

/// Returns each spell's base damage, raised by the target's facing.
///
/// Hits on a target's side add 10%, hits in the back add 25%. The result is
/// rounded down. Critical hits are never rolled, which keeps runs
/// reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatDamage {
    pub side_bonus_percent: u32,
    pub back_bonus_percent: u32,
}

impl FlatDamage {
    pub const DEFAULT_SIDE_BONUS_PERCENT: u32 = 10;
    pub const DEFAULT_BACK_BONUS_PERCENT: u32 = 25;

    pub const fn new() -> Self {
        Self {
            side_bonus_percent: Self::DEFAULT_SIDE_BONUS_PERCENT,
            back_bonus_percent: Self::DEFAULT_BACK_BONUS_PERCENT,
        }
    }

    /// Base damage only, whatever the facing.
    pub const fn without_facing() -> Self {
        Self {
            side_bonus_percent: 0,
            back_bonus_percent: 0,
        }
    }

    fn bonus_percent(&self, facing: Option<Facing>) -> u32 {
        match facing {
            Some(Facing::Side) => self.side_bonus_percent,
            Some(Facing::Back) => self.back_bonus_percent,
            Some(Facing::Front) | None => 0,
        }
    }
}

impl Default for FlatDamage {
    fn default() -> Self {
        Self::new()
    }
}

impl DamageOracle for FlatDamage {
    fn roll(&self, request: &DamageRequest<'_>) -> DamageRoll {
        let base = u64::from(request.spell.base_damage);
        let scaled = base * u64::from(100 + self.bonus_percent(request.target_facing)) / 100;
        DamageRoll {
            damage: u32::try_from(scaled).unwrap_or(u32::MAX),
            critical: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Build, Position, SimulationContext, SpellProfile};

    use super::*;

    fn roll(oracle: &FlatDamage, facing: Option<Facing>) -> u32 {
        let build = Build::new("xelor", 12, 4, 6);
        let spell = SpellProfile::new("XEL_FRAPPE", 4, 0).with_damage(52);
        let context = SimulationContext::default();
        oracle
            .roll(&DamageRequest {
                build: &build,
                spell: &spell,
                caster: Position::new(6, 10),
                target: Position::new(8, 10),
                target_facing: facing,
                context: &context,
                step: 0,
            })
            .damage
    }

    #[test]
    fn facing_raises_damage() {
        let oracle = FlatDamage::new();
        assert_eq!(roll(&oracle, None), 52);
        assert_eq!(roll(&oracle, Some(Facing::Front)), 52);
        assert_eq!(roll(&oracle, Some(Facing::Side)), 57);
        assert_eq!(roll(&oracle, Some(Facing::Back)), 65);
    }

    #[test]
    fn without_facing_ignores_orientation() {
        assert_eq!(roll(&FlatDamage::without_facing(), Some(Facing::Back)), 52);
    }
}
