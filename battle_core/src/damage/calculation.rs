//! Damage calculation - attacker, defender and move into an integer hit

use super::DamageContext;
use crate::combatant::Combatant;
use crate::moves::{Move, OffenseStat};
use crate::status::{get_status_multipliers, StatMultipliers};
use crate::types::StatKey;
use rand::Rng;

/// Level-derived soft cap on the offense stat
pub fn level_root(level: u32) -> f64 {
    let level = level as f64;
    if level <= 150.0 {
        level + 10.0
    } else {
        level / 10.0 + 145.0
    }
}

/// Offense value for a (status-modified) stat
///
/// Linear up to the level root, then diminishing returns through the
/// square-root term.
pub fn offense(stat: f64, level: u32) -> f64 {
    let root = level_root(level);
    if stat <= root {
        stat + root
    } else {
        ((stat - root) / 2.0).sqrt() + stat / 2.0 + root * 1.5
    }
}

/// Piecewise base damage from offense against vitality, floored, minimum 1
pub fn base_damage(offense: f64, vitality: f64) -> f64 {
    let diff = offense - vitality;

    let base = if diff <= offense / 2.0 {
        offense * 2.0 / 3.0 - vitality / 3.0 - (vitality - offense / 2.0).max(0.0).sqrt() / 3.0
    } else if diff <= offense * 3.0 / 4.0 {
        diff
    } else {
        offense * 5.0 / 6.0 - vitality / 3.0 + (offense / 4.0 - vitality).max(0.0).sqrt() / 3.0
    };

    base.floor().max(1.0)
}

/// Damage scaling from the level gap between the two combatants
///
/// Neutral within two levels. Bounded to [0.5, 1.5].
pub fn level_correction_multiplier(attacker_level: u32, defender_level: u32) -> f64 {
    let attacker = attacker_level.max(1) as f64;
    let defender = defender_level.max(1) as f64;

    let sum = attacker + defender;
    let factor = if sum <= 30.0 {
        0.0
    } else if sum <= 130.0 {
        (sum - 30.0) / 1000.0
    } else {
        0.1
    };

    if defender - attacker >= 3.0 {
        let penalty = (defender / attacker - 1.0).sqrt() * factor * (defender - attacker - 2.0);
        return (1.0 - penalty).max(0.5);
    }

    if attacker - defender >= 3.0 {
        let boost = (1.0 - defender / attacker).sqrt() * factor * (attacker - defender - 2.0) * 1.2;
        return (1.0 + boost).min(1.5);
    }

    1.0
}

/// Right-skewed random addend for a modified damage value
///
/// `floor(r1 * floor(r2 * max(floor(modified / 10), 1))) + floor(r3 * 4)`
pub fn random_bonus(modified: f64, rng: &mut impl Rng) -> f64 {
    let span = (modified / 10.0).floor().max(1.0);
    let inner = (rng.gen::<f64>() * span).floor();
    let skewed = (rng.gen::<f64>() * inner).floor();
    let flat = (rng.gen::<f64>() * 4.0).floor();
    skewed + flat
}

/// Hit chance in percent, compared by callers against a `[0, 100)` roll
pub fn hit_chance(mv: &Move, attacker: &StatMultipliers, defender: &StatMultipliers) -> f64 {
    let evasion = defender.get(StatKey::EvasionMultiplier);
    let evasion = if evasion > 0.0 { evasion } else { 1.0 };
    mv.accuracy * attacker.get(StatKey::AccuracyMultiplier) / evasion
}

/// Intermediate values of one damage computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageBreakdown {
    pub offense: f64,
    /// Defender vitality after status multipliers
    pub vitality: f64,
    /// Floored base from the piecewise curve
    pub base: f64,
    pub level_correction: f64,
    pub vulnerability: f64,
    /// Base through the whole multiplier chain, before the random addend
    pub pre_random: f64,
    pub random_bonus: f64,
    /// Final integer damage, at least 1
    pub total: u32,
}

/// Everything up to (not including) the random addend
pub fn pre_random_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    ctx: &DamageContext,
) -> DamageBreakdown {
    let attacker_mods = get_status_multipliers(attacker);
    let defender_mods = get_status_multipliers(defender);

    let (stat, stat_key, vulnerability_key) = match mv.offense_stat() {
        OffenseStat::Strength => (
            attacker.strength,
            StatKey::StrengthMultiplier,
            StatKey::PhysicalVulnerability,
        ),
        OffenseStat::Magic => (
            attacker.magic,
            StatKey::MagicMultiplier,
            StatKey::MagicalVulnerability,
        ),
    };

    let offense = offense(stat as f64 * attacker_mods.get(stat_key), attacker.level);
    let vitality = defender.vitality as f64 * defender_mods.get(StatKey::DefenseMultiplier);
    let base = base_damage(offense, vitality);

    let level_correction = level_correction_multiplier(attacker.level, defender.level);
    let vulnerability = defender_mods.get(vulnerability_key);

    let pre_random = base
        * (mv.power as f64 / 100.0)
        * ctx.attack_stage
        * ctx.defense_stage
        * ctx.guard_factor()
        * level_correction
        * vulnerability
        * ctx.caller_factor();

    DamageBreakdown {
        offense,
        vitality,
        base,
        level_correction,
        vulnerability,
        pre_random,
        random_bonus: 0.0,
        total: pre_random.floor().max(1.0) as u32,
    }
}

/// Full computation with the random addend
pub fn calculate_damage_breakdown(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    ctx: &DamageContext,
    rng: &mut impl Rng,
) -> DamageBreakdown {
    let mut breakdown = pre_random_damage(attacker, defender, mv, ctx);
    breakdown.random_bonus = random_bonus(breakdown.pre_random, rng);
    breakdown.total = (breakdown.pre_random + breakdown.random_bonus)
        .floor()
        .max(1.0) as u32;

    tracing::trace!(
        attacker = %attacker.name,
        defender = %defender.name,
        mv = %mv.name,
        offense = breakdown.offense,
        base = breakdown.base,
        pre_random = breakdown.pre_random,
        total = breakdown.total,
        "damage computed"
    );

    breakdown
}

/// Integer damage of one hit, always at least 1
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    ctx: &DamageContext,
    rng: &mut impl Rng,
) -> u32 {
    calculate_damage_breakdown(attacker, defender, mv, ctx, rng).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::status::{StatusCategory, StatusEffectDefinition, StatusEffectInstance};
    use crate::test_support::make_combatant;
    use proptest::prelude::*;

    fn scenario() -> (Combatant, Combatant) {
        let mut attacker = make_combatant("Cu Chulainn", 20);
        attacker.strength = 50;
        let mut defender = make_combatant("Cerberus", 20);
        defender.vitality = 30;
        (attacker, defender)
    }

    fn with_effect(target: &mut Combatant, key: StatKey, value: f64) {
        let mut def = StatusEffectDefinition::new("effect", "Effect", StatusCategory::Buff, 3);
        def.battle_effect.insert(key, value);
        target
            .status_effects
            .push(StatusEffectInstance::new(&def, None));
    }

    #[test]
    fn test_level_root() {
        assert!((level_root(20) - 30.0).abs() < f64::EPSILON);
        assert!((level_root(150) - 160.0).abs() < f64::EPSILON);
        assert!((level_root(200) - 165.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offense_curve() {
        assert!((offense(25.0, 20) - 55.0).abs() < f64::EPSILON);
        let expected = 10f64.sqrt() + 25.0 + 45.0;
        assert!((offense(50.0, 20) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reference_scenario_pre_random() {
        let (attacker, defender) = scenario();
        let breakdown =
            pre_random_damage(&attacker, &defender, &Move::basic_attack(), &DamageContext::new());

        // offense 73.16, gap 43.16 falls in the medium branch
        assert!((breakdown.offense - 73.162_277_660_168_38).abs() < 1e-9);
        assert!((breakdown.base - 43.0).abs() < f64::EPSILON);
        assert!((breakdown.level_correction - 1.0).abs() < f64::EPSILON);
        assert!((breakdown.pre_random - 43.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_rolls_add_nothing() {
        let (attacker, defender) = scenario();
        let mut rng = ScriptedRng::constant(0.0);
        let damage = calculate_damage(
            &attacker,
            &defender,
            &Move::basic_attack(),
            &DamageContext::new(),
            &mut rng,
        );
        assert_eq!(damage, 43);
    }

    #[test]
    fn test_random_bonus_bounds() {
        // floor(0.999 * floor(0.999 * 4)) + floor(0.999 * 4) = 2 + 3
        let mut high = ScriptedRng::constant(0.999);
        assert!((random_bonus(43.0, &mut high) - 5.0).abs() < f64::EPSILON);

        let mut low = ScriptedRng::constant(0.0);
        assert!(random_bonus(43.0, &mut low).abs() < f64::EPSILON);
    }

    #[test]
    fn test_guard_is_exactly_eighty_percent() {
        let (attacker, defender) = scenario();
        let attack = Move::basic_attack();
        let open = pre_random_damage(&attacker, &defender, &attack, &DamageContext::new());
        let guarded = pre_random_damage(
            &attacker,
            &defender,
            &attack,
            &DamageContext::new().guarding(true),
        );
        assert!((guarded.pre_random / open.pre_random - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_base_branches() {
        // small gap
        assert!((base_damage(40.0, 30.0) - 15.0).abs() < f64::EPSILON);
        // large gap
        let large = 60.0 * 5.0 / 6.0 - 1.0 + (15.0f64 - 3.0).sqrt() / 3.0;
        assert!((base_damage(60.0, 3.0) - large.floor()).abs() < f64::EPSILON);
        // never below 1
        assert!((base_damage(10.0, 500.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_level_correction_direction() {
        assert!((level_correction_multiplier(10, 12) - 1.0).abs() < f64::EPSILON);
        assert!((level_correction_multiplier(10, 15) - 1.0).abs() < f64::EPSILON);
        assert!(level_correction_multiplier(40, 60) < 1.0);
        assert!(level_correction_multiplier(60, 40) > 1.0);
        assert!((level_correction_multiplier(1, 99) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_multipliers_scale_offense_and_vitality() {
        let (mut attacker, defender) = scenario();
        let attack = Move::basic_attack();
        let plain = pre_random_damage(&attacker, &defender, &attack, &DamageContext::new());

        with_effect(&mut attacker, StatKey::StrengthMultiplier, 1.5);
        let buffed = pre_random_damage(&attacker, &defender, &attack, &DamageContext::new());
        assert!(buffed.offense > plain.offense);

        let (attacker, mut defender) = scenario();
        with_effect(&mut defender, StatKey::DefenseMultiplier, 2.0);
        let armoured = pre_random_damage(&attacker, &defender, &attack, &DamageContext::new());
        assert!((armoured.vitality - 60.0).abs() < f64::EPSILON);
        assert!(armoured.pre_random < plain.pre_random);
    }

    #[test]
    fn test_vulnerability_matches_offense_stat() {
        let (attacker, mut defender) = scenario();
        with_effect(&mut defender, StatKey::PhysicalVulnerability, 1.5);
        let attack = Move::basic_attack();
        let physical = pre_random_damage(&attacker, &defender, &attack, &DamageContext::new());
        assert!((physical.pre_random - 64.5).abs() < 1e-9);

        let mut spell = Move::basic_attack();
        spell.uses_strength = false;
        spell.uses_magic = true;
        let magical = pre_random_damage(&attacker, &defender, &spell, &DamageContext::new());
        assert!((magical.vulnerability - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_caller_multipliers_apply_last() {
        let (attacker, defender) = scenario();
        let ctx = DamageContext::new().with_burst(2.5);
        let charged = pre_random_damage(&attacker, &defender, &Move::basic_attack(), &ctx);
        assert!((charged.pre_random - 107.5).abs() < 1e-9);
    }

    #[test]
    fn test_hit_chance_uses_accuracy_and_evasion() {
        let attack = Move::basic_attack();
        let neutral = StatMultipliers::default();
        assert!((hit_chance(&attack, &neutral, &neutral) - 95.0).abs() < f64::EPSILON);

        let mut evasive = make_combatant("Pixie", 5);
        with_effect(&mut evasive, StatKey::EvasionMultiplier, 2.0);
        let evasion = get_status_multipliers(&evasive);
        assert!((hit_chance(&attack, &neutral, &evasion) - 47.5).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn damage_is_always_positive(
            attacker_level in 1u32..200,
            defender_level in 1u32..200,
            strength in 0u32..500,
            vitality in 0u32..500,
            power in 0u32..400,
            guarding in any::<bool>(),
            roll in 0.0f64..1.0,
        ) {
            let mut attacker = make_combatant("A", attacker_level);
            attacker.strength = strength;
            let mut defender = make_combatant("D", defender_level);
            defender.vitality = vitality;
            let mut mv = Move::basic_attack();
            mv.power = power;

            let mut rng = ScriptedRng::constant(roll);
            let ctx = DamageContext::new().guarding(guarding);
            let damage = calculate_damage(&attacker, &defender, &mv, &ctx, &mut rng);
            prop_assert!(damage >= 1);
        }

        #[test]
        fn level_correction_is_bounded(attacker in 1u32..300, defender in 1u32..300) {
            let multiplier = level_correction_multiplier(attacker, defender);
            prop_assert!((0.5..=1.5).contains(&multiplier));
        }
    }
}
