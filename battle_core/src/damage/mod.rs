//! Damage system - the offense/vitality curve and its multiplier chain

mod calculation;
mod context;

pub use calculation::{
    base_damage, calculate_damage, calculate_damage_breakdown, hit_chance,
    level_correction_multiplier, level_root, offense, pre_random_damage, random_bonus,
    DamageBreakdown,
};
pub use context::DamageContext;
