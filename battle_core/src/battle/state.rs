//! BattleState - the two combatants, whose turn it is, and menu state

use crate::combat::MenuBook;
use crate::combatant::Combatant;
use crate::types::Side;

/// One battle's mutable state, owned by a single driver
#[derive(Debug, Clone)]
pub struct BattleState {
    pub player: Combatant,
    pub enemy: Combatant,
    /// Menu positions of human participants in this battle
    pub menus: MenuBook,
    active: Side,
    turns: u32,
}

impl BattleState {
    /// New battle; the player side acts first
    pub fn new(player: Combatant, enemy: Combatant) -> Self {
        BattleState {
            player,
            enemy,
            menus: MenuBook::new(),
            active: Side::Player,
            turns: 0,
        }
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    /// Turns started so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub(crate) fn begin_turn(&mut self) {
        self.turns += 1;
    }

    /// Hand the turn to the other side
    pub fn pass_turn(&mut self) {
        self.active = self.active.opponent();
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Actor, opponent and menus for the given acting side
    pub fn parts_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant, &mut MenuBook) {
        match side {
            Side::Player => (&mut self.player, &mut self.enemy, &mut self.menus),
            Side::Enemy => (&mut self.enemy, &mut self.player, &mut self.menus),
        }
    }

    /// Winning side once either combatant has fallen
    ///
    /// Should both be down, the side whose action just resolved wins.
    pub fn winner(&self) -> Option<Side> {
        let active = self.active;
        if !self.combatant(active.opponent()).is_alive() {
            Some(active)
        } else if !self.combatant(active).is_alive() {
            Some(active.opponent())
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Status lines for both sides
    pub fn board(&self) -> String {
        format!("{}\n\n{}", status_line(&self.player), status_line(&self.enemy))
    }
}

/// Hp, sp, guard and statuses of a combatant
pub fn status_line(combatant: &Combatant) -> String {
    let mention = combatant
        .owner
        .as_ref()
        .map(|owner| format!(" (<@{}>)", owner))
        .unwrap_or_default();

    let mut line = format!(
        "**{}** Lv{}{}\nHP: {} / {} | SP: {} / {}",
        combatant.name,
        combatant.level,
        mention,
        combatant.hp.max(0),
        combatant.max_hp,
        combatant.sp,
        combatant.max_sp
    );

    if combatant.is_guarding {
        line.push_str(" 🛡️");
    }

    let statuses: Vec<String> = combatant
        .status_effects
        .iter()
        .filter(|s| s.is_active())
        .map(|s| {
            let stacks = if s.stacks > 1 {
                format!(" x{}", s.stacks)
            } else {
                String::new()
            };
            format!("{}{} ({})", s.label(), stacks, s.turns_remaining)
        })
        .collect();

    if !statuses.is_empty() {
        line.push_str(" | Status: ");
        line.push_str(&statuses.join(", "));
    }

    line
}
