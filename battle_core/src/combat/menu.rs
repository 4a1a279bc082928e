//! Per-participant menu state machine
//!
//! `main` offers Attack, Skills and Guard. `skills` lists the actor's
//! abilities a page at a time. Navigation never consumes the turn.

use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::reference::ReferenceData;
use crate::types::ParticipantId;
use std::collections::HashMap;
use std::str::FromStr;

/// Which menu a participant is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Menu {
    #[default]
    Main,
    Skills,
}

/// A parsed menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A 1-based menu entry or ability number
    Index(usize),
    Back,
    PrevPage,
    NextPage,
}

impl FromStr for Choice {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "0" | "back" => Ok(Choice::Back),
            "<" | "prev" => Ok(Choice::PrevPage),
            ">" | "next" => Ok(Choice::NextPage),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Choice::Index)
                .ok_or_else(|| BattleError::InvalidSelection(trimmed.to_string())),
        }
    }
}

/// Menu position of one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub current: Menu,
    /// Zero-based skills page
    pub page: usize,
}

impl MenuState {
    pub fn open_skills(&mut self) {
        self.current = Menu::Skills;
        self.page = 0;
    }

    /// Return to the main menu
    pub fn reset(&mut self) {
        self.current = Menu::Main;
        self.page = 0;
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page + 1 < page_count {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Menu text for the current position
    pub fn render(
        &self,
        combatant: &Combatant,
        refs: &dyn ReferenceData,
        page_size: usize,
    ) -> String {
        match self.current {
            Menu::Main => main_menu_text(),
            Menu::Skills => skills_menu_text(combatant, refs, self.page, page_size),
        }
    }
}

/// Number of skills pages for an ability count
pub fn page_count(abilities: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    abilities.div_ceil(page_size).max(1)
}

fn main_menu_text() -> String {
    concat!(
        "Choose an action:\n",
        "1 - 🗡️ Attack\n",
        "2 - 📜 Skills\n",
        "3 - 🛡️ Guard\n",
        "\nType the number of your choice."
    )
    .to_string()
}

fn skills_menu_text(
    combatant: &Combatant,
    refs: &dyn ReferenceData,
    page: usize,
    page_size: usize,
) -> String {
    let page_size = page_size.max(1);
    let pages = page_count(combatant.abilities.len(), page_size);
    let page = page.min(pages - 1);

    let mut lines = vec!["Choose a skill:".to_string()];
    for (index, name) in combatant
        .abilities
        .iter()
        .enumerate()
        .skip(page * page_size)
        .take(page_size)
    {
        let number = index + 1;
        match refs.find_move(name) {
            Some(mv) => lines.push(format!(
                "{}. {} — {} ({} SP)",
                number,
                mv.label(),
                mv.element,
                mv.sp
            )),
            None => lines.push(format!("{}. {} (Unknown Move)", number, name)),
        }
    }

    if pages > 1 {
        lines.push(format!("Page {}/{} - type < or > to change page", page + 1, pages));
    }
    lines.push("0 - ⬅️ Back to main menu".to_string());
    lines.join("\n")
}

/// Menu states of every human participant in one battle
#[derive(Debug, Clone, Default)]
pub struct MenuBook {
    states: HashMap<ParticipantId, MenuState>,
}

impl MenuBook {
    pub fn new() -> Self {
        MenuBook {
            states: HashMap::new(),
        }
    }

    /// Current state, `main` for a participant that has not acted yet
    pub fn get(&self, participant: &ParticipantId) -> MenuState {
        self.states.get(participant).copied().unwrap_or_default()
    }

    /// Mutable state, created on first use
    pub fn entry(&mut self, participant: &ParticipantId) -> &mut MenuState {
        self.states.entry(participant.clone()).or_default()
    }

    /// Put every participant back on the main menu
    pub fn reset_all(&mut self) {
        for state in self.states.values_mut() {
            state.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{make_combatant, test_tables};

    #[test]
    fn test_parse_choices() {
        assert_eq!("2".parse::<Choice>().unwrap(), Choice::Index(2));
        assert_eq!(" 0 ".parse::<Choice>().unwrap(), Choice::Back);
        assert_eq!("Back".parse::<Choice>().unwrap(), Choice::Back);
        assert_eq!("<".parse::<Choice>().unwrap(), Choice::PrevPage);
        assert_eq!(">".parse::<Choice>().unwrap(), Choice::NextPage);
        assert_eq!(
            "fireball".parse::<Choice>().unwrap_err(),
            BattleError::InvalidSelection("fireball".to_string())
        );
    }

    #[test]
    fn test_states_keyed_by_participant() {
        let mut book = MenuBook::new();
        let alice = ParticipantId::from("alice");
        let bob = ParticipantId::from("bob");

        book.entry(&alice).open_skills();
        assert_eq!(book.get(&alice).current, Menu::Skills);
        assert_eq!(book.get(&bob).current, Menu::Main);

        book.entry(&bob);
        book.reset_all();
        assert_eq!(book.get(&alice).current, Menu::Main);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut state = MenuState::default();
        state.open_skills();
        state.prev_page();
        assert_eq!(state.page, 0);
        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_skills_text_pages() {
        let tables = test_tables();
        let mut demon = make_combatant("Pixie", 5);
        demon.abilities = ["Agi", "Bufu", "Zio", "Garu", "Dia", "Poisma", "Tarukaja", "Nonexistent"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let first = skills_menu_text(&demon, &tables, 0, 6);
        assert!(first.contains("1. 🔥 Agi — Fire (4 SP)"));
        assert!(first.contains("Page 1/2"));
        assert!(!first.contains("Tarukaja"));

        let second = skills_menu_text(&demon, &tables, 1, 6);
        assert!(second.contains("7. ⚔️ Tarukaja"));
        assert!(second.contains("8. Nonexistent (Unknown Move)"));
        assert!(second.ends_with("0 - ⬅️ Back to main menu"));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 6), 1);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
    }
}
