//! Combat resolution - menus, action execution and affinity handling

mod affinity;
mod menu;
mod resolver;
mod result;

pub use affinity::{affinity_of, Affinity};
pub use menu::{page_count, Choice, Menu, MenuBook, MenuState};
pub use resolver::{instakill_chance, ActionResolver};
pub use result::{ActionOutcome, TurnProgress};
