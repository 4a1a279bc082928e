//! Battle sessions - state, the async turn driver and its collaborators

mod driver;
mod io;
mod registry;
mod state;

pub use driver::{BattleOutcome, TurnDriver};
pub use io::{ChannelInput, CollectingNarrator, InputProvider, Narrator, PlayerInput};
pub use registry::{BattleGuard, BattleRegistry};
pub use state::{status_line, BattleState};
