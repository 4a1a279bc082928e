//! Turn driver - strict alternation, per-turn deadlines and victory detection

use super::{BattleState, InputProvider, Narrator, PlayerInput};
use crate::combat::ActionResolver;
use crate::combatant::Combatant;
use crate::config::BattleConstants;
use crate::error::{BattleError, Result};
use crate::event::BattleEvent;
use crate::policy::EnemyPolicy;
use crate::reference::ReferenceData;
use crate::status::{process_end, process_start};
use crate::types::{ParticipantId, Side};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: Side,
    /// Turns played, counting forfeited and skipped ones
    pub turns: u32,
}

/// Runs one battle at a time against shared reference data
pub struct TurnDriver<R> {
    refs: Arc<dyn ReferenceData>,
    constants: Arc<BattleConstants>,
    policy: EnemyPolicy,
    rng: R,
    turn_timeout: Duration,
}

impl<R: Rng> TurnDriver<R> {
    pub fn new(refs: Arc<dyn ReferenceData>, constants: Arc<BattleConstants>, rng: R) -> Self {
        let turn_timeout = constants.turn.timeout();
        let policy = EnemyPolicy::new(constants.policy.clone());
        TurnDriver {
            refs,
            constants,
            policy,
            rng,
            turn_timeout,
        }
    }

    /// Override the configured per-turn deadline
    pub fn with_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }

    /// Play turns until one side falls
    ///
    /// Menu state is reset for every participant before returning.
    pub async fn run(
        &mut self,
        state: &mut BattleState,
        input: &dyn InputProvider,
        narrator: &dyn Narrator,
    ) -> BattleOutcome {
        tracing::info!(player = %state.player.name, enemy = %state.enemy.name, "battle started");

        let winner = loop {
            if let Some(winner) = self.play_turn(state, input, narrator).await {
                break winner;
            }
        };

        state.menus.reset_all();

        narrator.narrate(&BattleEvent::Victory {
            winner: state.combatant(winner).display_name(),
            loser: state.combatant(winner.opponent()).display_name(),
        });

        let outcome = BattleOutcome {
            winner,
            turns: state.turns(),
        };
        tracing::info!(winner = ?outcome.winner, turns = outcome.turns, "battle finished");
        outcome
    }

    /// Play the active side's turn
    ///
    /// Returns the winner if the battle ended, otherwise passes the turn.
    pub async fn play_turn(
        &mut self,
        state: &mut BattleState,
        input: &dyn InputProvider,
        narrator: &dyn Narrator,
    ) -> Option<Side> {
        if let Some(winner) = state.winner() {
            return Some(winner);
        }

        state.begin_turn();
        let side = state.active_side();
        state.parts_mut(side).0.is_guarding = false;
        let board = state.board();
        let resolver = ActionResolver::new(self.refs.as_ref(), self.constants.as_ref());

        let (actor, opponent, menus) = state.parts_mut(side);
        tracing::debug!(turn = ?side, combatant = %actor.name, "turn started");

        let start = process_start(actor, &mut self.rng);
        narrator.narrate_all(&start.events);

        if start.acted {
            match actor.owner.clone() {
                None => {
                    let outcome = self.policy.act(
                        &resolver,
                        self.refs.as_ref(),
                        actor,
                        opponent,
                        &mut self.rng,
                    );
                    narrator.narrate_all(&outcome.events);
                }
                Some(participant) => {
                    narrator.narrate(&BattleEvent::Prompt {
                        text: format!(
                            "{}\n\n<@{}>, it's your turn!\n{}",
                            board,
                            participant,
                            resolver.menu_text(menus, &participant, actor)
                        ),
                    });

                    let deadline = Instant::now() + self.turn_timeout;
                    loop {
                        let next = match await_input(input, &participant, deadline).await {
                            Ok(next) => next,
                            Err(err) => {
                                timed_out(actor, &err, narrator);
                                break;
                            }
                        };

                        if next.actor != participant {
                            tracing::trace!(from = %next.actor, "input from another participant");
                            continue;
                        }

                        let progress = resolver.process_input(
                            menus,
                            &participant,
                            &next.choice,
                            actor,
                            opponent,
                            &mut self.rng,
                        );
                        narrator.narrate_all(&progress.events);
                        if progress.completed {
                            break;
                        }
                    }
                }
            }
        }

        if let Some(winner) = state.winner() {
            return Some(winner);
        }

        let (actor, _, _) = state.parts_mut(side);
        narrator.narrate_all(&process_end(actor));
        tracing::debug!(turn = ?side, "turn finished");

        state.pass_turn();
        None
    }
}

/// Next input before the deadline, or `Timeout`
///
/// A closed source counts as silence until the deadline passes.
async fn await_input(
    input: &dyn InputProvider,
    participant: &ParticipantId,
    deadline: Instant,
) -> Result<PlayerInput> {
    match timeout_at(deadline, input.next_input(participant)).await {
        Ok(Some(next)) => Ok(next),
        Ok(None) => {
            tokio::time::sleep_until(deadline).await;
            Err(BattleError::Timeout)
        }
        Err(_) => Err(BattleError::Timeout),
    }
}

fn timed_out(actor: &Combatant, err: &BattleError, narrator: &dyn Narrator) {
    tracing::info!(combatant = %actor.name, %err, "turn forfeited");
    narrator.narrate(&BattleEvent::TurnTimedOut {
        actor: actor.display_name(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{ChannelInput, CollectingNarrator, PlayerInput};
    use crate::combat::Menu;
    use crate::rng::ScriptedRng;
    use crate::status::add_status_effect;
    use crate::test_support::{make_combatant, test_tables};
    use crate::types::{Element, ParticipantId};

    fn driver(rng: ScriptedRng) -> TurnDriver<ScriptedRng> {
        TurnDriver::new(
            Arc::new(test_tables()),
            Arc::new(BattleConstants::default()),
            rng,
        )
        .with_timeout(Duration::from_millis(20))
    }

    fn human_vs_ai() -> BattleState {
        let mut player = make_combatant("Pixie", 10);
        player.owner = Some("alice".into());
        BattleState::new(player, make_combatant("Slime", 10))
    }

    #[tokio::test]
    async fn test_ai_battle_runs_to_completion() {
        let mut state = BattleState::new(make_combatant("Pixie", 10), make_combatant("Slime", 10));
        let (_tx, input) = ChannelInput::channel(1);
        let narrator = CollectingNarrator::new();

        // every attack lands for 27 with no crits, so the first mover needs 8 hits
        let outcome = driver(ScriptedRng::constant(0.5))
            .run(&mut state, &input, &narrator)
            .await;

        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.turns, 15);
        assert!(!state.enemy.is_alive());
        assert_eq!(state.player.hp, state.player.max_hp - 7 * 27);
        assert!(matches!(narrator.events().last(), Some(BattleEvent::Victory { .. })));
    }

    #[tokio::test]
    async fn test_timeout_forfeits_turn() {
        let mut state = human_vs_ai();
        state.player.hp = 1;
        let (_tx, input) = ChannelInput::channel(1);
        let narrator = CollectingNarrator::new();

        let outcome = driver(ScriptedRng::constant(0.5))
            .run(&mut state, &input, &narrator)
            .await;

        assert_eq!(outcome.winner, Side::Enemy);
        assert_eq!(outcome.turns, 2);
        assert_eq!(state.enemy.hp, state.enemy.max_hp);
        assert!(narrator
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::TurnTimedOut { .. })));
    }

    #[tokio::test]
    async fn test_menus_reset_when_battle_ends() {
        let mut state = human_vs_ai();
        state.player.hp = 1;
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "2")).await.unwrap();
        let narrator = CollectingNarrator::new();

        driver(ScriptedRng::constant(0.5))
            .run(&mut state, &input, &narrator)
            .await;

        let alice = ParticipantId::from("alice");
        assert_eq!(state.menus.len(), 1);
        assert_eq!(state.menus.get(&alice).current, Menu::Main);
    }

    #[tokio::test]
    async fn test_guard_resets_at_start_of_own_turn() {
        let mut state = human_vs_ai();
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "3")).await.unwrap();
        let narrator = CollectingNarrator::new();
        let mut driver = driver(ScriptedRng::constant(0.1));

        assert!(driver.play_turn(&mut state, &input, &narrator).await.is_none());
        assert!(state.player.is_guarding);

        // the enemy rolls under its guard chance
        assert!(driver.play_turn(&mut state, &input, &narrator).await.is_none());
        assert!(state.enemy.is_guarding);
        assert!(state.player.is_guarding);

        // no input this time; the guard still drops before the deadline passes
        assert!(driver.play_turn(&mut state, &input, &narrator).await.is_none());
        assert!(!state.player.is_guarding);
        assert!(state.enemy.is_guarding);
        assert_eq!(state.turns(), 3);
    }

    #[tokio::test]
    async fn test_disabled_combatant_skips_input_but_ticks() {
        let tables = test_tables();
        let mut state = human_vs_ai();
        add_status_effect(&mut state.player, "sleep", None, &tables).unwrap();
        let (_tx, input) = ChannelInput::channel(1);
        let narrator = CollectingNarrator::new();

        driver(ScriptedRng::constant(0.5))
            .play_turn(&mut state, &input, &narrator)
            .await;

        let events = narrator.events();
        assert!(matches!(events[0], BattleEvent::CannotAct { .. }));
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::Prompt { .. })));
        assert_eq!(state.player.status("sleep").unwrap().turns_remaining, 2);
        assert_eq!(state.active_side(), Side::Enemy);
    }

    #[tokio::test]
    async fn test_inputs_from_other_participants_ignored() {
        let mut state = human_vs_ai();
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("bob", "1")).await.unwrap();
        tx.send(PlayerInput::new("alice", "3")).await.unwrap();
        let narrator = CollectingNarrator::new();

        driver(ScriptedRng::constant(0.5))
            .play_turn(&mut state, &input, &narrator)
            .await;

        assert!(state.player.is_guarding);
        assert_eq!(state.enemy.hp, state.enemy.max_hp);
    }

    #[tokio::test]
    async fn test_human_turn_starts_with_board_and_menu() {
        let mut state = human_vs_ai();
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "3")).await.unwrap();
        let narrator = CollectingNarrator::new();

        driver(ScriptedRng::constant(0.5))
            .play_turn(&mut state, &input, &narrator)
            .await;

        let BattleEvent::Prompt { text } = &narrator.events()[0] else {
            panic!("expected a prompt first");
        };
        assert!(text.contains("**Pixie** Lv10 (<@alice>)"));
        assert!(text.contains("<@alice>, it's your turn!"));
        assert!(text.contains("1 - 🗡️ Attack"));
    }

    #[tokio::test]
    async fn test_turn_prompt_shows_guard_already_dropped() {
        let mut state = human_vs_ai();
        state.player.is_guarding = true;
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "1")).await.unwrap();
        let narrator = CollectingNarrator::new();

        driver(ScriptedRng::constant(0.5))
            .play_turn(&mut state, &input, &narrator)
            .await;

        let BattleEvent::Prompt { text } = &narrator.events()[0] else {
            panic!("expected a prompt first");
        };
        let player_hp_line = text.lines().find(|l| l.starts_with("HP:")).unwrap();
        assert!(!player_hp_line.contains("🛡️"));
        assert!(!state.player.is_guarding);
    }

    #[tokio::test]
    async fn test_timed_out_turn_still_ticks_statuses() {
        let tables = test_tables();
        let mut state = human_vs_ai();
        add_status_effect(&mut state.player, "tarukaja", None, &tables).unwrap();
        let before = state.player.status("tarukaja").unwrap().turns_remaining;
        let (_tx, input) = ChannelInput::channel(1);
        let narrator = CollectingNarrator::new();

        let winner = driver(ScriptedRng::constant(0.5))
            .play_turn(&mut state, &input, &narrator)
            .await;

        assert!(winner.is_none());
        assert!(narrator
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::TurnTimedOut { .. })));
        assert_eq!(
            state.player.status("tarukaja").unwrap().turns_remaining,
            before - 1
        );
        assert_eq!(state.active_side(), Side::Enemy);
    }

    #[tokio::test]
    async fn test_lethal_repel_hands_victory_to_defender() {
        let mut state = human_vs_ai();
        state.player.hp = 1;
        state.enemy.resistances.repel.insert(Element::Physical);
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "1")).await.unwrap();
        let narrator = CollectingNarrator::new();

        let outcome = driver(ScriptedRng::constant(0.5))
            .run(&mut state, &input, &narrator)
            .await;

        assert_eq!(outcome.winner, Side::Enemy);
        assert_eq!(outcome.turns, 1);
        assert!(!state.player.is_alive());
        assert_eq!(state.enemy.hp, state.enemy.max_hp);
        assert!(matches!(narrator.events().last(), Some(BattleEvent::Victory { .. })));
    }
}
