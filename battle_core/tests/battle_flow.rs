//! End-to-end battles through the public API

use battle_core::battle::CollectingNarrator;
use battle_core::config::{default_roster, DemonRoster};
use battle_core::prelude::*;
use battle_core::rng::ScriptedRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

fn summon(roster: &DemonRoster, name: &str, owner: Option<&str>) -> Combatant {
    let template = roster.get(name).unwrap();
    Combatant::from_template(template, owner.map(ParticipantId::from))
}

fn shared_tables() -> (Arc<ReferenceTables>, Arc<BattleConstants>) {
    (Arc::new(default_reference_tables()), Arc::new(default_constants()))
}

#[tokio::test]
async fn seeded_ai_battle_ends_with_a_fallen_side() {
    let roster = default_roster();
    let (refs, constants) = shared_tables();
    let mut state = BattleState::new(
        summon(&roster, "Cu Chulainn", None),
        summon(&roster, "Pixie", None),
    );
    let (_tx, input) = ChannelInput::channel(1);
    let narrator = CollectingNarrator::new();

    let mut driver = TurnDriver::new(refs, constants, StdRng::seed_from_u64(7));
    let outcome = driver.run(&mut state, &input, &narrator).await;

    assert_eq!(outcome.winner, Side::Player);
    assert!(!state.enemy.is_alive());
    assert!(state.player.is_alive());
    assert_eq!(outcome.turns, state.turns());
    assert!(matches!(
        narrator.events().last(),
        Some(BattleEvent::Victory { winner, .. }) if winner == "Cu Chulainn"
    ));
}

#[tokio::test]
async fn human_player_wins_by_attacking() {
    let roster = default_roster();
    let (refs, constants) = shared_tables();
    let mut state = BattleState::new(
        summon(&roster, "Cu Chulainn", Some("alice")),
        summon(&roster, "Pixie", None),
    );

    let (tx, input) = ChannelInput::channel(256);
    for _ in 0..200 {
        tx.send(PlayerInput::new("alice", "1")).await.unwrap();
    }
    let narrator = CollectingNarrator::new();

    let mut driver = TurnDriver::new(refs, constants, StdRng::seed_from_u64(11))
        .with_timeout(Duration::from_millis(50));
    let outcome = driver.run(&mut state, &input, &narrator).await;

    assert_eq!(outcome.winner, Side::Player);
    assert!(!state.enemy.is_alive());
    let events = narrator.events();
    assert!(events
        .iter()
        .any(|e| matches!(
            e,
            BattleEvent::Prompt { text } if text.contains("<@alice>, it's your turn!")
        )));
    assert!(events
        .iter()
        .any(|e| matches!(
            e,
            BattleEvent::Victory { winner, .. } if winner == "<@alice> (Cu Chulainn)"
        )));
}

#[test]
fn skills_menu_pages_and_returns() {
    let roster = default_roster();
    let refs = default_reference_tables();
    let mut constants = default_constants();
    constants.turn.skills_page_size = 4;
    let resolver = ActionResolver::new(&refs, &constants);

    let alice = ParticipantId::from("alice");
    let mut menus = MenuBook::new();
    let mut player = summon(&roster, "Cerberus", Some("alice"));
    let mut enemy = summon(&roster, "Pixie", None);
    let mut rng = ScriptedRng::constant(0.5);

    let mut feed = |menus: &mut MenuBook, player: &mut Combatant, input: &str| {
        resolver.process_input(menus, &alice, input, player, &mut enemy, &mut rng)
    };

    assert!(!feed(&mut menus, &mut player, "2").completed);
    assert_eq!(menus.get(&alice).current, Menu::Skills);
    assert_eq!(menus.get(&alice).page, 0);

    feed(&mut menus, &mut player, ">");
    assert_eq!(menus.get(&alice).page, 1);
    feed(&mut menus, &mut player, ">");
    assert_eq!(menus.get(&alice).page, 1);
    feed(&mut menus, &mut player, "<");
    assert_eq!(menus.get(&alice).page, 0);

    let progress = feed(&mut menus, &mut player, "banana");
    assert!(!progress.completed);
    assert!(matches!(progress.events[0], BattleEvent::InvalidSelection { .. }));
    assert_eq!(menus.get(&alice).current, Menu::Skills);

    feed(&mut menus, &mut player, "0");
    assert_eq!(menus.get(&alice).current, Menu::Main);

    player.sp = 0;
    feed(&mut menus, &mut player, "2");
    let progress = feed(&mut menus, &mut player, "1");
    assert!(!progress.completed);
    assert!(matches!(progress.events[0], BattleEvent::InsufficientSp { .. }));
    assert_eq!(menus.get(&alice).current, Menu::Main);
}

#[test]
fn wounded_enemy_heals_first() {
    let roster = default_roster();
    let refs = default_reference_tables();
    let policy = EnemyPolicy::new(default_constants().policy);

    let mut actor = summon(&roster, "Jack Frost", None);
    actor.hp = actor.max_hp / 4;
    let opponent = summon(&roster, "Pyro Jack", Some("bob"));

    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(
            policy.decide(&actor, &opponent, &refs, &mut rng),
            Decision::UseMove("Dia".to_string())
        );
    }
}

#[test]
fn one_battle_per_context() {
    let registry = BattleRegistry::shared();
    let guard = registry.try_register("channel-1").unwrap();
    assert!(matches!(
        registry.try_register("channel-1"),
        Err(BattleError::BattleInProgress(_))
    ));
    drop(guard);
    assert!(registry.try_register("channel-1").is_ok());
}
