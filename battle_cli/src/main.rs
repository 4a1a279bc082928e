//! Terminal harness - fight one demon battle over stdin/stdout
mod args;
mod terminal;

use anyhow::{anyhow, Context, Result};
use args::Args;
use battle_core::config::{
    default_roster, load_constants, load_demon_roster, load_reference_tables, validate_roster,
    DemonRoster,
};
use battle_core::prelude::*;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::sync::Arc;
use terminal::{spawn_stdin_reader, StdoutNarrator, PLAYER_ID};

/// Everything a battle needs that lives outside of it
struct Loaded {
    refs: ReferenceTables,
    constants: BattleConstants,
    roster: DemonRoster,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let loaded = match &args.data_dir {
        Some(dir) => load_from_dir(dir)?,
        None => Loaded {
            refs: default_reference_tables(),
            constants: default_constants(),
            roster: default_roster(),
        },
    };

    if args.list {
        for template in loaded.roster.iter() {
            println!(
                "{} {} Lv{} - {}",
                template.emoji,
                template.name,
                template.level,
                template.abilities.join(", ")
            );
        }
        return Ok(());
    }

    let Loaded {
        refs,
        mut constants,
        roster,
    } = loaded;
    if let Some(secs) = args.timeout_secs {
        constants.turn.timeout_secs = secs;
    }

    let owner = (!args.auto).then(|| ParticipantId::from(PLAYER_ID));
    let player = summon(&roster, &args.player, owner)?;
    let enemy = summon(&roster, &args.enemy, None)?;

    let registry = BattleRegistry::shared();
    let _guard = registry.try_register("terminal")?;

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(
        seed = ?args.seed,
        player = %player.name,
        enemy = %enemy.name,
        "starting battle"
    );

    let (tx, input) = ChannelInput::channel(16);
    if !args.auto {
        spawn_stdin_reader(tx);
    }

    let mut state = BattleState::new(player, enemy);
    let mut driver = TurnDriver::new(Arc::new(refs), Arc::new(constants), rng);
    let outcome = driver.run(&mut state, &input, &StdoutNarrator).await;

    println!(
        "\nBattle over after {} turns. {} wins.",
        outcome.turns,
        state.combatant(outcome.winner).name
    );
    Ok(())
}

fn summon(roster: &DemonRoster, name: &str, owner: Option<ParticipantId>) -> Result<Combatant> {
    let template = roster
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("unknown demon '{}' (known: {})", name, roster.names().join(", ")))?;
    Ok(Combatant::from_template(template, owner))
}

fn load_from_dir(dir: &Path) -> Result<Loaded> {
    let refs = load_reference_tables(dir)
        .with_context(|| format!("loading moves and statuses from {}", dir.display()))?;

    let roster = load_demon_roster(&dir.join("demons.toml"))
        .with_context(|| format!("loading demons from {}", dir.display()))?;
    validate_roster(&roster, &refs.moves)?;

    let constants_path = dir.join("constants.toml");
    let constants = if constants_path.exists() {
        load_constants(&constants_path)?
    } else {
        default_constants()
    };

    Ok(Loaded {
        refs,
        constants,
        roster,
    })
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
