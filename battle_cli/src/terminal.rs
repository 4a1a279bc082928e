//! Stdin input and stdout narration

use battle_core::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Participant id of the person at the keyboard
pub const PLAYER_ID: &str = "you";

/// Prints each narration line as it happens
pub struct StdoutNarrator;

impl Narrator for StdoutNarrator {
    fn narrate(&self, event: &BattleEvent) {
        match event {
            BattleEvent::Prompt { text } => println!("\n{}", text),
            BattleEvent::Affinity {
                affinity: Affinity::Neutral,
                ..
            } => {}
            other => println!("{}", other),
        }
    }
}

/// Forward every stdin line to the battle as the player's choice
pub fn spawn_stdin_reader(tx: mpsc::Sender<PlayerInput>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let choice = line.trim();
                    if choice.is_empty() {
                        continue;
                    }
                    if tx.send(PlayerInput::new(PLAYER_ID, choice)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "stdin closed");
                    break;
                }
            }
        }
    });
}
