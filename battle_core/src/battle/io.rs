//! Input and output collaborators of the turn driver

use crate::event::BattleEvent;
use crate::types::ParticipantId;
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::{mpsc, Mutex as AsyncMutex};

/// One normalized choice from a human participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInput {
    pub actor: ParticipantId,
    pub choice: String,
}

impl PlayerInput {
    pub fn new(actor: impl Into<ParticipantId>, choice: impl Into<String>) -> Self {
        PlayerInput {
            actor: actor.into(),
            choice: choice.into(),
        }
    }
}

/// Source of human choices
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Wait for the next input addressed to the battle
    ///
    /// `None` means the source is closed; the driver then waits out the
    /// deadline as if nobody answered.
    async fn next_input(&self, participant: &ParticipantId) -> Option<PlayerInput>;
}

/// Sink for ordered narration
pub trait Narrator: Send + Sync {
    fn narrate(&self, event: &BattleEvent);

    fn narrate_all(&self, events: &[BattleEvent]) {
        for event in events {
            self.narrate(event);
        }
    }
}

/// Input provider fed through a channel by the transport layer
pub struct ChannelInput {
    rx: AsyncMutex<mpsc::Receiver<PlayerInput>>,
}

impl ChannelInput {
    pub fn new(rx: mpsc::Receiver<PlayerInput>) -> Self {
        ChannelInput {
            rx: AsyncMutex::new(rx),
        }
    }

    /// Provider plus the sender that feeds it
    pub fn channel(buffer: usize) -> (mpsc::Sender<PlayerInput>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl InputProvider for ChannelInput {
    async fn next_input(&self, _participant: &ParticipantId) -> Option<PlayerInput> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}

/// Narrator that keeps every event, for tests and replays
#[derive(Debug, Default)]
pub struct CollectingNarrator {
    events: Mutex<Vec<BattleEvent>>,
}

impl CollectingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything narrated so far
    pub fn events(&self) -> Vec<BattleEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Narrator for CollectingNarrator {
    fn narrate(&self, event: &BattleEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_input_delivers_in_order() {
        let (tx, input) = ChannelInput::channel(4);
        tx.send(PlayerInput::new("alice", "2")).await.unwrap();
        tx.send(PlayerInput::new("alice", "1")).await.unwrap();
        drop(tx);

        let alice = ParticipantId::from("alice");
        assert_eq!(input.next_input(&alice).await.unwrap().choice, "2");
        assert_eq!(input.next_input(&alice).await.unwrap().choice, "1");
        assert!(input.next_input(&alice).await.is_none());
    }

    #[test]
    fn test_collecting_narrator() {
        let narrator = CollectingNarrator::new();
        narrator.narrate_all(&[BattleEvent::Critical, BattleEvent::Critical]);
        assert_eq!(narrator.events().len(), 2);
    }
}
