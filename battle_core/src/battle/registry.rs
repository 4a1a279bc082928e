//! Registration point for battles in progress, one per conversation context

use crate::error::{BattleError, Result};
use dashmap::DashSet;
use std::sync::Arc;

/// Contexts (channels, rooms) that currently host a battle
#[derive(Debug, Default)]
pub struct BattleRegistry {
    active: DashSet<String>,
}

impl BattleRegistry {
    pub fn new() -> Self {
        BattleRegistry {
            active: DashSet::new(),
        }
    }

    /// Registry ready to hand out guards
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Claim a context for a new battle
    ///
    /// The claim is released when the returned guard is dropped.
    pub fn try_register(self: &Arc<Self>, context: &str) -> Result<BattleGuard> {
        if !self.active.insert(context.to_string()) {
            return Err(BattleError::BattleInProgress(context.to_string()));
        }
        tracing::debug!(context, "battle registered");
        Ok(BattleGuard {
            registry: Arc::clone(self),
            context: context.to_string(),
        })
    }

    pub fn is_active(&self, context: &str) -> bool {
        self.active.contains(context)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Held for the lifetime of a battle
#[derive(Debug)]
pub struct BattleGuard {
    registry: Arc<BattleRegistry>,
    context: String,
}

impl BattleGuard {
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl Drop for BattleGuard {
    fn drop(&mut self) {
        self.registry.active.remove(&self.context);
        tracing::debug!(context = %self.context, "battle released");
    }
}
