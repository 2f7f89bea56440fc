//! Runtime configuration for board sessions.

use crate::board::domain::ColumnId;
use serde::{Deserialize, Serialize};

/// What a session does when persisting an optimistic task move fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Re-fetch the workspace from storage and replace the local copy.
    #[default]
    Refresh,
    /// Put the task back where it was, unless it has been moved again since.
    Rollback,
    /// Log the failure and keep the optimistic state until the next explicit
    /// refresh.
    KeepLocal,
}

/// Configuration for a board session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Reaction to a rejected task move.
    pub reconcile_policy: ReconcilePolicy,
    /// Column receiving tasks whose column and status match none of the
    /// default template's columns.
    pub fallback_column: ColumnId,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            reconcile_policy: ReconcilePolicy::default(),
            fallback_column: ColumnId::backlog(),
        }
    }
}

impl BoardConfig {
    /// Keeps optimistic state on failure and never re-fetches on its own.
    ///
    /// Favours responsiveness; local state may drift until the next refresh.
    #[must_use]
    pub fn optimistic() -> Self {
        Self {
            reconcile_policy: ReconcilePolicy::KeepLocal,
            ..Self::default()
        }
    }

    /// Undoes rejected moves locally without a round-trip.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reconcile_policy: ReconcilePolicy::Rollback,
            ..Self::default()
        }
    }

    /// Overrides the reconcile policy.
    #[must_use]
    pub const fn with_reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile_policy = policy;
        self
    }
}
