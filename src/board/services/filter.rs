//! Workspace filtering shared by every board view.

use crate::board::domain::{Priority, SystemLevel, Workspace, WorkspaceStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Criteria narrowing the workspace collection.
///
/// Each criterion left empty places no constraint. A workspace passes when it
/// satisfies every non-empty criterion; within `tags` one shared tag is
/// enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the title or description.
    pub search_term: String,
    /// Tags of which at least one must be present.
    pub tags: BTreeSet<String>,
    /// Accepted workspace statuses.
    pub statuses: BTreeSet<WorkspaceStatus>,
    /// Accepted priorities.
    pub priorities: BTreeSet<Priority>,
    /// Accepted system levels; an unset level counts as platform.
    pub system_levels: BTreeSet<SystemLevel>,
}

impl FilterCriteria {
    /// Criteria accepting every workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Adds an accepted tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds an accepted status.
    #[must_use]
    pub fn with_status(mut self, status: WorkspaceStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Adds an accepted priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    /// Adds an accepted system level.
    #[must_use]
    pub fn with_system_level(mut self, level: SystemLevel) -> Self {
        self.system_levels.insert(level);
        self
    }

    /// Returns `true` when no criterion constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.tags.is_empty()
            && self.statuses.is_empty()
            && self.priorities.is_empty()
            && self.system_levels.is_empty()
    }

    /// Returns `true` when `workspace` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, workspace: &Workspace) -> bool {
        self.matches_search(workspace)
            && (self.tags.is_empty() || !self.tags.is_disjoint(workspace.tags()))
            && (self.statuses.is_empty() || self.statuses.contains(&workspace.status()))
            && (self.priorities.is_empty() || self.priorities.contains(&workspace.priority()))
            && (self.system_levels.is_empty()
                || self
                    .system_levels
                    .contains(&workspace.effective_system_level()))
    }

    fn matches_search(&self, workspace: &Workspace) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        workspace.title().to_lowercase().contains(&needle)
            || workspace.description().to_lowercase().contains(&needle)
    }
}

/// Returns the workspaces passing `criteria`, in input order.
#[must_use]
pub fn filter(workspaces: &[Workspace], criteria: &FilterCriteria) -> Vec<Workspace> {
    workspaces
        .iter()
        .filter(|workspace| criteria.matches(workspace))
        .cloned()
        .collect()
}

/// Borrowing variant of [`filter`].
#[must_use]
pub fn filter_refs<'a>(workspaces: &'a [Workspace], criteria: &FilterCriteria) -> Vec<&'a Workspace> {
    workspaces
        .iter()
        .filter(|workspace| criteria.matches(workspace))
        .collect()
}
