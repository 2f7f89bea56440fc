//! Explicit application state for the board screen.
//!
//! All three views read the same filtered collection. It is recomputed only
//! when the workspaces or the filter criteria change, never on view
//! switches.

use super::{
    drag::reorder,
    filter::FilterCriteria,
    views::{CalendarEvent, CalendarFilter, ListSort, ViewMode, calendar_events, sort_workspaces},
};
use crate::board::domain::{Workspace, WorkspaceId};

/// A change to [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Replaces the workspace collection.
    SetWorkspaces(Vec<Workspace>),
    /// Selects the workspace shown on the board. Unknown ids are ignored.
    SelectWorkspace(WorkspaceId),
    /// Switches the active view.
    SelectView(ViewMode),
    /// Replaces the shared filter criteria.
    SetFilter(FilterCriteria),
    /// Replaces the list ordering.
    SetListSort(ListSort),
    /// Replaces the calendar sub-filter.
    SetCalendarFilter(CalendarFilter),
    /// Inserts or replaces one workspace, keeping its place in the order.
    ReplaceWorkspace(Workspace),
    /// Drops a workspace.
    RemoveWorkspace(WorkspaceId),
    /// Moves a workspace within the visible list. Indices refer to the
    /// visible list; hidden workspaces keep their slots.
    ReorderWorkspaces {
        /// Visible index dragged from.
        from: usize,
        /// Visible index dropped at.
        to: usize,
    },
}

/// State of the board screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    workspaces: Vec<Workspace>,
    selected: Option<WorkspaceId>,
    view: ViewMode,
    filter: FilterCriteria,
    list_sort: ListSort,
    calendar_filter: CalendarFilter,
    visible: Vec<usize>,
    #[cfg(test)]
    filter_runs: u64,
}

impl AppState {
    /// Creates an empty state showing the board view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an action.
    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::SetWorkspaces(workspaces) => {
                self.workspaces = workspaces;
                self.refilter();
                self.ensure_selection();
            }
            AppAction::SelectWorkspace(id) => {
                if self.workspace(&id).is_some() {
                    self.selected = Some(id);
                }
            }
            AppAction::SelectView(view) => self.view = view,
            AppAction::SetFilter(filter) => {
                self.filter = filter;
                self.refilter();
            }
            AppAction::SetListSort(sort) => self.list_sort = sort,
            AppAction::SetCalendarFilter(filter) => self.calendar_filter = filter,
            AppAction::ReplaceWorkspace(workspace) => {
                match self.workspace_mut(workspace.id()) {
                    Some(existing) => *existing = workspace,
                    None => self.workspaces.push(workspace),
                }
                self.refilter();
                self.ensure_selection();
            }
            AppAction::RemoveWorkspace(id) => {
                self.workspaces.retain(|workspace| workspace.id() != &id);
                if self.selected.as_ref() == Some(&id) {
                    self.selected = None;
                }
                self.refilter();
                self.ensure_selection();
            }
            AppAction::ReorderWorkspaces { from, to } => self.reorder_visible(from, to),
        }
    }

    /// Returns every workspace in local order.
    #[must_use]
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Finds a workspace.
    #[must_use]
    pub fn workspace(&self, id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|workspace| workspace.id() == id)
    }

    /// Finds a workspace for in-place mutation.
    ///
    /// Changes made through this reference do not refresh the filtered
    /// collection; dispatch [`AppAction::ReplaceWorkspace`] for edits that
    /// can affect filtering.
    pub fn workspace_mut(&mut self, id: &WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces
            .iter_mut()
            .find(|workspace| workspace.id() == id)
    }

    /// Returns the selected workspace id.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&WorkspaceId> {
        self.selected.as_ref()
    }

    /// Returns the selected workspace.
    #[must_use]
    pub fn selected(&self) -> Option<&Workspace> {
        self.selected.as_ref().and_then(|id| self.workspace(id))
    }

    /// Returns the active view.
    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Returns the shared filter criteria.
    #[must_use]
    pub const fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Returns the list ordering.
    #[must_use]
    pub const fn list_sort(&self) -> ListSort {
        self.list_sort
    }

    /// Returns the calendar sub-filter.
    #[must_use]
    pub const fn calendar_filter(&self) -> &CalendarFilter {
        &self.calendar_filter
    }

    /// Returns the workspaces passing the filter, in local order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Workspace> {
        self.visible
            .iter()
            .filter_map(|index| self.workspaces.get(*index))
            .collect()
    }

    #[cfg(test)]
    pub(crate) const fn filter_runs(&self) -> u64 {
        self.filter_runs
    }

    /// Returns the visible workspaces in list-view order.
    #[must_use]
    pub fn list(&self) -> Vec<&Workspace> {
        let mut rows = self.visible();
        sort_workspaces(&mut rows, self.list_sort);
        rows
    }

    /// Returns the calendar events of the visible workspaces.
    #[must_use]
    pub fn calendar(&self) -> Vec<CalendarEvent> {
        calendar_events(&self.visible(), &self.calendar_filter)
    }

    fn refilter(&mut self) {
        self.visible = self
            .workspaces
            .iter()
            .enumerate()
            .filter(|(_, workspace)| self.filter.matches(workspace))
            .map(|(index, _)| index)
            .collect();
        #[cfg(test)]
        {
            self.filter_runs = self.filter_runs.saturating_add(1);
        }
    }

    fn ensure_selection(&mut self) {
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|id| self.workspace(id).is_some());
        if !still_present {
            self.selected = self
                .visible
                .first()
                .and_then(|index| self.workspaces.get(*index))
                .or_else(|| self.workspaces.first())
                .map(|workspace| workspace.id().clone());
        }
    }

    fn reorder_visible(&mut self, from: usize, to: usize) {
        let mut moved = self.visible.clone();
        if !reorder(&mut moved, from, to) {
            tracing::debug!(from, to, "workspace reorder out of range");
            return;
        }
        let mut order: Vec<usize> = (0..self.workspaces.len()).collect();
        for (slot, source) in self.visible.iter().zip(&moved) {
            if let Some(entry) = order.get_mut(*slot) {
                *entry = *source;
            }
        }
        let mut taken: Vec<Option<Workspace>> = std::mem::take(&mut self.workspaces)
            .into_iter()
            .map(Some)
            .collect();
        self.workspaces = order
            .into_iter()
            .filter_map(|source| taken.get_mut(source).and_then(Option::take))
            .collect();
    }
}
