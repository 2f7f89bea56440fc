//! Application services for the task board: projection, drag handling,
//! filtering, view derivation, and the session tying them to the façade.

mod drag;
mod filter;
mod projection;
mod session;
mod state;
mod stats;
mod views;

pub use drag::{
    DragKind, DragLocation, DragOutcome, DragReorderController, DragStart, DragState, DropResult,
    PendingTaskUpdate, PersistReport, reorder,
};
pub use filter::{FilterCriteria, filter, filter_refs};
pub use projection::{BoardProjection, BoardProjector, ProjectedColumn, project};
pub use session::{BoardSession, BoardSessionError, BoardSessionResult, SettleOutcome};
pub use state::{AppAction, AppState};
pub use stats::WorkspaceStats;
pub use views::{
    CalendarEvent, CalendarEventKind, CalendarFilter, ListSort, ListSortKey, SortDirection,
    ViewMode, calendar_events, sort_workspaces,
};
