//! Domain model for the admin workspace task board.
//!
//! Storage hands the board loosely shaped records ([`StoredTask`],
//! [`StoredWorkspace`]). They are normalized once on ingress into the
//! canonical [`Task`] and [`Workspace`] aggregates, so the projection,
//! filtering, and view services only ever see canonical values.

mod classification;
mod column;
mod error;
mod ids;
mod patch;
mod stored;
mod task;
mod timestamp;
mod workspace;

pub use classification::{ParseClassificationError, Priority, SystemLevel, WorkspaceStatus};
pub use column::{BoardColumn, ColumnLayout, ColumnSource, default_columns, resolve_column};
pub use error::BoardDomainError;
pub use ids::{ColumnId, CommentId, TaskId, WorkspaceId};
pub use patch::{NewTask, TaskPatch, WorkspacePatch};
pub use stored::{StoredComment, StoredTask, StoredWorkspace};
pub use task::{Task, TaskComment, TaskPlacement};
pub use timestamp::{RawTimestamp, TimestampSource, normalize_optional, normalize_required};
pub use workspace::Workspace;
