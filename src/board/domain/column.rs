//! Board columns and the column resolution policy.

use super::{ColumnId, Task};
use serde::{Deserialize, Serialize};

/// A named, ordered, coloured partition of a workspace's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    id: ColumnId,
    title: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    position: u32,
}

impl BoardColumn {
    /// Creates a column.
    #[must_use]
    pub fn new(
        id: impl Into<ColumnId>,
        title: impl Into<String>,
        color: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            position,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the column's rank on the board.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }
}

/// The fixed six-column template used when a workspace has no explicit
/// layout, in board order.
#[must_use]
pub fn default_columns() -> Vec<BoardColumn> {
    vec![
        BoardColumn::new(ColumnId::BACKLOG, "Backlog", "#f3f4f6", 0),
        BoardColumn::new("todo", "To do", "#fef3c7", 1),
        BoardColumn::new("in-progress", "In progress", "#dbeafe", 2),
        BoardColumn::new("review", "Review", "#fed7d7", 3),
        BoardColumn::new("testing", "Testing", "#e6fffa", 4),
        BoardColumn::new("done", "Done", "#d1fae5", 5),
    ]
}

/// Where a board's column set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// The workspace persisted its own columns. They are authoritative:
    /// tasks that match none of them are left off the board.
    Explicit,
    /// The default template was synthesized; unmatched tasks fall back to a
    /// catch-all column.
    DefaultTemplate,
}

/// The ordered column set a board is projected onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    source: ColumnSource,
    columns: Vec<BoardColumn>,
}

impl ColumnLayout {
    /// Chooses the layout for a workspace's stored columns.
    ///
    /// A non-empty explicit list is used verbatim, in the order given.
    /// Otherwise the default template applies.
    #[must_use]
    pub fn for_columns(explicit: &[BoardColumn]) -> Self {
        if explicit.is_empty() {
            Self {
                source: ColumnSource::DefaultTemplate,
                columns: default_columns(),
            }
        } else {
            Self {
                source: ColumnSource::Explicit,
                columns: explicit.to_vec(),
            }
        }
    }

    /// Returns where the column set came from.
    #[must_use]
    pub const fn source(&self) -> ColumnSource {
        self.source
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Finds a column by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id().as_str() == id)
    }

    /// Consumes the layout, returning its columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<BoardColumn> {
        self.columns
    }
}

/// Resolves which column of `layout` a task belongs to.
///
/// Candidates are tried in order:
///
/// 1. the task's `column_id`;
/// 2. the task's `status`;
/// 3. `fallback`, only when the layout is the default template, or the
///    backlog when `fallback` names no column of the template.
///
/// Returns `None` when no candidate names a column of the layout.
#[must_use]
pub fn resolve_column<'a>(
    layout: &'a ColumnLayout,
    task: &Task,
    fallback: &ColumnId,
) -> Option<&'a BoardColumn> {
    layout
        .get(task.column_id().as_str())
        .or_else(|| layout.get(task.status().as_str()))
        .or_else(|| match layout.source() {
            ColumnSource::DefaultTemplate => layout
                .get(fallback.as_str())
                .or_else(|| layout.get(ColumnId::backlog().as_str())),
            ColumnSource::Explicit => None,
        })
}
