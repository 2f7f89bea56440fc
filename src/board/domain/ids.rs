//! Identifier newtypes for the board domain.
//!
//! Workspace, task, and column identifiers are opaque strings assigned by
//! storage (or, for columns, by the workspace layout). They are wrapped so the
//! three kinds cannot be mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Storage-assigned identifier of an admin workspace.
    WorkspaceId
}

string_id! {
    /// Storage-assigned identifier of a task, stable for the task's lifetime.
    TaskId
}

string_id! {
    /// Identifier of a board column, such as `todo` or `in-progress`.
    ///
    /// Task status values share this namespace: a task's status mirrors the
    /// id of the column holding it.
    ColumnId
}

impl ColumnId {
    /// Identifier of the default backlog column.
    pub const BACKLOG: &'static str = "backlog";

    /// Returns the backlog column identifier.
    #[must_use]
    pub fn backlog() -> Self {
        Self::new(Self::BACKLOG)
    }
}

string_id! {
    /// Identifier of a comment attached to a task.
    CommentId
}

impl CommentId {
    /// Creates a random comment identifier.
    ///
    /// Comments are appended through a task update, so their identity is
    /// minted locally rather than by storage.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
