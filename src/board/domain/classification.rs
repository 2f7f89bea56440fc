//! Closed classification sets shared by workspaces and tasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned while parsing a classification value from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseClassificationError {
    /// Which classification was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseClassificationError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Urgency of a task or workspace.
///
/// Stored text is read ignoring case and surrounding whitespace.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns the sort rank, where a higher rank is more urgent.
    ///
    /// The order is `urgent > high > medium > low`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Priority {
    type Error = ParseClassificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseClassificationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseClassificationError::new("priority", value)),
        }
    }
}

/// Lifecycle status of an admin workspace.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WorkspaceStatus {
    /// Work is ongoing.
    #[default]
    Active,
    /// All work is finished.
    Completed,
    /// Work is on hold.
    Paused,
    /// The workspace is retired.
    Archived,
}

impl WorkspaceStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for WorkspaceStatus {
    type Error = ParseClassificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for WorkspaceStatus {
    type Error = ParseClassificationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseClassificationError::new("workspace status", value)),
        }
    }
}

/// Organisational scope an admin workspace belongs to.
///
/// Used for visual grouping and filtering only; it has no bearing on the
/// column or task structure.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SystemLevel {
    /// Platform-wide work. Workspaces without a level are treated as this.
    #[default]
    Platform,
    /// Work concerning a customer company.
    Company,
    /// Work concerning an individual user.
    User,
    /// Internal system maintenance.
    System,
}

impl SystemLevel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Company => "company",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl fmt::Display for SystemLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SystemLevel {
    type Error = ParseClassificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for SystemLevel {
    type Error = ParseClassificationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "platform" => Ok(Self::Platform),
            "company" => Ok(Self::Company),
            "user" => Ok(Self::User),
            "system" => Ok(Self::System),
            _ => Err(ParseClassificationError::new("system level", value)),
        }
    }
}
