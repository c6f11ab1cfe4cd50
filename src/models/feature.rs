use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A trackable unit of work.
///
/// Features are created in the backlog, move between statuses, and are
/// removed permanently on delete. Title and description are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: FeatureStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feature {
    /// Create a backlog feature with a fresh id.
    ///
    /// Returns `None` if the title is blank.
    pub fn new(title: &str, description: Option<&str>) -> Option<Self> {
        let title = normalize_title(title)?;
        let now = Utc::now();
        Some(Self {
            id: Uuid::new_v4(),
            title,
            description: normalize_description(description),
            status: FeatureStatus::Backlog,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_done(&self) -> bool {
        self.status == FeatureStatus::Done
    }
}

/// Where a feature currently lives.
///
/// - `Backlog`: not started yet
/// - `Todo`, `InProgress`, `Done`: the three kanban columns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FeatureStatus {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl FeatureStatus {
    /// Every status, backlog first, in board order.
    pub const ALL: [FeatureStatus; 4] = [Self::Backlog, Self::Todo, Self::InProgress, Self::Done];

    /// The kanban columns, left to right.
    pub const KANBAN: [FeatureStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Wire spelling only. Use [`FromStr`] for the looser CLI spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(Self::Backlog),
            "todo" => Some(Self::Todo),
            "inProgress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Human-facing column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub fn is_kanban(&self) -> bool {
        !matches!(self, Self::Backlog)
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = Self::parse(s) {
            return Ok(status);
        }
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "inprogress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(format!(
                "invalid status '{}' (expected backlog, todo, inProgress or done)",
                s
            )),
        }
    }
}

/// Trim a title, rejecting blank ones.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim a description. Blank descriptions are stored as absent.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Input for creating a new feature. New features always start in the backlog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFeatureInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for updating an existing feature. All fields are optional for partial updates.
///
/// An empty `description` clears it; an absent one leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFeatureInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
}

impl UpdateFeatureInput {
    pub fn status(status: FeatureStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn content(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            status: None,
        }
    }
}
