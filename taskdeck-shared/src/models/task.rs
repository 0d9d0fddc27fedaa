use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Default number of tasks requested per dashboard page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Lifecycle state of a task. Serialized exactly as the backend spells it.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter,
)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Wire and display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// All statuses in form order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Parse a label case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Backend identifier. Accepts the document-store `_id` spelling.
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

/// Pagination parameters for `GET /tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    /// Build a query, clamping both values to at least one.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of tasks plus pagination metadata, rebuilt on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for TaskPage {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            page: 1,
            total: 0,
            total_pages: 1,
        }
    }
}

/// Counters shown above the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub total_tasks: u64,
    pub on_page: usize,
    pub total_pages: u32,
}

impl TaskPage {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination controls are hidden for a single page.
    #[must_use]
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// `Page N of M`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }

    #[must_use]
    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total_tasks: self.total,
            on_page: self.tasks.len(),
            total_pages: self.total_pages,
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }
}
