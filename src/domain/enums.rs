use serde::{Deserialize, Serialize};

/// Recurrence bucket of a task; decides which logs count toward its spent time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Daily,
    Weekly,
    /// No deadline. Older documents call this LONG_TERM or UNLIMITED.
    #[serde(alias = "LONG_TERM", alias = "UNLIMITED")]
    Other,
}

impl Category {
    /// Display name used for bucket headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Other => "Long Term",
        }
    }

    /// Buckets in display order
    pub fn all() -> &'static [Category] {
        &[Category::Daily, Category::Weekly, Category::Other]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Revising, // Adjusting minutes of a stopped session before commit
}
