use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::{AlertClientError, Result};

/// Alert priority levels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Parses a priority case-insensitively, so `"HIGH"` yields [`Priority::High`]
impl FromStr for Priority {
    type Err = AlertClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(AlertClientError::InvalidPriority(s.to_string())),
        }
    }
}

/// Alert to be raised on the API
///
/// Serializes to `{title, description, priority, assignedTo}`. The server
/// owns the alert's identity and status; nothing is tracked client-side.
///
/// # Example
///
/// ```rust
/// use issue_alert_client::{NewAlert, Priority};
///
/// let alert = NewAlert::new("Database Connection Error", "Connection timeout in production")
///     .with_priority(Priority::High)
///     .with_assignee("Sarah");
///
/// assert!(alert.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Sent as `null` when unassigned
    pub assigned_to: Option<String>,
}

impl NewAlert {
    /// Create a medium-priority, unassigned alert
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            assigned_to: None,
        }
    }

    /// Build a validated alert from loosely typed input
    ///
    /// A missing `priority` means medium. The priority text is matched
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title or description is empty, or
    /// if the priority is not one of low, medium, high.
    pub fn from_parts(
        title: &str,
        description: &str,
        priority: Option<&str>,
        assigned_to: Option<&str>,
    ) -> Result<Self> {
        let alert = Self {
            title: title.to_string(),
            description: description.to_string(),
            priority: priority.map(str::parse::<Priority>).transpose()?.unwrap_or_default(),
            assigned_to: assigned_to.map(str::to_string),
        };
        alert.validate()?;
        Ok(alert)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    /// Check that the required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(AlertClientError::MissingField("title"));
        }
        if self.description.is_empty() {
            return Err(AlertClientError::MissingField("description"));
        }
        Ok(())
    }
}

/// Filters narrowing an alert listing
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
}

impl AlertFilter {
    /// Filter that matches every alert
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Priority is passed through as given; the server decides how to match it
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    /// Query parameters for the set, non-empty filters
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("status", &self.status),
            ("priority", &self.priority),
            ("assignedTo", &self.assigned_to),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Alert as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Kept as text: the server owns this vocabulary
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response to a successful `raiseIssue` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaisedIssue {
    pub message: String,
    pub issue: Issue,
}

/// Response to a `getIssues` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueList {
    pub count: usize,
    pub issues: Vec<Issue>,
}
