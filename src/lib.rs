//! # Issue Alert Client
//!
//! A Rust client for an alerting/issue-tracking HTTP API.
//!
//! ## Features
//!
//! - Raise alerts with `POST <base_url>/raiseIssue`
//! - List alerts with `GET <base_url>/getIssues`, filtered by status, priority or assignee
//! - Input validation before anything is sent (required fields, priority)
//! - Raw JSON responses, or typed [`RaisedIssue`] / [`IssueList`] envelopes
//! - Configuration from code, a config file section, or the environment
//!
//! ## Example
//!
//! ```rust,no_run
//! use issue_alert_client::{AlertClient, AlertFilter, ClientConfig, NewAlert, Priority};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlertClient::from_config(&ClientConfig::from_env()?)?;
//!
//!     let alert = NewAlert::new("Database Connection Error", "Connection timeout in production")
//!         .with_priority(Priority::High)
//!         .with_assignee("Sarah");
//!
//!     let raised = client.raise_issue(&alert).await?;
//!     println!("Raised issue #{}", raised.issue.id);
//!
//!     let mine = client
//!         .list_issues(&AlertFilter::new().with_assignee("Sarah"))
//!         .await?;
//!     println!("{} issues assigned to Sarah", mine.count);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod types;

pub use client::AlertClient;
pub use config::{ClientConfig, ENV_BASE_URL, ENV_TIMEOUT};
pub use errors::{AlertClientError, Result};
pub use types::{AlertFilter, Issue, IssueList, NewAlert, Priority, RaisedIssue};
