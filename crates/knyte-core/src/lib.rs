pub mod activity;
pub mod age;
pub mod dashboard;
pub mod diff;
pub mod seed;
pub mod services;

pub use activity::{ActivityFilter, ALL_EMPLOYEES};
pub use age::{relative_age, RelativeAge};
pub use dashboard::{DashboardState, Decision, Tab};
pub use diff::{classify_diff_line, diff_lines, ApprovalView, DiffLine, DiffLineKind};
pub use services::{Acknowledgment, LogService, ProvisioningService, ServiceError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub role: String,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub current_task: String,
    #[serde(default)]
    pub task_duration: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub vm_instance: String,
    #[serde(default)]
    pub has_gpu: bool,
    #[serde(default)]
    pub has_approval_pending: bool,
}

/// Agent status as reported by the fleet. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmployeeStatus {
    Active,
    Working,
    Idle,
    Other(String),
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Working => "working",
            EmployeeStatus::Idle => "idle",
            EmployeeStatus::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let status = match input.trim().to_lowercase().as_str() {
            "active" => EmployeeStatus::Active,
            "working" => EmployeeStatus::Working,
            "idle" => EmployeeStatus::Idle,
            _ => EmployeeStatus::Other(input.trim().to_string()),
        };
        Ok(status)
    }
}

impl From<String> for EmployeeStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<EmployeeStatus> for String {
    fn from(value: EmployeeStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    /// Name of the employee the entry is attributed to.
    pub employee: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    File,
    Git,
    Command,
    Test,
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::File => "file",
            ActivityKind::Git => "git",
            ActivityKind::Command => "command",
            ActivityKind::Test => "test",
            ActivityKind::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ActivityKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "file" => ActivityKind::File,
            "git" => ActivityKind::Git,
            "command" => ActivityKind::Command,
            "test" => ActivityKind::Test,
            _ => ActivityKind::Other(value.trim().to_string()),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(value: ActivityKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub employee: String,
    pub description: String,
    pub requested: String,
    pub impact: Impact,
    #[serde(default)]
    pub diff: Option<DiffSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub file: String,
    pub additions: u32,
    pub deletions: u32,
    /// Unified diff text, displayed verbatim.
    pub content: String,
}
