use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

/// Expense lifecycle states as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Draft,
    Submitted,
    Pending,
    PendingApproval,
    Approved,
    Rejected,
    Paid,
    #[serde(untagged)]
    Other(String),
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExpenseStatus::Draft => "draft",
            ExpenseStatus::Submitted => "submitted",
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::PendingApproval => "pending_approval",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
            ExpenseStatus::Paid => "paid",
            ExpenseStatus::Other(raw) => raw,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ExpenseStatus::Approved => "bg-success",
            ExpenseStatus::Rejected => "bg-danger",
            ExpenseStatus::Pending | ExpenseStatus::PendingApproval => "bg-warning",
            ExpenseStatus::Paid => "bg-info",
            ExpenseStatus::Submitted => "bg-primary",
            ExpenseStatus::Draft | ExpenseStatus::Other(_) => "bg-secondary",
        }
    }
}

impl From<&str> for ExpenseStatus {
    fn from(raw: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(raw.to_string()))
            .unwrap_or_else(|_| ExpenseStatus::Other(raw.to_string()))
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an expense's approval workflow. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub approver: String,
    #[serde(default)]
    pub approver_role: Option<String>,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub approved_at: Option<String>,
}

/// Expense projection returned by `GET /api/expenses/{id}`. Rendered once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseView {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub amount_in_company_currency: Option<f64>,
    pub expense_date: String,
    pub category: String,
    pub employee: String,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub approvals: Vec<ApprovalStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    pub rate: f64,
}

/// Body of a failed response. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// What happened to a user-triggered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// The user refused the confirmation prompt; nothing was sent.
    Declined,
    /// Placeholder action: acknowledged, no network behavior defined.
    Deferred,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }
}
