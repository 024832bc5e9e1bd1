//! Leave Model
//!
//! A leave belongs to an establishment transitively through its employee.
//! `days` is the inclusive day count between start and end date and is
//! computed by the service, never taken from the caller.

use serde::{Deserialize, Serialize};

/// Leave type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Annual,
    Sick,
    Maternity,
    Paternity,
    Unpaid,
    Other,
}

/// Leave status
///
/// Transitions: `PENDING -> APPROVED | REJECTED | CANCELLED`,
/// `APPROVED -> CANCELLED`. Everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    /// Whether a leave may move from `self` to `next`.
    pub fn can_transition_to(&self, next: LeaveStatus) -> bool {
        matches!(
            (self, next),
            (
                LeaveStatus::Pending,
                LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled
            ) | (LeaveStatus::Approved, LeaveStatus::Cancelled)
        )
    }
}

/// Leave record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Leave {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: LeaveType,
    /// Start date (YYYY-MM-DD), inclusive
    pub start_date: String,
    /// End date (YYYY-MM-DD), inclusive
    pub end_date: String,
    /// Inclusive day count, computed on create
    pub days: i64,
    pub status: LeaveStatus,
    pub reason: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<i64>,
    pub rejection_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create leave payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub employee_id: i64,
    pub leave_type: LeaveType,
    /// Start date (YYYY-MM-DD)
    pub start_date: String,
    /// End date (YYYY-MM-DD)
    pub end_date: String,
    pub reason: Option<String>,
}

/// Annual balance snapshot for one employee and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub employee_id: i64,
    pub year: i32,
    /// Fixed annual allotment (days)
    pub annual_allotment: i64,
    /// Approved annual days used in the year
    pub annual_used: i64,
    /// Remaining annual days
    pub annual_remaining: i64,
    /// Approved sick days used (no cap tracked)
    pub sick_used: i64,
    /// Approved unpaid days used (no cap tracked)
    pub unpaid_used: i64,
}

/// Aggregate counts over a set of leaves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveSummary {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub cancelled: i64,
    /// Total days across approved leaves
    pub approved_days: i64,
}

/// Filters for leave listing/summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveFilter {
    pub employee_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub status: Option<LeaveStatus>,
    pub year: Option<i32>,
}
