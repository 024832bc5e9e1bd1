//! Payroll Model
//!
//! One payroll record per employee per (year, month) period; the pair is
//! unique at the storage level. Pay item lists are stored as JSON columns
//! and mapped by the repository.

use serde::{Deserialize, Serialize};

/// A single named amount on a payroll (allowance, deduction or bonus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayItem {
    pub label: String,
    pub amount: f64,
}

/// Payroll status
///
/// Transitions: `DRAFT | PENDING -> APPROVED -> PAID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    Draft,
    Pending,
    Approved,
    Paid,
}

impl PayrollStatus {
    /// Whether a payroll may move from `self` to `next`.
    pub fn can_transition_to(&self, next: PayrollStatus) -> bool {
        matches!(
            (self, next),
            (PayrollStatus::Draft | PayrollStatus::Pending, PayrollStatus::Approved)
                | (PayrollStatus::Approved, PayrollStatus::Paid)
        )
    }
}

/// Payroll record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub year: i32,
    pub month: i32,
    pub base_salary: f64,
    #[serde(default)]
    pub allowances: Vec<PayItem>,
    #[serde(default)]
    pub deductions: Vec<PayItem>,
    #[serde(default)]
    pub bonuses: Vec<PayItem>,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    /// base + allowances + bonuses + overtime
    pub gross_total: f64,
    pub deductions_total: f64,
    /// gross - deductions
    pub net_total: f64,
    pub status: PayrollStatus,
    pub paid_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payroll payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCreate {
    pub employee_id: i64,
    pub year: i32,
    /// 1-12
    pub month: i32,
    /// Defaults to the employee's current base salary when omitted
    pub base_salary: Option<f64>,
    #[serde(default)]
    pub allowances: Vec<PayItem>,
    #[serde(default)]
    pub deductions: Vec<PayItem>,
    #[serde(default)]
    pub bonuses: Vec<PayItem>,
    #[serde(default)]
    pub overtime_hours: f64,
    #[serde(default)]
    pub overtime_rate: f64,
}

/// Period aggregate across in-scope payrolls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub year: i32,
    pub month: i32,
    pub count: i64,
    pub total_gross: f64,
    pub total_deductions: f64,
    pub total_net: f64,
    pub average_salary: f64,
}
