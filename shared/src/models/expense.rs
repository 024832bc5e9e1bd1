//! Expense Model

use serde::{Deserialize, Serialize};

/// Expense approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

/// Expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    pub establishment_id: i64,
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
    /// Expense date (YYYY-MM-DD)
    pub expense_date: String,
    pub status: ExpenseStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub establishment_id: i64,
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
    pub expense_date: String,
    #[serde(default = "default_expense_status")]
    pub status: ExpenseStatus,
}

fn default_expense_status() -> ExpenseStatus {
    ExpenseStatus::Pending
}
