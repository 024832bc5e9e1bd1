//! Employee Model
//!
//! Every employee belongs to exactly one establishment; that field is the
//! pivot for all establishment-scope access checks.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employment contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    Permanent,
    FixedTerm,
    Seasonal,
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Terminated,
}

/// Employee record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub establishment_id: i64,
    /// Hire date (YYYY-MM-DD)
    pub hire_date: String,
    pub contract_type: ContractType,
    pub base_salary: f64,
    pub status: EmployeeStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 80))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub position: String,
    #[validate(length(min = 1, max = 80))]
    pub department: String,
    pub establishment_id: i64,
    /// Hire date (YYYY-MM-DD)
    pub hire_date: String,
    pub contract_type: ContractType,
    #[validate(range(min = 0.0))]
    pub base_salary: f64,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    /// Moving an employee re-validates the target establishment against the
    /// caller's scope
    pub establishment_id: Option<i64>,
    pub contract_type: Option<ContractType>,
    #[validate(range(min = 0.0))]
    pub base_salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
}
