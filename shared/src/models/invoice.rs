//! Invoice Model
//!
//! `balance` is the outstanding amount; realized revenue for a period is
//! `total - balance` across PAID/PARTIAL invoices.

use serde::{Deserialize, Serialize};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Partial,
    Void,
}

/// Invoice record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i64,
    pub establishment_id: i64,
    pub booking_id: Option<i64>,
    pub number: String,
    /// Issue date (YYYY-MM-DD)
    pub issued_date: String,
    pub total: f64,
    /// Outstanding amount
    pub balance: f64,
    pub status: InvoiceStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub establishment_id: i64,
    pub booking_id: Option<i64>,
    pub number: String,
    pub issued_date: String,
    pub total: f64,
    /// Defaults to `total` (nothing collected yet)
    pub balance: Option<f64>,
    pub status: InvoiceStatus,
}
