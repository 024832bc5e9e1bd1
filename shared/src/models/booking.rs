//! Booking Model
//!
//! Stay dates are half-open: `[check_in, check_out)` — a booking from
//! 2025-03-01 to 2025-03-03 consumes two accommodation-nights.

use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// Booking record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub establishment_id: i64,
    pub accommodation_id: i64,
    pub guest_name: String,
    /// Check-in date (YYYY-MM-DD), inclusive
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), exclusive
    pub check_out: String,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub establishment_id: i64,
    pub accommodation_id: i64,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub total_amount: f64,
}
