//! Establishment Model
//!
//! An establishment is the tenant unit: a single hotel property owning
//! accommodations, employees and bookings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the establishment prices its accommodations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    PerNight,
    PerPerson,
}

impl Default for PricingMode {
    fn default() -> Self {
        Self::PerNight
    }
}

/// Establishment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Establishment {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub pricing_mode: PricingMode,
    /// Managing employee reference
    pub manager_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create establishment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstablishmentCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 80))]
    pub city: String,
    #[validate(length(min = 1, max = 200))]
    pub address: String,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub pricing_mode: PricingMode,
    pub manager_id: Option<i64>,
}

/// Update establishment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EstablishmentUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub pricing_mode: Option<PricingMode>,
    pub manager_id: Option<i64>,
    pub is_active: Option<bool>,
}
