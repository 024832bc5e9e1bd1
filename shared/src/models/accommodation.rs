//! Accommodation Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Accommodation record (a bookable unit inside an establishment)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Accommodation {
    pub id: i64,
    pub establishment_id: i64,
    pub name: String,
    /// Free-form unit kind (room, suite, apartment, ...)
    pub kind: String,
    pub capacity: i64,
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create accommodation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccommodationCreate {
    pub establishment_id: i64,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub kind: String,
    #[validate(range(min = 1))]
    pub capacity: i64,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
}

/// Update accommodation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccommodationUpdate {
    pub name: Option<String>,
    pub kind: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
    pub is_active: Option<bool>,
}
