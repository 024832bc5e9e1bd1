//! Caller roles
//!
//! Roles split into two tiers: global roles may touch every establishment,
//! scoped roles are restricted to the single establishment carried in their
//! token claims.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller role as carried in JWT claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Root,
    SuperAdmin,
    Admin,
    Manager,
    Staff,
}

impl Role {
    /// Global roles can access every establishment
    pub fn is_global(&self) -> bool {
        matches!(self, Role::Root | Role::SuperAdmin | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized role strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRole(pub String);

impl fmt::Display for InvalidRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for InvalidRole {}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(Role::Root),
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
