//! Establishment-scoped service context.
//!
//! Constructed once per request from the authenticated caller and passed
//! explicitly into every service call — never held in ambient state. The
//! context itself only answers questions; services are responsible for
//! turning a negative [`ServiceContext::validate_access`] into a typed
//! access-denied error with audit context.

use shared::models::Role;

/// Who is asking, and which establishment(s) may they touch.
#[derive(Debug, Clone, Copy)]
pub struct ServiceContext {
    user_id: i64,
    role: Role,
    establishment_id: Option<i64>,
}

impl ServiceContext {
    pub fn new(user_id: i64, role: Role, establishment_id: Option<i64>) -> Self {
        Self {
            user_id,
            role,
            establishment_id,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The caller's own establishment, if scoped.
    pub fn establishment_id(&self) -> Option<i64> {
        self.establishment_id
    }

    /// True for global roles (root, super_admin, admin).
    pub fn can_access_all(&self) -> bool {
        self.role.is_global()
    }

    /// The query filter this caller induces: `None` means unrestricted,
    /// `Some(id)` restricts to the caller's establishment.
    pub fn scope(&self) -> Option<i64> {
        if self.can_access_all() {
            None
        } else {
            self.establishment_id
        }
    }

    /// An explicit establishment filter narrowed by the caller's scope.
    /// Scoped callers always see their own establishment regardless of the
    /// requested filter; global callers get the filter as-is.
    pub fn scope_or(&self, explicit: Option<i64>) -> Option<i64> {
        match self.scope() {
            Some(own) => Some(own),
            None => explicit,
        }
    }

    /// Whether the caller may touch a resource belonging to
    /// `resource_establishment_id`. Never errors — callers decide how to
    /// surface a denial.
    pub fn validate_access(&self, resource_establishment_id: i64) -> bool {
        self.can_access_all() || self.establishment_id == Some(resource_establishment_id)
    }
}
