//! Authentication and establishment scoping.
//!
//! Token issuance happens upstream; this module validates bearer tokens,
//! derives the [`CurrentUser`], and builds the [`ServiceContext`] that every
//! service call consults for establishment-scope decisions.

mod context;
mod extractor;
mod jwt;
mod middleware;

pub use context::ServiceContext;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_manager};
