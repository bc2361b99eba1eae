//! Caller identity forwarded by the authenticating proxy.
//!
//! Token validation happens upstream; this service trusts the `x-user-id` and
//! `x-user-roles` headers it receives.

mod extractor;

pub use extractor::{AdminUser, AuthUser, ROLES_HEADER, USER_ID_HEADER};
