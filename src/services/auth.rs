//! Authorization capability
//!
//! The authentication middleware (external to this crate) verifies the caller
//! and constructs an [`AuthContext`] from the token claims. Lifecycle
//! operations receive the context explicitly; there is no ambient role state.

use crate::models::user::UserRole;
use crate::utils::errors::{GatherlyError, Result};

/// Authenticated identity passed into guarded operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: i64) -> Self {
        Self::new(user_id, UserRole::User)
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Require the admin role
    pub fn ensure_admin(&self, action: &str) -> Result<()> {
        if self.is_admin() {
            return Ok(());
        }

        Err(GatherlyError::PermissionDenied(format!(
            "User {} lacks the admin role required to {}",
            self.user_id, action
        )))
    }

    /// Require the caller to be the owning user or an admin
    pub fn ensure_self_or_admin(&self, owner_id: i64, action: &str) -> Result<()> {
        if self.user_id == owner_id || self.is_admin() {
            return Ok(());
        }

        Err(GatherlyError::PermissionDenied(format!(
            "User {} may not {} on behalf of user {}",
            self.user_id, action, owner_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_checks() {
        let admin = AuthContext::admin(1);
        assert!(admin.is_admin());
        assert!(admin.ensure_admin("list registrations").is_ok());

        let user = AuthContext::user(2);
        assert!(!user.is_admin());
        assert!(user.ensure_admin("list registrations").is_err());
    }

    #[test]
    fn test_self_or_admin() {
        let owner = AuthContext::user(5);
        assert!(owner.ensure_self_or_admin(5, "cancel registration").is_ok());
        assert!(owner.ensure_self_or_admin(6, "cancel registration").is_err());

        let admin = AuthContext::admin(1);
        assert!(admin.ensure_self_or_admin(6, "cancel registration").is_ok());
    }
}
