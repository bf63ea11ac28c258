/// Authentication utilities
///
/// # Modules
///
/// - [`jwt`]: JWT token generation and validation
///
/// The HTTP layer turns a validated token into an [`AuthContext`] and uses
/// [`AuthContext::can_access_user`] to guard per-user resources.

pub mod jwt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application-level role carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Registered,
    Admin,
}

/// Identity of the caller, inserted into request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthContext {
    pub fn from_claims(claims: &jwt::Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }

    /// Admins may act on any user; everyone else only on themselves
    pub fn can_access_user(&self, user_id: Uuid) -> bool {
        self.role == UserRole::Admin || self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_access_user() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        let registered = AuthContext {
            user_id: me,
            role: UserRole::Registered,
        };
        assert!(registered.can_access_user(me));
        assert!(!registered.can_access_user(other));

        let admin = AuthContext {
            user_id: me,
            role: UserRole::Admin,
        };
        assert!(admin.can_access_user(other));
    }
}
