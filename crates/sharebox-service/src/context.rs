//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharebox_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the JWT by middleware and passed into service methods
/// so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The user's email (convenience field from JWT claims).
    pub email: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: String) -> Self {
        Self {
            user_id,
            role,
            email,
        }
    }

    /// Returns whether the current user holds an administrative role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
