//! Session-related types.

use serde::{Deserialize, Serialize};

use miga_core::UserId;

use crate::backend::User;

/// Session-stored admin identity.
///
/// Only users whose backend role is `admin` ever reach the session; the
/// role check happens at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for CurrentAdmin {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Session keys for admin state.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the dashboard's monthly sales goal (whole pesos).
    pub const SALES_GOAL: &str = "sales_goal";
}
