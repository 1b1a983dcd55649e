//! Session-related types.
//!
//! Types stored in the session: the authenticated user, the cart, the
//! notification slot, and the order awaiting its confirmation render.

use serde::{Deserialize, Serialize};

use miga_core::{UserId, UserRole};

use crate::backend::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user. A
/// restored record is trusted as-is; no backend revalidation happens on
/// session restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Whether this user may access the back-office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Session keys for storefront state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the single-slot notification state.
    pub const FLASH: &str = "flash";

    /// Key for the order placed but not yet shown on the confirmation page.
    pub const PENDING_ORDER: &str = "pending_order";
}
