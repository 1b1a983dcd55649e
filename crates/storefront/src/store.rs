//! Session-backed stores for the cart and the notification slot.
//!
//! The helpers here are the only write path for both stores. Handlers
//! mutate through them and read back through them, so every cart mutation
//! pairs with exactly one notification and the lazy expiry transition of
//! the notifier is persisted back to the session.

use chrono::Utc;
use tower_sessions::Session;

use miga_core::{Cart, Notification, Notifier, Severity};

use crate::error::Result;
use crate::models::session_keys;

/// Load the cart from the session, or an empty one.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Issue a notification, superseding any current one.
///
/// Returns the token of the new notification.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn notify(
    session: &Session,
    message: impl Into<String>,
    severity: Severity,
) -> Result<u64> {
    let mut notifier = load_notifier(session).await?;
    let token = notifier.notify(message, severity, Utc::now());
    session.insert(session_keys::FLASH, &notifier).await?;
    Ok(token)
}

/// The currently visible notification, if any.
///
/// Reading also persists the expiry transition, so a lapsed notification
/// stays gone on subsequent renders.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn current_notification(session: &Session) -> Result<Option<Notification>> {
    let mut notifier = load_notifier(session).await?;
    let current = notifier.current(Utc::now()).cloned();
    session.insert(session_keys::FLASH, &notifier).await?;
    Ok(current)
}

async fn load_notifier(session: &Session) -> Result<Notifier> {
    Ok(session
        .get::<Notifier>(session_keys::FLASH)
        .await?
        .unwrap_or_default())
}
