//! Admin account bootstrap command.

use miga_admin::backend::AdminClient;
use miga_admin::config::BackendConfig;
use miga_core::UserRole;

/// Register a user through the backend and promote it to the admin role.
///
/// # Errors
///
/// Returns an error if the backend configuration is invalid, registration
/// fails (e.g. the email is taken), or the role change fails.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = BackendConfig::from_env()?;
    let client = AdminClient::new(&config);

    let user = client.register(name, email, password).await?;
    tracing::info!(id = %user.id, email = %user.email, "User registered");

    let user = client.update_user_role(user.id, UserRole::Admin).await?;
    tracing::info!(id = %user.id, "Promoted to admin");

    Ok(())
}
