//! Initial root account creation.

use tracing::{info, warn};

use shiftdesk_core::config::InitialAdminConfig;
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::user::{CreateUser, User, UserRole};

use crate::directory::UserDirectory;
use crate::password::PasswordHasher;

/// Ensures the configured root account exists.
///
/// Returns the account when it had to be created.
pub async fn bootstrap_initial_admin(
    directory: &dyn UserDirectory,
    hasher: &PasswordHasher,
    config: &InitialAdminConfig,
) -> AppResult<Option<User>> {
    if !config.enabled {
        return Ok(None);
    }

    if directory.find_by_username(&config.username).await?.is_some() {
        info!(username = %config.username, "Initial admin already present");
        return Ok(None);
    }

    let user = directory
        .create(&CreateUser {
            username: config.username.clone(),
            email: config.email.clone(),
            full_name: config.full_name.clone(),
            password_hash: hasher.hash_password(&config.password)?,
            role: UserRole::BlackCore,
        })
        .await?;

    warn!(
        user_id = %user.id,
        username = %user.username,
        "Created initial admin account; change its password"
    );
    Ok(Some(user))
}
