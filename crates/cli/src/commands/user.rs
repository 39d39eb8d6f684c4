//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! sd-cli user create -u alice -p 'correct horse battery'
//! sd-cli user set-password -u alice -p 'another long password'
//! ```

use thiserror::Error;

use storedash_admin::db::{RepositoryError, UserRepository};
use storedash_admin::services::{AuthError, AuthService};
use storedash_core::{UserId, Username, UsernameError};

use super::{ConnectError, connect};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("No account named {0}")]
    NotFound(String),
}

/// Create an account.
///
/// # Errors
///
/// Returns `UserError::Auth` if the username is taken or the password is too weak.
pub async fn create(username: &str, password: &str) -> Result<UserId, UserError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool).register(username, password).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Account created");
    Ok(user.id)
}

/// Replace an account's password.
///
/// # Errors
///
/// Returns `UserError::NotFound` if no account has that username.
pub async fn set_password(username: &str, password: &str) -> Result<(), UserError> {
    let pool = connect().await?;
    let username = Username::parse(username)?;

    let (user, _) = UserRepository::new(&pool)
        .get_credentials(&username)
        .await?
        .ok_or_else(|| UserError::NotFound(username.to_string()))?;

    AuthService::new(&pool).set_password(user.id, password).await?;

    tracing::info!(user_id = %user.id, "Password updated");
    Ok(())
}
