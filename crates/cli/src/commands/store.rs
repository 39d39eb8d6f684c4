//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! sd-cli store create -u alice -n "Maple Jerseys"
//! ```

use storedash_admin::db::StoreRepository;
use storedash_admin::db::UserRepository;
use storedash_admin::models::input::StoreInput;
use storedash_core::{StoreId, Username};

use super::connect;
use super::user::UserError;

/// Create a store owned by `username`.
///
/// # Errors
///
/// Returns `UserError::NotFound` if no account has that username.
pub async fn create(username: &str, name: &str) -> Result<StoreId, Box<dyn std::error::Error>> {
    let name = StoreInput {
        name: Some(name.to_owned()),
    }
    .validate()?;

    let pool = connect().await?;
    let username = Username::parse(username)?;

    let (user, _) = UserRepository::new(&pool)
        .get_credentials(&username)
        .await?
        .ok_or_else(|| UserError::NotFound(username.to_string()))?;

    let store = StoreRepository::new(&pool).create(user.id, &name).await?;

    tracing::info!(store_id = %store.id, name = %store.name, "Store created");
    Ok(store.id)
}
