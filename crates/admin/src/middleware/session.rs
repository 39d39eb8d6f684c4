//! Session middleware configuration for the dashboard.
//!
//! `PostgreSQL`-backed sessions using tower-sessions (signed cookie,
//! SameSite=Strict, seven-day inactivity expiry), plus one-shot flash
//! messages.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::DashboardConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "storedash_session";

/// Session expiry time in seconds (7 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (should never happen
/// with hardcoded "dashboard" and "session" values), or if the session
/// secret is shorter than a signing key. `DashboardConfig::from_env`
/// rejects such secrets.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &DashboardConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    // The session table is created by the dashboard schema migration.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("dashboard")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");
    let key = signing_key(&config.session_secret).expect("session secret of at least 64 bytes");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

/// Cookie signing key from the first 64 bytes of the secret.
fn signing_key(secret: &SecretString) -> Option<Key> {
    Key::try_from(secret.expose_secret().as_bytes()).ok()
}

/// Queue a message for the next page render.
pub async fn set_flash(session: &Session, message: impl Into<String>) {
    if let Err(e) = session.insert(session_keys::FLASH, message.into()).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

/// Take the queued message, if any.
pub async fn take_flash(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_needs_64_bytes() {
        assert!(signing_key(&SecretString::from("k".repeat(63))).is_none());
        assert!(signing_key(&SecretString::from("k".repeat(64))).is_some());
    }

    #[test]
    fn test_signing_key_is_deterministic() {
        let secret = SecretString::from("0123456789abcdef".repeat(4));
        let a = signing_key(&secret).map(|key| key.signing().to_vec());
        let b = signing_key(&secret).map(|key| key.signing().to_vec());
        assert_eq!(a, b);
    }
}
