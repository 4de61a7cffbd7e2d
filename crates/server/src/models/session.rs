//! Authentication state stored in the session.
//!
//! The OAuth flow leaves two pieces of per-user state behind: the PKCE
//! verifier between login and callback, and the access token after a
//! successful exchange. Both live in the `PostgreSQL`-backed session, never
//! in the browser. [`AuthSession`] is the only way handlers touch either
//! key, so the lifecycle rules hold everywhere:
//!
//! - the verifier is single-use: [`AuthSession::take_verifier`] removes it
//!   before any exchange attempt, so a replayed callback finds nothing;
//! - saving a token clears any stale verifier;
//! - [`AuthSession::clear`] wipes both keys.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

/// Session keys for authentication data.
pub mod keys {
    /// Key for the pending PKCE code verifier (login → callback).
    pub const PKCE_CODE_VERIFIER: &str = "pkce_code_verifier";

    /// Key for the Mercado Livre access token.
    pub const MELI_ACCESS_TOKEN: &str = "meli_access_token";
}

/// Typed wrapper over the raw session for authentication state.
pub struct AuthSession {
    session: Session,
}

impl AuthSession {
    /// Wrap a request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Store the PKCE verifier for the in-flight login attempt.
    ///
    /// Overwrites any previous verifier: starting a new login abandons the
    /// old attempt.
    ///
    /// # Errors
    ///
    /// Returns a session store error if the write fails.
    pub async fn store_verifier(&self, verifier: &str) -> Result<(), SessionError> {
        self.session
            .insert(keys::PKCE_CODE_VERIFIER, verifier)
            .await
    }

    /// Remove and return the stored PKCE verifier.
    ///
    /// Removal happens before the token exchange, so each verifier backs at
    /// most one exchange attempt.
    ///
    /// # Errors
    ///
    /// Returns a session store error if the read fails.
    pub async fn take_verifier(&self) -> Result<Option<String>, SessionError> {
        self.session.remove::<String>(keys::PKCE_CODE_VERIFIER).await
    }

    /// Save the access token after a successful exchange.
    ///
    /// # Errors
    ///
    /// Returns a session store error if the write fails.
    pub async fn save_token(&self, access_token: &str) -> Result<(), SessionError> {
        // A verifier surviving past the exchange is stale
        self.session
            .remove::<String>(keys::PKCE_CODE_VERIFIER)
            .await?;
        self.session
            .insert(keys::MELI_ACCESS_TOKEN, access_token)
            .await
    }

    /// Load the access token, if the user is logged in.
    ///
    /// # Errors
    ///
    /// Returns a session store error if the read fails.
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        self.session.get::<String>(keys::MELI_ACCESS_TOKEN).await
    }

    /// Clear all authentication state (logout).
    ///
    /// # Errors
    ///
    /// Returns a session store error if a removal fails.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.session
            .remove::<String>(keys::PKCE_CODE_VERIFIER)
            .await?;
        self.session
            .remove::<String>(keys::MELI_ACCESS_TOKEN)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn auth_session() -> AuthSession {
        let store = Arc::new(MemoryStore::default());
        AuthSession::new(Session::new(None, store, None))
    }

    #[tokio::test]
    async fn test_take_verifier_is_single_use() {
        let auth = auth_session();
        auth.store_verifier("v1").await.unwrap();

        // First take yields the verifier, second finds nothing: a replayed
        // callback cannot back a second exchange
        assert_eq!(auth.take_verifier().await.unwrap(), Some("v1".to_string()));
        assert_eq!(auth.take_verifier().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_take_verifier_on_fresh_session() {
        let auth = auth_session();
        assert_eq!(auth.take_verifier().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_new_login_overwrites_pending_verifier() {
        let auth = auth_session();
        auth.store_verifier("v1").await.unwrap();
        auth.store_verifier("v2").await.unwrap();

        assert_eq!(auth.take_verifier().await.unwrap(), Some("v2".to_string()));
        assert_eq!(auth.take_verifier().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_token_clears_stale_verifier() {
        let auth = auth_session();
        auth.store_verifier("v1").await.unwrap();
        auth.save_token("tok").await.unwrap();

        assert_eq!(auth.take_verifier().await.unwrap(), None);
        assert_eq!(auth.token().await.unwrap(), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn test_clear_removes_all_auth_state() {
        let auth = auth_session();
        auth.store_verifier("v1").await.unwrap();
        auth.save_token("tok").await.unwrap();
        auth.clear().await.unwrap();

        assert_eq!(auth.take_verifier().await.unwrap(), None);
        assert_eq!(auth.token().await.unwrap(), None);
    }
}
