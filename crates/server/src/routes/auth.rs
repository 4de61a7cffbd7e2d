//! Mercado Livre OAuth route handlers.
//!
//! Authorization Code flow with PKCE (S256), credentials held server-side:
//! - Login: generates a fresh verifier, stashes it in the session, redirects
//!   to the Mercado Livre authorization page
//! - Callback: takes the verifier out of the session (single use) and
//!   exchanges the code for an access token
//! - Logout: clears all authentication state

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::models::AuthSession;
use crate::pkce;
use crate::state::AppState;

/// Query parameters from the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a token.
    pub code: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

/// Initiate Mercado Livre OAuth login.
///
/// Generates a PKCE verifier, stores it in the session, and redirects to
/// the authorization page with the derived challenge. Starting a new login
/// overwrites any earlier pending verifier.
///
/// # Route
///
/// `GET /auth/meli/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    let verifier = pkce::generate_verifier();
    let challenge = pkce::derive_challenge(&verifier);

    let auth = AuthSession::new(session);
    if let Err(e) = auth.store_verifier(&verifier).await {
        tracing::error!("Failed to store PKCE verifier in session: {e}");
        return Redirect::to("/?error=session").into_response();
    }

    let redirect_uri = state.config().redirect_uri();
    let auth_url = state.meli().authorization_url(&redirect_uri, &challenge);

    Redirect::to(&auth_url).into_response()
}

/// Handle the Mercado Livre OAuth callback.
///
/// Removes the verifier from the session before attempting the exchange, so
/// a replayed callback (or a double-submitted code) finds no verifier and
/// cannot trigger a second exchange.
///
/// # Route
///
/// `GET /auth/meli/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let auth = AuthSession::new(session);

    // Authorization failed or was denied upstream
    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        tracing::warn!("Mercado Livre OAuth error: {error} - {description}");
        if let Err(e) = auth.take_verifier().await {
            tracing::error!("Failed to discard PKCE verifier: {e}");
        }
        return Redirect::to("/?error=meli_denied").into_response();
    }

    // No code at all: nothing to exchange, go home quietly
    let Some(code) = query.code else {
        tracing::debug!("OAuth callback without code");
        return Redirect::to("/").into_response();
    };

    // Single use: the verifier leaves the session before the exchange
    let verifier = match auth.take_verifier().await {
        Ok(Some(verifier)) => verifier,
        // No pending login attempt: nothing to exchange, go home quietly,
        // same as the missing-code case
        Ok(None) => {
            tracing::warn!("OAuth callback with no pending PKCE verifier");
            return Redirect::to("/").into_response();
        }
        Err(e) => {
            tracing::error!("Failed to read PKCE verifier from session: {e}");
            return Redirect::to("/?error=session").into_response();
        }
    };

    let redirect_uri = state.config().redirect_uri();

    let token = match state
        .meli()
        .exchange_code(&code, &verifier, &redirect_uri)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to exchange OAuth code: {e}");
            return Redirect::to("/?error=token_exchange").into_response();
        }
    };

    if let Err(e) = auth.save_token(&token.access_token).await {
        tracing::error!("Failed to store access token in session: {e}");
        return Redirect::to("/?error=session").into_response();
    }

    tracing::info!("Mercado Livre login completed");
    Redirect::to("/dashboard").into_response()
}

/// Log out, clearing the token and any stale verifier.
///
/// # Route
///
/// `POST /auth/meli/logout`
pub async fn logout(session: Session) -> Response {
    let auth = AuthSession::new(session);
    if let Err(e) = auth.clear().await {
        tracing::error!("Failed to clear session auth state: {e}");
    }

    Redirect::to("/").into_response()
}
