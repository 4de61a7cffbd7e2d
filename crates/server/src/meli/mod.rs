//! Mercado Livre API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` - Mercado Livre is the source of truth for
//!   orders; sync pulls paid orders into the local store on demand
//! - OAuth 2.0 Authorization Code flow with PKCE; the token exchange is a
//!   back-channel call so the client secret never reaches the browser
//!
//! # Example
//!
//! ```rust,ignore
//! use meli_picking_server::meli::MeliClient;
//!
//! let client = MeliClient::new(&config.meli);
//!
//! // Generate login URL
//! let verifier = pkce::generate_verifier();
//! let challenge = pkce::derive_challenge(&verifier);
//! let auth_url = client.authorization_url(&redirect_uri, &challenge);
//!
//! // After the OAuth callback, exchange the code for a token
//! let token = client.exchange_code(&code, &verifier, &redirect_uri).await?;
//!
//! // Pull the seller's paid orders
//! let me = client.get_me(&token.access_token).await?;
//! let orders = client.search_paid_orders(&token.access_token, me.id).await?;
//! ```

mod client;
pub mod mock;
mod types;

pub use client::MeliClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Mercado Livre API.
#[derive(Debug, Error)]
pub enum MeliError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OAuth flow failure (token exchange rejected, malformed response).
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// REST API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, best effort.
        message: String,
    },
}
