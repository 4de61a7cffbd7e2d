//! Mercado Livre REST client.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::MeliConfig;
use crate::meli::types::{MeliUser, OrderSearchResponse, RawOrder, TokenResponse};
use crate::meli::MeliError;
use crate::pkce;

/// OAuth scopes requested on login (space-delimited when sent).
const SCOPES: &[&str] = &["read", "write", "offline_access", "orders", "items", "shipments"];

/// Client for the Mercado Livre REST API.
///
/// Handles the OAuth authorization URL, the back-channel token exchange,
/// and seller/order queries. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct MeliClient {
    inner: Arc<MeliClientInner>,
}

struct MeliClientInner {
    client: reqwest::Client,
    auth_base: String,
    api_base: String,
    client_id: String,
    client_secret: String,
}

impl MeliClient {
    /// Create a new Mercado Livre API client.
    #[must_use]
    pub fn new(config: &MeliConfig) -> Self {
        Self {
            inner: Arc::new(MeliClientInner {
                client: reqwest::Client::new(),
                auth_base: config.auth_base.clone(),
                api_base: config.api_base.clone(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
            }),
        }
    }

    /// Get the OAuth client ID (safe to expose).
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OAuth Flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate the authorization URL for seller login.
    ///
    /// Redirect the seller to this URL to begin the OAuth flow. This is a
    /// full-page navigation; the flow resumes only when the provider
    /// redirects back to `redirect_uri` with a `code` query parameter.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - Callback URL, byte-for-byte the registered value
    /// * `code_challenge` - S256 challenge derived from the stored verifier
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, code_challenge: &str) -> String {
        format!(
            "{}/authorization?\
            response_type=code&\
            client_id={}&\
            redirect_uri={}&\
            code_challenge={}&\
            code_challenge_method={}&\
            scope={}",
            self.inner.auth_base,
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(code_challenge),
            pkce::CHALLENGE_METHOD,
            urlencoding::encode(&SCOPES.join(" "))
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Single back-channel round trip; no automatic retry on failure, since
    /// authorization codes are single-use by provider policy.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the OAuth callback
    /// * `code_verifier` - The verifier stored when the flow started
    /// * `redirect_uri` - The same redirect URI used in the authorization request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider answers with a
    /// non-success status, or the body lacks an `access_token`.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, MeliError> {
        let url = format!("{}/oauth/token", self.inner.api_base);

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", &self.inner.client_id),
            ("client_secret", &self.inner.client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("code_verifier", code_verifier),
        ];

        let response = self.inner.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MeliError::OAuth(format!("Token exchange failed: {text}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| MeliError::OAuth(format!("Malformed token response: {e}")))?;

        Ok(token)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seller Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the authenticated seller's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_me(&self, access_token: &str) -> Result<MeliUser, MeliError> {
        let url = format!("{}/users/me", self.inner.api_base);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::check_status(response).await?.json().await.map_err(MeliError::Http)
    }

    /// Search the seller's paid orders, normalized for import.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn search_paid_orders(
        &self,
        access_token: &str,
        seller_id: i64,
    ) -> Result<Vec<RawOrder>, MeliError> {
        let url = format!(
            "{}/orders/search?seller={seller_id}&order.status=paid",
            self.inner.api_base
        );
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let search: OrderSearchResponse = Self::check_status(response).await?.json().await?;
        Ok(search.results.into_iter().map(RawOrder::from).collect())
    }

    /// Map non-success statuses to [`MeliError::Api`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, MeliError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(MeliError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
