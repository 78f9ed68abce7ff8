//! OAuth flow for obtaining user access tokens
//!
//! Users are sent to [`OAuthHandler::authenticate_url`]. Untappd redirects
//! them back to the redirect URL with a `code` parameter, which the handler
//! exchanges for an access token. [`OAuthHandler::router`] serves that
//! redirect endpoint with axum.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde::Deserialize;

use crate::client::JSON_CONTENT_TYPE;
use crate::http::{HttpClient, HttpRequest, ReqwestClient};

/// Page where users grant access to an application
pub const AUTHENTICATE_URL: &str = "https://untappd.com/oauth/authenticate/";

/// Endpoint that trades an authorization code for an access token
pub const AUTHORIZE_URL: &str = "https://untappd.com/oauth/authorize/";

/// Errors from the OAuth flow
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("no client ID")]
    NoClientId,

    #[error("no client secret")]
    NoClientSecret,

    #[error("invalid redirect URL {url:?}: {reason}")]
    RedirectUrl { url: String, reason: String },

    /// The authorization server could not be reached
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    /// The authorization server answered with something unusable
    #[error("{0}")]
    BadGateway(String),
}

/// Renders the response sent to the user once a token was obtained
pub type TokenHandler = Arc<dyn Fn(String) -> Response + Send + Sync>;

/// Exchanges OAuth authorization codes for access tokens
pub struct OAuthHandler<H: HttpClient = ReqwestClient> {
    http: H,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    authorize_url: String,
}

impl OAuthHandler<ReqwestClient> {
    pub fn new(client_id: &str, client_secret: &str, redirect_url: &str) -> Result<Self, OAuthError> {
        Self::with_http_client(client_id, client_secret, redirect_url, ReqwestClient::new())
    }
}

impl<H: HttpClient> OAuthHandler<H> {
    /// Creates a handler with a custom HTTP implementation
    pub fn with_http_client(
        client_id: &str,
        client_secret: &str,
        redirect_url: &str,
        http: H,
    ) -> Result<Self, OAuthError> {
        if client_id.is_empty() {
            return Err(OAuthError::NoClientId);
        }
        if client_secret.is_empty() {
            return Err(OAuthError::NoClientSecret);
        }

        let redirect = reqwest::Url::parse(redirect_url).map_err(|e| OAuthError::RedirectUrl {
            url: redirect_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_url: redirect.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
        })
    }

    /// Overrides the token endpoint
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// URL to send users to so they can grant access
    pub fn authenticate_url(&self) -> String {
        format!(
            "{AUTHENTICATE_URL}?client_id={}&response_type=code&redirect_url={}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
        )
    }

    fn token_url(&self, code: &str) -> String {
        format!(
            "{}?client_id={}&client_secret={}&response_type=code&redirect_url={}&code={}",
            self.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.client_secret),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(code),
        )
    }

    /// Trades an authorization code for an access token
    pub async fn exchange(&self, code: &str) -> Result<String, OAuthError> {
        #[derive(Deserialize)]
        struct TokenEnvelope {
            response: TokenResponse,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        tracing::debug!("Exchanging OAuth code for access token");

        let response = self
            .http
            .execute(HttpRequest {
                method: Method::GET,
                url: self.token_url(code),
                headers,
                body: None,
            })
            .await?;

        if !response.is_success() {
            return Err(OAuthError::BadGateway(format!(
                "authentication server error: HTTP {:03}",
                response.status
            )));
        }

        if !response
            .content_type()
            .is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE))
        {
            return Err(OAuthError::BadGateway(
                "authentication server sent non-JSON content".to_string(),
            ));
        }

        let envelope: TokenEnvelope = response.json().map_err(|e| {
            OAuthError::BadGateway(format!("invalid authentication server response: {e}"))
        })?;

        Ok(envelope.response.access_token)
    }
}

impl<H: HttpClient + 'static> OAuthHandler<H> {
    /// Serves the redirect endpoint, replying with the token as plain text
    pub fn router(self) -> Router {
        self.router_with(Arc::new(|token: String| token.into_response()))
    }

    /// Serves the redirect endpoint, handing each token to `on_token`
    ///
    /// Missing codes get 400, unusable authorization server replies 502 and
    /// transport failures 500. Only GET is routed.
    pub fn router_with(self, on_token: TokenHandler) -> Router {
        let state = Arc::new(CallbackState {
            handler: self,
            on_token,
        });

        Router::new()
            .route("/", get(callback::<H>))
            .with_state(state)
    }
}

impl<H: HttpClient> fmt::Debug for OAuthHandler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthHandler")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .finish_non_exhaustive()
    }
}

struct CallbackState<H: HttpClient> {
    handler: OAuthHandler<H>,
    on_token: TokenHandler,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

async fn callback<H: HttpClient + 'static>(
    State(state): State<Arc<CallbackState<H>>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "no 'code' GET parameter").into_response();
    };

    match state.handler.exchange(&code).await {
        Ok(token) => (state.on_token)(token),
        Err(OAuthError::BadGateway(message)) => (StatusCode::BAD_GATEWAY, message).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
