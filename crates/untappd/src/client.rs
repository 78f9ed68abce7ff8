use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::endpoints::{AuthService, BeerService, BreweryService, LocalService, UserService, VenueService};
use crate::error::{ApiError, Error, ErrorEnvelope, Result};
use crate::http::{encode_form, HttpClient, HttpRequest, HttpResponse, ReqwestClient};

/// Base URL of the Untappd APIv4
pub const BASE_URL: &str = "https://api.untappd.com/v4";

/// The only Content-Type accepted from the API
pub const JSON_CONTENT_TYPE: &str = "application/json";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const DEFAULT_USER_AGENT: &str = concat!("untappd-rs/", env!("CARGO_PKG_VERSION"));

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";

/// Credentials sent with every request
///
/// Access tokens act on behalf of a user and unlock the authenticated
/// endpoints; client ID/secret pairs only allow public reads.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ClientSecret {
        client_id: String,
        client_secret: String,
    },
    AccessToken(String),
}

impl Credentials {
    /// Builds application credentials; both parts must be non-empty
    pub fn client_secret(client_id: &str, client_secret: &str) -> Result<Self> {
        if client_id.is_empty() {
            return Err(Error::NoClientId);
        }
        if client_secret.is_empty() {
            return Err(Error::NoClientSecret);
        }
        Ok(Self::ClientSecret {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        })
    }

    /// Builds user credentials from an OAuth access token
    pub fn access_token(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::NoAccessToken);
        }
        Ok(Self::AccessToken(token.to_owned()))
    }

    /// Picks a credential form from possibly-empty inputs
    ///
    /// A non-empty access token wins; otherwise the ID/secret pair must be
    /// complete.
    pub fn resolve(client_id: &str, client_secret: &str, access_token: &str) -> Result<Self> {
        if access_token.is_empty() {
            Self::client_secret(client_id, client_secret)
        } else {
            Self::access_token(access_token)
        }
    }

    /// Returns true for user credentials
    pub fn is_access_token(&self) -> bool {
        matches!(self, Self::AccessToken(_))
    }

    /// Overwrites any caller-supplied credential parameters
    fn apply<'a>(&'a self, params: &mut BTreeMap<&'a str, Vec<&'a str>>) {
        match self {
            Self::ClientSecret {
                client_id,
                client_secret,
            } => {
                params.insert("client_id", vec![client_id.as_str()]);
                params.insert("client_secret", vec![client_secret.as_str()]);
            }
            Self::AccessToken(token) => {
                params.insert("access_token", vec![token.as_str()]);
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientSecret { client_id, .. } => f
                .debug_struct("ClientSecret")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .finish(),
            Self::AccessToken(_) => f.debug_tuple("AccessToken").field(&"[REDACTED]").finish(),
        }
    }
}

/// Status and headers of an API response
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    /// Returns a header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Requests left in the current rate limit window
    pub fn rate_limit_remaining(&self) -> Option<u32> {
        self.header(RATE_LIMIT_REMAINING)?.trim().parse().ok()
    }

    /// Size of the rate limit window
    pub fn rate_limit(&self) -> Option<u32> {
        self.header(RATE_LIMIT_LIMIT)?.trim().parse().ok()
    }
}

/// Decoded payload together with the response it came from
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T> Response<T> {
    /// Transforms the payload, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            data: f(self.data),
            meta: self.meta,
        }
    }
}

/// Untappd APIv4 client
///
/// Generic over the HTTP client implementation for testability. Endpoints
/// are grouped into services borrowed from the client, e.g.
/// `client.user().info("gregavola", false)`.
pub struct Client<H: HttpClient = ReqwestClient> {
    http: H,
    credentials: Credentials,
    base_url: String,
    user_agent: HeaderValue,
}

impl Client<ReqwestClient> {
    /// Creates a client authenticated with an application ID and secret
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        let credentials = Credentials::client_secret(client_id, client_secret)?;
        Ok(Self::with_http_client(credentials, ReqwestClient::new()))
    }

    /// Creates a client acting on behalf of a user
    pub fn with_token(access_token: &str) -> Result<Self> {
        let credentials = Credentials::access_token(access_token)?;
        Ok(Self::with_http_client(credentials, ReqwestClient::new()))
    }
}

impl<H: HttpClient> Client<H> {
    /// Creates a client with a custom HTTP implementation
    pub fn with_http_client(credentials: Credentials, http: H) -> Self {
        Self {
            http,
            credentials,
            base_url: BASE_URL.to_string(),
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
        }
    }

    /// Overrides the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the User-Agent sent with every request
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self> {
        self.user_agent = HeaderValue::from_str(user_agent)?;
        Ok(self)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Resource services

    pub fn user(&self) -> UserService<'_, H> {
        UserService { client: self }
    }

    pub fn beer(&self) -> BeerService<'_, H> {
        BeerService { client: self }
    }

    pub fn brewery(&self) -> BreweryService<'_, H> {
        BreweryService { client: self }
    }

    pub fn venue(&self) -> VenueService<'_, H> {
        VenueService { client: self }
    }

    pub fn local(&self) -> LocalService<'_, H> {
        LocalService { client: self }
    }

    /// Endpoints that require an access token
    pub fn auth(&self) -> AuthService<'_, H> {
        AuthService { client: self }
    }

    // Request plumbing

    /// Performs one API round trip and decodes the JSON body into `T`
    ///
    /// `form` is sent as a form-encoded body on POST requests. `query` is
    /// sent as-is, except that credential parameters are always overwritten.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        form: &[(&str, String)],
        query: &[(&str, String)],
    ) -> Result<Response<T>> {
        let response = self.send(method, endpoint, form, query).await?;

        match response.json::<T>() {
            Ok(data) => Ok(Response {
                data,
                meta: response.into_meta(),
            }),
            Err(source) => Err(Error::Decode {
                source,
                response: Box::new(response.into_meta()),
            }),
        }
    }

    /// Performs one API round trip without decoding the body
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        form: &[(&str, String)],
        query: &[(&str, String)],
    ) -> Result<HttpResponse> {
        let url = self.build_url(endpoint, query);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(USER_AGENT, self.user_agent.clone());

        let body = if method == Method::POST && !form.is_empty() {
            let mut sorted: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
            sorted.sort_by_key(|(k, _)| *k);
            let body = encode_form(sorted);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            Some(body)
        } else {
            None
        };

        tracing::debug!(%method, endpoint, "Untappd API request");

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        tracing::trace!(
            status = response.status,
            bytes = response.body.len(),
            "Untappd API response"
        );

        check_response(response)
    }

    fn build_url(&self, endpoint: &str, query: &[(&str, String)]) -> String {
        let mut params: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, value) in query {
            params.entry(*key).or_default().push(value.as_str());
        }
        self.credentials.apply(&mut params);

        let encoded = encode_form(
            params
                .iter()
                .flat_map(|(key, values)| values.iter().map(move |v| (*key, *v))),
        );
        format!("{}/{}/?{}", self.base_url, endpoint, encoded)
    }
}

/// Classifies a response before its body is decoded
///
/// The Content-Type must be exactly `application/json`, even on errors.
/// Any 2xx status passes; anything else is decoded as an error envelope.
pub fn check_response(response: HttpResponse) -> Result<HttpResponse> {
    let content_type = response.content_type().unwrap_or_default();
    if content_type != JSON_CONTENT_TYPE {
        return Err(Error::ContentType {
            received: content_type.to_string(),
            response: Box::new(response.into_meta()),
        });
    }

    if response.is_success() {
        return Ok(response);
    }

    match response.json::<ErrorEnvelope>() {
        Ok(envelope) => Err(Error::Api {
            error: ApiError::from(envelope),
            response: Box::new(response.into_meta()),
        }),
        Err(source) => Err(Error::Decode {
            source,
            response: Box::new(response.into_meta()),
        }),
    }
}

impl<H: HttpClient + Clone> Clone for Client<H> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            credentials: self.credentials.clone(),
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl<H: HttpClient> fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
