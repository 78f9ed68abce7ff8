//! Test utilities for the untappd crate
//!
//! Canned API payloads and a client wired to the mock transport.

pub mod fixtures;

pub use fixtures::*;

use crate::http::mock::MockHttpClient;
use crate::{Client, Credentials};

/// Creates a client using ID/secret credentials over the given mock
pub fn client_with(mock: MockHttpClient) -> Client<MockHttpClient> {
    Client::with_http_client(Credentials::client_secret("id", "secret").unwrap(), mock)
}

/// Creates a client using an access token over the given mock
pub fn token_client_with(mock: MockHttpClient) -> Client<MockHttpClient> {
    Client::with_http_client(Credentials::access_token("token").unwrap(), mock)
}
