//! Typed async client for the Untappd APIv4
//!
//! ```no_run
//! # async fn run() -> untappd::Result<()> {
//! let client = untappd::Client::new("client-id", "client-secret")?;
//! let user = client.user().info("gregavola", false).await?;
//! println!("{} has {} checkins", user.data.user_name, user.data.stats.checkins);
//! # Ok(())
//! # }
//! ```
//!
//! Each call performs one HTTP round trip. Responses carry the HTTP status and
//! headers alongside the decoded data, so rate-limit headers are available on
//! both success and failure.

mod client;
pub mod decode;
mod endpoints;
mod error;
pub mod http;
pub mod oauth;
mod types;

#[cfg(test)]
mod testutil;

pub use client::{check_response, Client, Credentials, Response, ResponseMeta, BASE_URL, JSON_CONTENT_TYPE};
pub use decode::DecodeError;
pub use endpoints::*;
pub use error::{ApiError, Error, Result};
pub use types::*;
