//! Resource endpoints
//!
//! Each service borrows the client and offers two tiers per listing: a
//! convenience method using the API's default paging and a fully
//! parameterized one. Offset paging is used by friends, badges, beers, wish
//! list and searches; every checkin feed pages by ID range instead.

mod auth;
mod beer;
mod brewery;
mod local;
mod user;
mod venue;

pub use auth::{AuthService, CheckinRequest};
pub use beer::BeerService;
pub use brewery::BreweryService;
pub use local::{LocalService, DEFAULT_RADIUS};
pub use user::UserService;
pub use venue::VenueService;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{Client, Response};
use crate::decode::ResponseList;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Checkin, Listing, RawCheckin};

/// Upper bound of checkin IDs, the default `max_id` of every feed
pub const MAX_CHECKIN_ID: i64 = i32::MAX as i64;

/// Page size the API uses when none is given
pub const DEFAULT_LIMIT: u32 = 25;

type Query = Vec<(&'static str, String)>;

fn compact_query(compact: bool) -> Query {
    if compact {
        vec![("compact", "true".to_string())]
    } else {
        Vec::new()
    }
}

fn offset_limit_query(offset: u32, limit: u32) -> Query {
    vec![("offset", offset.to_string()), ("limit", limit.to_string())]
}

fn id_range_query(min_id: i64, max_id: i64, limit: u32) -> Query {
    vec![
        ("min_id", min_id.to_string()),
        ("max_id", max_id.to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Percent-encodes a caller-supplied path segment
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Every payload sits under a top-level `response` key
#[derive(Debug, Default, Deserialize)]
struct Envelope<T: Default> {
    #[serde(default)]
    response: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckinFeed {
    checkins: ResponseList<RawCheckin>,
}

impl<H: HttpClient> Client<H> {
    /// GETs an endpoint and unwraps the `response` envelope
    async fn get_response<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response<T>>
    where
        T: DeserializeOwned + Default,
    {
        let res = self
            .request::<Envelope<T>>(Method::GET, endpoint, &[], query)
            .await?;
        Ok(res.map(|envelope| envelope.response))
    }

    /// Fetches one page of any checkin feed
    async fn checkin_feed(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response<Listing<Checkin>>> {
        let res = self.get_response::<CheckinFeed>(endpoint, query).await?;
        Ok(res.map(|feed| Listing::from_wire(feed.checkins, Checkin::from)))
    }
}
