use reqwest::Method;

use super::{id_range_query, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Checkin, Listing, RawCheckin};

/// Endpoints acting as the authenticated user
///
/// These require a client built from an access token.
pub struct AuthService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

/// A new checkin
///
/// Optional fields are only sent when set: non-empty strings, non-zero
/// numbers, and `true` sharing flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckinRequest {
    pub beer_id: i64,
    /// Offset from GMT in hours, e.g. -5
    pub gmt_offset: i32,
    /// Time zone name, e.g. "America/New_York"
    pub timezone: String,

    pub foursquare_id: String,
    pub latitude: f64,
    pub longitude: f64,

    pub comment: String,
    pub rating: f64,

    pub facebook: bool,
    pub twitter: bool,
    pub foursquare: bool,
}

impl CheckinRequest {
    pub fn new(beer_id: i64, gmt_offset: i32, timezone: impl Into<String>) -> Self {
        Self {
            beer_id,
            gmt_offset,
            timezone: timezone.into(),
            ..Self::default()
        }
    }

    fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("bid", self.beer_id.to_string()),
            ("gmt_offset", self.gmt_offset.to_string()),
            ("timezone", self.timezone.clone()),
        ];

        if !self.foursquare_id.is_empty() {
            form.push(("foursquare_id", self.foursquare_id.clone()));
        }
        if self.latitude != 0.0 {
            form.push(("geolat", self.latitude.to_string()));
        }
        if self.longitude != 0.0 {
            form.push(("geolng", self.longitude.to_string()));
        }
        if !self.comment.is_empty() {
            form.push(("shout", self.comment.clone()));
        }
        if self.rating != 0.0 {
            form.push(("rating", self.rating.to_string()));
        }

        for (key, on) in [
            ("facebook", self.facebook),
            ("twitter", self.twitter),
            ("foursquare", self.foursquare),
        ] {
            if on {
                form.push((key, "on".to_string()));
            }
        }

        form
    }
}

impl<H: HttpClient> AuthService<'_, H> {
    /// The authenticated user's friend feed
    pub async fn checkins(&self) -> Result<Response<Listing<Checkin>>> {
        self.checkins_min_max_id_limit(0, MAX_CHECKIN_ID, DEFAULT_LIMIT)
            .await
    }

    pub async fn checkins_min_max_id_limit(
        &self,
        min_id: i64,
        max_id: i64,
        limit: u32,
    ) -> Result<Response<Listing<Checkin>>> {
        self.client
            .checkin_feed("checkin/recent", &id_range_query(min_id, max_id, limit))
            .await
    }

    /// Checks in a beer and returns the created checkin
    pub async fn checkin(&self, request: &CheckinRequest) -> Result<Response<Checkin>> {
        let res = self
            .client
            .request::<super::Envelope<RawCheckin>>(Method::POST, "checkin/add", &request.form(), &[])
            .await?;
        Ok(res.map(|envelope| envelope.response.into()))
    }

    /// Toasts a checkin; the response body is not decoded
    pub async fn toast(&self, checkin_id: i64) -> Result<Response<()>> {
        let endpoint = format!("checkin/toast/{checkin_id}");
        let res = self.client.send(Method::POST, &endpoint, &[], &[]).await?;
        Ok(Response {
            data: (),
            meta: res.into_meta(),
        })
    }
}
