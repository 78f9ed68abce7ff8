use serde::Deserialize;

use super::{compact_query, id_range_query, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Checkin, Listing, RawVenue, Venue};

/// Endpoints under `venue/`
pub struct VenueService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VenueInfo {
    venue: RawVenue,
}

impl<H: HttpClient> VenueService<'_, H> {
    /// Looks up a venue, including its top beers and recent checkins
    pub async fn info(&self, id: i64, compact: bool) -> Result<Response<Venue>> {
        let endpoint = format!("venue/info/{id}");
        let res = self
            .client
            .get_response::<VenueInfo>(&endpoint, &compact_query(compact))
            .await?;
        Ok(res.map(|info| info.venue.into()))
    }

    pub async fn checkins(&self, id: i64) -> Result<Response<Listing<Checkin>>> {
        self.checkins_min_max_id_limit(id, 0, MAX_CHECKIN_ID, DEFAULT_LIMIT)
            .await
    }

    pub async fn checkins_min_max_id_limit(
        &self,
        id: i64,
        min_id: i64,
        max_id: i64,
        limit: u32,
    ) -> Result<Response<Listing<Checkin>>> {
        self.client
            .checkin_feed(&format!("venue/checkins/{id}"), &id_range_query(min_id, max_id, limit))
            .await
    }
}
