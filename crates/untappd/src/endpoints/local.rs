use super::{id_range_query, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Checkin, Distance, Listing};

/// Default search radius for local feeds
pub const DEFAULT_RADIUS: u32 = 25;

/// Endpoints for checkins around a location (`thepub/local`)
pub struct LocalService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

impl<H: HttpClient> LocalService<'_, H> {
    /// Recent checkins within 25 miles of a point
    pub async fn checkins(&self, latitude: f64, longitude: f64) -> Result<Response<Listing<Checkin>>> {
        self.checkins_min_max_id_limit_radius(
            latitude,
            longitude,
            0,
            MAX_CHECKIN_ID,
            DEFAULT_LIMIT,
            DEFAULT_RADIUS,
            Distance::Miles,
        )
        .await
    }

    /// Pages through checkins around a point by ID range
    pub async fn checkins_min_max_id_limit_radius(
        &self,
        latitude: f64,
        longitude: f64,
        min_id: i64,
        max_id: i64,
        limit: u32,
        radius: u32,
        units: Distance,
    ) -> Result<Response<Listing<Checkin>>> {
        let mut query = vec![("lat", latitude.to_string()), ("lng", longitude.to_string())];
        query.extend(id_range_query(min_id, max_id, limit));
        query.push(("radius", radius.to_string()));
        query.push(("dist_pref", units.to_string()));

        self.client.checkin_feed("thepub/local", &query).await
    }
}
