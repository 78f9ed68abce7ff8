use serde::Deserialize;

use super::{compact_query, id_range_query, offset_limit_query, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::decode::ResponseList;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Brewery, Checkin, Listing, RawBrewery, RawSearchBrewery};

/// Endpoints under `brewery/` and `search/brewery`
pub struct BreweryService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BreweryInfo {
    brewery: RawBrewery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BrewerySearch {
    brewery: ResponseList<RawSearchBrewery>,
}

impl<H: HttpClient> BreweryService<'_, H> {
    pub async fn info(&self, id: i64, compact: bool) -> Result<Response<Brewery>> {
        let endpoint = format!("brewery/info/{id}");
        let res = self
            .client
            .get_response::<BreweryInfo>(&endpoint, &compact_query(compact))
            .await?;
        Ok(res.map(|info| info.brewery.into()))
    }

    pub async fn search(&self, query: &str) -> Result<Response<Listing<Brewery>>> {
        self.search_offset_limit(query, 0, DEFAULT_LIMIT).await
    }

    /// Searches breweries by name; results carry no contact or type details
    pub async fn search_offset_limit(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Response<Listing<Brewery>>> {
        let mut params = vec![("q", query.to_string())];
        params.extend(offset_limit_query(offset, limit));

        let res = self
            .client
            .get_response::<BrewerySearch>("search/brewery", &params)
            .await?;
        Ok(res.map(|search| Listing::from_wire(search.brewery, |item| item.brewery.into())))
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
            .checkin_feed(&format!("brewery/checkins/{id}"), &id_range_query(min_id, max_id, limit))
            .await
    }
}
