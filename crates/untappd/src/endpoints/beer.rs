use serde::Deserialize;

use super::{compact_query, id_range_query, offset_limit_query, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::decode::ResponseList;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Beer, Checkin, Listing, RawBeer, RawBreweryBeer, Sort};

/// Endpoints under `beer/` and `search/beer`
pub struct BeerService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BeerInfo {
    beer: RawBeer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BeerSearch {
    beers: ResponseList<RawBreweryBeer>,
}

impl<H: HttpClient> BeerService<'_, H> {
    /// Looks up a beer and its brewery
    pub async fn info(&self, id: i64, compact: bool) -> Result<Response<Beer>> {
        let endpoint = format!("beer/info/{id}");
        let res = self
            .client
            .get_response::<BeerInfo>(&endpoint, &compact_query(compact))
            .await?;
        Ok(res.map(|info| info.beer.into()))
    }

    /// Searches beers by name; "Brewery Name + Beer Name" queries work best
    pub async fn search(&self, query: &str) -> Result<Response<Listing<Beer>>> {
        self.search_offset_limit_sort(query, 0, DEFAULT_LIMIT, Sort::DATE)
            .await
    }

    /// Searches beers with explicit paging; at most 50 per call
    pub async fn search_offset_limit_sort(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
        sort: Sort,
    ) -> Result<Response<Listing<Beer>>> {
        let mut params = vec![("q", query.to_string())];
        params.extend(offset_limit_query(offset, limit));
        params.push(("sort", sort.to_string()));

        let res = self
            .client
            .get_response::<BeerSearch>("search/beer", &params)
            .await?;
        Ok(res.map(|search| Listing::from_wire(search.beers, Beer::from)))
    }

    pub async fn checkins(&self, id: i64) -> Result<Response<Listing<Checkin>>> {
        self.checkins_min_max_id_limit(id, 0, MAX_CHECKIN_ID, DEFAULT_LIMIT)
            .await
    }

    /// Pages through checkins of a beer by ID range
    pub async fn checkins_min_max_id_limit(
        &self,
        id: i64,
        min_id: i64,
        max_id: i64,
        limit: u32,
    ) -> Result<Response<Listing<Checkin>>> {
        self.client
            .checkin_feed(&format!("beer/checkins/{id}"), &id_range_query(min_id, max_id, limit))
            .await
    }
}
