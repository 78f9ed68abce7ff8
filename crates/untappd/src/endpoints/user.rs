use serde::Deserialize;

use super::{compact_query, id_range_query, offset_limit_query, segment, DEFAULT_LIMIT, MAX_CHECKIN_ID};
use crate::client::{Client, Response};
use crate::decode::ResponseList;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Badge, Beer, Checkin, Listing, RawBadge, RawFriend, RawUser, RawUserBeer, RawWishListBeer, Sort, User};

/// Endpoints under `user/`
pub struct UserService<'a, H: HttpClient> {
    pub(crate) client: &'a Client<H>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserInfo {
    user: RawUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserBeers<T> {
    beers: ResponseList<T>,
}

impl<H: HttpClient> UserService<'_, H> {
    /// Looks up a user; `compact` trims the response to basic fields
    pub async fn info(&self, username: &str, compact: bool) -> Result<Response<User>> {
        let endpoint = format!("user/info/{}", segment(username));
        let res = self
            .client
            .get_response::<UserInfo>(&endpoint, &compact_query(compact))
            .await?;
        Ok(res.map(|info| info.user.into()))
    }

    pub async fn friends(&self, username: &str) -> Result<Response<Listing<User>>> {
        self.friends_offset_limit(username, 0, DEFAULT_LIMIT).await
    }

    /// Lists a user's friends; at most 25 per call
    pub async fn friends_offset_limit(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Response<Listing<User>>> {
        let endpoint = format!("user/friends/{}", segment(username));
        let res = self
            .client
            .get_response::<ResponseList<RawFriend>>(&endpoint, &offset_limit_query(offset, limit))
            .await?;
        Ok(res.map(|list| Listing::from_wire(list, |friend| friend.user.into())))
    }

    pub async fn badges(&self, username: &str) -> Result<Response<Listing<Badge>>> {
        self.badges_offset_limit(username, 0, 50).await
    }

    /// Lists the badges a user has earned; at most 50 per call
    pub async fn badges_offset_limit(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Response<Listing<Badge>>> {
        let endpoint = format!("user/badges/{}", segment(username));
        let res = self
            .client
            .get_response::<ResponseList<RawBadge>>(&endpoint, &offset_limit_query(offset, limit))
            .await?;
        Ok(res.map(|list| Listing::from_wire(list, Badge::from)))
    }

    pub async fn beers(&self, username: &str) -> Result<Response<Listing<Beer>>> {
        self.beers_offset_limit_sort(username, 0, DEFAULT_LIMIT, Sort::DATE)
            .await
    }

    /// Lists the distinct beers a user has checked in, with their rating,
    /// first and latest checkin and checkin count
    pub async fn beers_offset_limit_sort(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
        sort: Sort,
    ) -> Result<Response<Listing<Beer>>> {
        let endpoint = format!("user/beers/{}", segment(username));
        let mut query = offset_limit_query(offset, limit);
        query.push(("sort", sort.to_string()));

        let res = self
            .client
            .get_response::<UserBeers<RawUserBeer>>(&endpoint, &query)
            .await?;
        Ok(res.map(|page| Listing::from_wire(page.beers, Beer::from)))
    }

    pub async fn wish_list(&self, username: &str) -> Result<Response<Listing<Beer>>> {
        self.wish_list_offset_limit_sort(username, 0, DEFAULT_LIMIT, Sort::DATE)
            .await
    }

    /// Lists a user's wish list, with the time each beer was added
    pub async fn wish_list_offset_limit_sort(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
        sort: Sort,
    ) -> Result<Response<Listing<Beer>>> {
        let endpoint = format!("user/wishlist/{}", segment(username));
        let mut query = offset_limit_query(offset, limit);
        query.push(("sort", sort.to_string()));

        let res = self
            .client
            .get_response::<UserBeers<RawWishListBeer>>(&endpoint, &query)
            .await?;
        Ok(res.map(|page| Listing::from_wire(page.beers, Beer::from)))
    }

    pub async fn checkins(&self, username: &str) -> Result<Response<Listing<Checkin>>> {
        self.checkins_min_max_id_limit(username, 0, MAX_CHECKIN_ID, DEFAULT_LIMIT)
            .await
    }

    /// Pages through a user's checkins by ID range
    pub async fn checkins_min_max_id_limit(
        &self,
        username: &str,
        min_id: i64,
        max_id: i64,
        limit: u32,
    ) -> Result<Response<Listing<Checkin>>> {
        let endpoint = format!("user/checkins/{}", segment(username));
        self.client
            .checkin_feed(&endpoint, &id_range_query(min_id, max_id, limit))
            .await
    }
}
