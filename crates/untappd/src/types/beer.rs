use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::brewery::{Brewery, RawBrewery};
use crate::decode::{time, ResponseObject, ResponseTime};

/// An Untappd beer
///
/// The user-specific fields are only filled by listings tied to a user,
/// such as a user's distinct beers or wish list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Beer {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub style: String,
    pub description: String,
    pub abv: f64,
    pub ibu: i64,
    pub label: String,
    pub label_hd: String,
    /// When the beer was added to Untappd
    pub created: Option<DateTime<FixedOffset>>,
    /// Whether the beer is on the authenticated user's wish list
    pub wish_list: bool,
    /// Global Untappd rating
    pub overall_rating: f64,

    pub user_rating: f64,
    pub first_had: Option<DateTime<FixedOffset>>,
    pub recent_had: Option<DateTime<FixedOffset>>,
    pub wish_listed: Option<DateTime<FixedOffset>>,
    /// Times the user has checked in this beer
    pub count: i64,

    pub brewery: Option<Brewery>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawBeer {
    bid: i64,
    beer_name: String,
    beer_label: String,
    beer_label_hd: String,
    beer_abv: f64,
    beer_ibu: i64,
    beer_slug: String,
    beer_style: String,
    beer_description: String,
    created_at: Option<ResponseTime>,
    wish_list: bool,
    rating_score: f64,
    auth_rating: f64,
    // Only beer info nests the brewery; listings send it as a sibling.
    brewery: ResponseObject<RawBrewery>,
}

/// Listing entry with the brewery beside the beer
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawBreweryBeer {
    beer: RawBeer,
    brewery: RawBrewery,
}

/// Entry of a user's distinct beers
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawUserBeer {
    first_had: Option<ResponseTime>,
    recent_created_at: Option<ResponseTime>,
    rating_score: f64,
    count: i64,
    beer: RawBeer,
    brewery: RawBrewery,
}

/// Entry of a user's wish list
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawWishListBeer {
    created_at: Option<ResponseTime>,
    beer: RawBeer,
    brewery: RawBrewery,
}

impl From<RawBeer> for Beer {
    fn from(raw: RawBeer) -> Self {
        Self {
            id: raw.bid,
            name: raw.beer_name,
            slug: raw.beer_slug,
            style: raw.beer_style,
            description: raw.beer_description,
            abv: raw.beer_abv,
            ibu: raw.beer_ibu,
            label: raw.beer_label,
            label_hd: raw.beer_label_hd,
            created: time(raw.created_at),
            wish_list: raw.wish_list,
            overall_rating: raw.rating_score,
            user_rating: raw.auth_rating,
            brewery: raw.brewery.0.map(Brewery::from),
            ..Self::default()
        }
    }
}

impl From<RawBreweryBeer> for Beer {
    fn from(raw: RawBreweryBeer) -> Self {
        Self {
            brewery: Some(raw.brewery.into()),
            ..raw.beer.into()
        }
    }
}

impl From<RawUserBeer> for Beer {
    fn from(raw: RawUserBeer) -> Self {
        Self {
            user_rating: raw.rating_score,
            first_had: time(raw.first_had),
            recent_had: time(raw.recent_created_at),
            count: raw.count,
            brewery: Some(raw.brewery.into()),
            ..raw.beer.into()
        }
    }
}

impl From<RawWishListBeer> for Beer {
    fn from(raw: RawWishListBeer) -> Self {
        Self {
            wish_listed: time(raw.created_at),
            brewery: Some(raw.brewery.into()),
            ..raw.beer.into()
        }
    }
}
