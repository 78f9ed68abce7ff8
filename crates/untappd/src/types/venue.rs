use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::beer::{Beer, RawBreweryBeer};
use super::checkin::{Checkin, RawCheckin};
use crate::decode::{time, ResponseList, ResponseObject, ResponseTime};

/// An Untappd venue
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub updated: Option<DateTime<FixedOffset>>,
    pub category: String,
    pub public: bool,
    pub location: VenueLocation,
    pub foursquare: Option<Foursquare>,
    pub icon: Option<VenueIcon>,
    /// Most checked-in beers, only sent by venue info
    pub top_beers: Vec<Beer>,
    /// Recent checkins, only sent by venue info
    pub checkins: Vec<Checkin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Foursquare cross-reference for a venue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Foursquare {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueIcon {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVenue {
    venue_id: i64,
    venue_name: String,
    last_updated: Option<ResponseTime>,
    primary_category: String,
    public_venue: bool,
    location: RawVenueLocation,
    foursquare: ResponseObject<RawFoursquare>,
    venue_icon: ResponseObject<RawVenueIcon>,
    top_beers: ResponseList<RawBreweryBeer>,
    checkins: ResponseList<RawCheckin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVenueLocation {
    venue_address: String,
    venue_city: String,
    venue_state: String,
    venue_country: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFoursquare {
    foursquare_id: String,
    foursquare_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVenueIcon {
    sm: String,
    md: String,
    lg: String,
}

impl RawVenue {
    /// Checkins without a venue carry an empty object or array; ID 0 with no
    /// name is the only signal left once that is decoded.
    pub(crate) fn is_empty(&self) -> bool {
        self.venue_id == 0 && self.venue_name.is_empty()
    }
}

impl From<RawVenue> for Venue {
    fn from(raw: RawVenue) -> Self {
        Self {
            id: raw.venue_id,
            name: raw.venue_name,
            updated: time(raw.last_updated),
            category: raw.primary_category,
            public: raw.public_venue,
            location: VenueLocation {
                address: raw.location.venue_address,
                city: raw.location.venue_city,
                state: raw.location.venue_state,
                country: raw.location.venue_country,
                latitude: raw.location.lat,
                longitude: raw.location.lng,
            },
            foursquare: raw
                .foursquare
                .0
                .filter(|f| !f.foursquare_id.is_empty())
                .map(|f| Foursquare {
                    id: f.foursquare_id,
                    url: f.foursquare_url,
                }),
            icon: raw.venue_icon.0.map(|i| VenueIcon {
                small: i.sm,
                medium: i.md,
                large: i.lg,
            }),
            top_beers: raw.top_beers.export(Beer::from),
            checkins: raw.checkins.export(Checkin::from),
        }
    }
}
