use serde::{Deserialize, Serialize};

use crate::decode::ResponseBool;

/// An Untappd brewery
///
/// Search results omit contact and type details; those fields are left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Brewery {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo: String,
    pub country: String,
    pub active: bool,
    pub location: BreweryLocation,
    pub contact: BreweryContact,
    pub brewery_type: String,
    pub brewery_type_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreweryLocation {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreweryContact {
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawBrewery {
    brewery_id: i64,
    brewery_name: String,
    brewery_slug: String,
    brewery_label: String,
    country_name: String,
    brewery_active: ResponseBool,
    location: RawBreweryLocation,
    contact: RawBreweryContact,
    brewery_type: String,
    brewery_type_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBreweryLocation {
    brewery_city: String,
    brewery_state: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBreweryContact {
    twitter: String,
    facebook: String,
    instagram: String,
    url: String,
}

/// Entry of a brewery search
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSearchBrewery {
    pub brewery: RawBrewery,
}

impl From<RawBrewery> for Brewery {
    fn from(raw: RawBrewery) -> Self {
        Self {
            id: raw.brewery_id,
            name: raw.brewery_name,
            slug: raw.brewery_slug,
            logo: raw.brewery_label,
            country: raw.country_name,
            active: raw.brewery_active.into(),
            location: BreweryLocation {
                city: raw.location.brewery_city,
                state: raw.location.brewery_state,
                latitude: raw.location.lat,
                longitude: raw.location.lng,
            },
            contact: BreweryContact {
                twitter: raw.contact.twitter,
                facebook: raw.contact.facebook,
                instagram: raw.contact.instagram,
                url: raw.contact.url,
            },
            brewery_type: raw.brewery_type,
            brewery_type_id: raw.brewery_type_id,
        }
    }
}
