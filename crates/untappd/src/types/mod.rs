//! Domain records returned by the client
//!
//! Every record has a private wire-shaped twin that is decoded from JSON and
//! then mapped into the public type, so field renames, flattened nesting and
//! the API's odd scalar encodings never leak out of this module.

mod badge;
mod beer;
mod brewery;
mod checkin;
mod social;
mod sort;
mod user;
mod venue;

use serde::Serialize;

use crate::decode::ResponseList;

pub use badge::{Badge, BadgeMedia};
pub use beer::Beer;
pub use brewery::{Brewery, BreweryContact, BreweryLocation};
pub use checkin::{Checkin, Media, Photo};
pub use social::{Comment, Toast};
pub use sort::{Distance, ParseSortError, Sort};
pub use user::{User, UserStats};
pub use venue::{Foursquare, Venue, VenueIcon, VenueLocation};

pub(crate) use badge::RawBadge;
pub(crate) use beer::{RawBeer, RawBreweryBeer, RawUserBeer, RawWishListBeer};
pub(crate) use brewery::{RawBrewery, RawSearchBrewery};
pub(crate) use checkin::RawCheckin;
pub(crate) use user::{RawFriend, RawUser};
pub(crate) use venue::RawVenue;

/// A page of results sized to the count the server reported
///
/// `items` always holds at least `count` entries; when the server sent fewer
/// items than it counted, the trailing entries are default values and
/// `decoded` tells how many were real.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub decoded: usize,
    pub items: Vec<T>,
}

impl<T> Listing<T> {
    /// True when every counted entry was present in the payload
    pub fn is_complete(&self) -> bool {
        self.decoded >= self.count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Default> Listing<T> {
    pub(crate) fn from_wire<R>(list: ResponseList<R>, f: impl FnMut(R) -> T) -> Self {
        let count = list.count;
        let decoded = list.items.len();
        Self {
            count,
            decoded,
            items: list.export(f),
        }
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
