use serde::{Deserialize, Serialize};

use crate::decode::ResponseBool;

/// An Untappd user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    pub uid: i64,
    pub id: i64,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub location: String,
    /// High resolution avatar when the API has one
    pub avatar: String,
    pub cover_photo: String,
    /// Personal website
    pub url: String,
    /// Profile page on untappd.com
    pub untappd_url: String,
    pub supporter: bool,
    pub stats: UserStats,
}

/// Activity counters for a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub badges: i64,
    pub friends: i64,
    pub checkins: i64,
    pub beers: i64,
    pub created_beers: i64,
    pub followings: i64,
    pub photos: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawUser {
    uid: i64,
    id: i64,
    user_name: String,
    first_name: String,
    last_name: String,
    bio: String,
    location: String,
    user_avatar: String,
    user_avatar_hd: String,
    user_cover_photo: String,
    url: String,
    untappd_url: String,
    is_supporter: ResponseBool,
    stats: RawUserStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUserStats {
    total_badges: i64,
    total_friends: i64,
    total_checkins: i64,
    total_beers: i64,
    total_created_beers: i64,
    total_followings: i64,
    total_photos: i64,
}

/// Entry of a friends listing
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawFriend {
    pub user: RawUser,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        let avatar = if raw.user_avatar_hd.is_empty() {
            raw.user_avatar
        } else {
            raw.user_avatar_hd
        };

        Self {
            uid: raw.uid,
            id: raw.id,
            user_name: raw.user_name,
            first_name: raw.first_name,
            last_name: raw.last_name,
            bio: raw.bio,
            location: raw.location,
            avatar,
            cover_photo: raw.user_cover_photo,
            url: raw.url,
            untappd_url: raw.untappd_url,
            supporter: raw.is_supporter.into(),
            stats: UserStats {
                badges: raw.stats.total_badges,
                friends: raw.stats.total_friends,
                checkins: raw.stats.total_checkins,
                beers: raw.stats.total_beers,
                created_beers: raw.stats.total_created_beers,
                followings: raw.stats.total_followings,
                photos: raw.stats.total_photos,
            },
        }
    }
}
