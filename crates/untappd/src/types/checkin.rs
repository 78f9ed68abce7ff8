use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::badge::{Badge, RawBadge};
use super::beer::{Beer, RawBeer};
use super::brewery::{Brewery, RawBrewery};
use super::social::{Comment, RawComment, RawToast, Toast};
use super::user::{RawUser, User};
use super::venue::{RawVenue, Venue};
use crate::decode::{time, ResponseList, ResponseObject, ResponseTime};

/// A single checkin of a beer by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Checkin {
    pub id: i64,
    pub created: Option<DateTime<FixedOffset>>,
    pub comment: String,
    /// The user's rating, absent when they did not rate the beer
    pub user_rating: Option<f64>,
    pub user: User,
    pub beer: Beer,
    pub brewery: Brewery,
    pub venue: Option<Venue>,
    pub badges: Vec<Badge>,
    pub toasts: Vec<Toast>,
    pub comments: Vec<Comment>,
    pub media: Vec<Media>,
}

/// A photo attached to a checkin
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Media {
    pub id: i64,
    pub photo: Photo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCheckin {
    checkin_id: i64,
    created_at: Option<ResponseTime>,
    checkin_comment: String,
    rating_score: f64,
    user: RawUser,
    beer: RawBeer,
    brewery: RawBrewery,
    venue: ResponseObject<RawVenue>,
    badges: ResponseList<RawBadge>,
    toasts: ResponseList<RawToast>,
    comments: ResponseList<RawComment>,
    media: ResponseList<RawMedia>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMedia {
    photo_id: i64,
    photo: RawPhoto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPhoto {
    photo_img_sm: String,
    photo_img_md: String,
    photo_img_lg: String,
    photo_img_og: String,
}

impl From<RawCheckin> for Checkin {
    fn from(raw: RawCheckin) -> Self {
        let id = raw.checkin_id;

        let venue = raw.venue.0.filter(|v| !v.is_empty()).map(Venue::from);

        let toasts = raw.toasts.export(|t| {
            let mut toast = Toast::from(t);
            if toast.checkin_id == 0 {
                toast.checkin_id = id;
            }
            toast
        });

        let comments = raw.comments.export(|c| {
            let mut comment = Comment::from(c);
            if comment.checkin_id == 0 {
                comment.checkin_id = id;
            }
            comment
        });

        Self {
            id,
            created: time(raw.created_at),
            comment: raw.checkin_comment,
            user_rating: (raw.rating_score != 0.0).then_some(raw.rating_score),
            user: raw.user.into(),
            beer: raw.beer.into(),
            brewery: raw.brewery.into(),
            venue,
            badges: raw.badges.export(Badge::from),
            toasts,
            comments,
            media: raw.media.export(|m| Media {
                id: m.photo_id,
                photo: Photo {
                    small: m.photo.photo_img_sm,
                    medium: m.photo.photo_img_md,
                    large: m.photo.photo_img_lg,
                    original: m.photo.photo_img_og,
                },
            }),
        }
    }
}
