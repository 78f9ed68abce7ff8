use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::user::{RawUser, User};
use crate::decode::{time, ResponseTime};

/// A toast ("like") on a checkin
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toast {
    pub id: i64,
    pub checkin_id: i64,
    pub user_id: i64,
    pub created: Option<DateTime<FixedOffset>>,
    pub user: User,
}

/// A comment on a checkin
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub checkin_id: i64,
    pub comment: String,
    pub created: Option<DateTime<FixedOffset>>,
    pub user: User,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawToast {
    like_id: i64,
    checkin_id: i64,
    uid: i64,
    created_at: Option<ResponseTime>,
    user: RawUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawComment {
    comment_id: i64,
    checkin_id: i64,
    comment: String,
    created_at: Option<ResponseTime>,
    user: RawUser,
}

impl From<RawToast> for Toast {
    fn from(raw: RawToast) -> Self {
        Self {
            id: raw.like_id,
            checkin_id: raw.checkin_id,
            user_id: raw.uid,
            created: time(raw.created_at),
            user: raw.user.into(),
        }
    }
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Self {
            id: raw.comment_id,
            checkin_id: raw.checkin_id,
            comment: raw.comment,
            created: time(raw.created_at),
            user: raw.user.into(),
        }
    }
}
