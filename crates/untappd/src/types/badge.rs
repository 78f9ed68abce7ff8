use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::decode::{time, ResponseBool, ResponseList, ResponseTime};

/// A badge earned by a user
///
/// `levels` lists the badge's other levels. Levels are only mapped one
/// deep; a level's own `levels` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Badge {
    pub id: i64,
    pub checkin_id: i64,
    pub name: String,
    pub description: String,
    pub hint: String,
    pub active: bool,
    pub media: BadgeMedia,
    pub earned: Option<DateTime<FixedOffset>>,
    pub levels: Vec<Badge>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeMedia {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawBadge {
    badge_id: i64,
    checkin_id: i64,
    badge_name: String,
    badge_description: String,
    badge_hint: String,
    badge_active_status: ResponseBool,
    #[serde(alias = "badge_image")]
    media: RawBadgeMedia,
    created_at: Option<ResponseTime>,
    levels: ResponseList<RawBadge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBadgeMedia {
    #[serde(alias = "sm")]
    badge_image_sm: String,
    #[serde(alias = "md")]
    badge_image_md: String,
    #[serde(alias = "lg")]
    badge_image_lg: String,
}

impl RawBadge {
    fn export(self, depth: usize) -> Badge {
        let levels = if depth == 0 {
            self.levels.export(|level| level.export(depth + 1))
        } else {
            Vec::new()
        };

        Badge {
            id: self.badge_id,
            checkin_id: self.checkin_id,
            name: self.badge_name,
            description: self.badge_description,
            hint: self.badge_hint,
            active: self.badge_active_status.into(),
            media: BadgeMedia {
                small: self.media.badge_image_sm,
                medium: self.media.badge_image_md,
                large: self.media.badge_image_lg,
            },
            earned: time(self.created_at),
            levels,
        }
    }
}

impl From<RawBadge> for Badge {
    fn from(raw: RawBadge) -> Self {
        raw.export(0)
    }
}
