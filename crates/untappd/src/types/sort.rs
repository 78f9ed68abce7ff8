use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Sort order for beer listings
///
/// Listing methods forward any value as-is; only `FromStr` checks that a
/// value is one the API recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sort(Cow<'static, str>);

impl Sort {
    /// Most recent checkin first
    pub const DATE: Sort = Sort::from_static("date");
    /// Most checkins first
    pub const CHECKIN: Sort = Sort::from_static("checkin");
    pub const HIGHEST_RATED: Sort = Sort::from_static("highest_rated");
    pub const LOWEST_RATED: Sort = Sort::from_static("lowest_rated");
    /// Highest rated by the listed user
    pub const HIGHEST_RATED_YOU: Sort = Sort::from_static("highest_rated_you");
    /// Lowest rated by the listed user
    pub const LOWEST_RATED_YOU: Sort = Sort::from_static("lowest_rated_you");
    pub const HIGHEST_ABV: Sort = Sort::from_static("highest_abv");
    pub const LOWEST_ABV: Sort = Sort::from_static("lowest_abv");

    /// Every sort order the API recognizes
    pub const ALL: [Sort; 8] = [
        Self::DATE,
        Self::CHECKIN,
        Self::HIGHEST_RATED,
        Self::LOWEST_RATED,
        Self::HIGHEST_RATED_YOU,
        Self::LOWEST_RATED_YOU,
        Self::HIGHEST_ABV,
        Self::LOWEST_ABV,
    ];

    const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Wraps an arbitrary value without checking it
    pub fn custom(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::ALL.iter().any(|s| s == self)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::DATE
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort {0:?}, expected one of: date, checkin, highest_rated, lowest_rated, highest_rated_you, lowest_rated_you, highest_abv, lowest_abv")]
pub struct ParseSortError(pub String);

impl FromStr for Sort {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}

/// Radius unit for local-area checkin feeds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Distance {
    #[default]
    #[serde(rename = "m")]
    Miles,
    #[serde(rename = "km")]
    Kilometers,
}

impl Distance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miles => "m",
            Self::Kilometers => "km",
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
