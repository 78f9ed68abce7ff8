//! Decoders for the nonstandard scalar encodings used by the Untappd API
//!
//! The wrappers here deserialize one wire representation each and are turned
//! into plain native values when raw records are mapped into domain types.
//! The `parse_*` functions expose the same rules with typed errors.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde::de::{
    self, value::MapAccessDeserializer, DeserializeOwned, Deserializer, IgnoredAny,
    IntoDeserializer, MapAccess, SeqAccess, Unexpected, Visitor,
};
use serde::Deserialize;
use serde_json::Value;

/// Wire format of every timestamp, e.g. `Sat, 13 Dec 2014 19:15:38 +0000`
pub const TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// How far a list's reported count may run past the items actually sent
///
/// Short pages are padded with default entries up to the count; a count
/// beyond this margin is rejected as malformed. 50 is the largest page
/// any endpoint serves.
pub const MAX_PAD: usize = 50;

/// Errors raised by the scalar decoders
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid boolean value: {0}")]
    InvalidBool(i64),

    #[error("invalid time unit: {0:?}")]
    InvalidTimeUnit(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(f64),

    #[error("invalid timestamp {input:?}: {source}")]
    Timestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses a timestamp in the fixed wire format, keeping its offset
pub fn parse_time(input: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    DateTime::parse_from_str(input, TIME_FORMAT).map_err(|source| DecodeError::Timestamp {
        input: input.to_owned(),
        source,
    })
}

/// Formats a timestamp in the fixed wire format
pub fn format_time(time: &DateTime<FixedOffset>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Converts a `{time, measure}` pair into a duration
///
/// Only `milliseconds`, `seconds` and `minutes` are recognized. The product
/// is rounded to the nearest nanosecond.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn parse_duration(time: f64, measure: &str) -> Result<Duration, DecodeError> {
    let nanos_per_unit = match measure {
        "milliseconds" => 1e6,
        "seconds" => 1e9,
        "minutes" => 60e9,
        _ => return Err(DecodeError::InvalidTimeUnit(measure.to_owned())),
    };

    let nanos = (time * nanos_per_unit).round();
    if !nanos.is_finite() || nanos < 0.0 || nanos > u64::MAX as f64 {
        return Err(DecodeError::InvalidDuration(time));
    }

    Ok(Duration::from_nanos(nanos as u64))
}

/// Converts an integer flag into a boolean; only 0 and 1 are accepted
pub fn parse_bool(value: i64) -> Result<bool, DecodeError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DecodeError::InvalidBool(other)),
    }
}

/// Decodes a JSON body, treating `null` members like missing ones
///
/// Every wire struct defaults its missing fields, so dropping null members
/// leaves those fields at their zero value instead of failing the decode.
pub(crate) fn from_json<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    let mut value: Value = serde_json::from_str(body)?;
    drop_nulls(&mut value);
    serde_json::from_value(value)
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Timestamp in the fixed wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResponseTime(pub DateTime<FixedOffset>);

impl<'de> Deserialize<'de> for ResponseTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        parse_time(&input).map(Self).map_err(de::Error::custom)
    }
}

/// Converts an optional wire timestamp into a native one
pub(crate) fn time(value: Option<ResponseTime>) -> Option<DateTime<FixedOffset>> {
    value.map(|t| t.0)
}

/// Duration encoded as `{"time": <number>, "measure": <unit>}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ResponseDuration(pub Duration);

impl<'de> Deserialize<'de> for ResponseDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            time: f64,
            #[serde(default)]
            measure: String,
        }

        let wire = Wire::deserialize(deserializer)?;
        parse_duration(wire.time, &wire.measure)
            .map(Self)
            .map_err(de::Error::custom)
    }
}

impl From<ResponseDuration> for Duration {
    fn from(value: ResponseDuration) -> Self {
        value.0
    }
}

/// Boolean encoded as the integer 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ResponseBool(pub bool);

impl<'de> Deserialize<'de> for ResponseBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        parse_bool(value).map(Self).map_err(de::Error::custom)
    }
}

impl From<ResponseBool> for bool {
    fn from(value: ResponseBool) -> Self {
        value.0
    }
}

/// Counted list encoded as `{"count": n, "items": [...]}`
///
/// An empty JSON array (or `null`) stands in for an empty list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResponseList<T> {
    pub count: usize,
    pub items: Vec<T>,
}

impl<T> Default for ResponseList<T> {
    fn default() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

impl<T> ResponseList<T> {
    /// Maps the items into a list sized to the server-reported count
    ///
    /// Missing trailing entries are left at their default value; surplus
    /// items are kept.
    pub fn export<U: Default>(self, f: impl FnMut(T) -> U) -> Vec<U> {
        let mut out: Vec<U> = self.items.into_iter().map(f).collect();
        if out.len() < self.count {
            out.resize_with(self.count, U::default);
        }
        out
    }
}

#[derive(Deserialize)]
struct ListWire<T> {
    #[serde(default)]
    count: usize,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResponseList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ListVisitor(PhantomData))
    }
}

struct ListVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
    type Value = ResponseList<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an empty array or an object with count and items")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseList::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseList::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        expect_empty(seq)?;
        Ok(ResponseList::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let wire = ListWire::<T>::deserialize(MapAccessDeserializer::new(map))?;
        if wire.count > wire.items.len().saturating_add(MAX_PAD) {
            return Err(de::Error::invalid_value(
                Unexpected::Unsigned(wire.count as u64),
                &"a count close to the number of items",
            ));
        }
        Ok(ResponseList {
            count: wire.count,
            items: wire.items,
        })
    }
}

/// Object that the API replaces with `[]` or `{}` when absent
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResponseObject<T>(pub Option<T>);

impl<T> Default for ResponseObject<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResponseObject<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ObjectVisitor(PhantomData))
    }
}

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = ResponseObject<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an empty array")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseObject(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ResponseObject(None))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        expect_empty(seq)?;
        Ok(ResponseObject(None))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        // Peek for an empty object before handing the map to T.
        match map.next_key::<String>()? {
            None => Ok(ResponseObject(None)),
            Some(first) => {
                let rest = PrependKey { first: Some(first), map };
                T::deserialize(MapAccessDeserializer::new(rest)).map(|v| ResponseObject(Some(v)))
            }
        }
    }
}

/// Re-yields a key that was consumed while peeking
struct PrependKey<A> {
    first: Option<String>,
    map: A,
}

impl<'de, A: MapAccess<'de>> MapAccess<'de> for PrependKey<A> {
    type Error = A::Error;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error> {
        match self.first.take() {
            Some(key) => seed.deserialize(key.into_deserializer()).map(Some),
            None => self.map.next_key_seed(seed),
        }
    }

    fn next_value_seed<V: de::DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Self::Error> {
        self.map.next_value_seed(seed)
    }
}

fn expect_empty<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<(), A::Error> {
    if seq.next_element::<IgnoredAny>()?.is_some() {
        return Err(de::Error::invalid_length(1, &"an empty array"));
    }
    Ok(())
}
