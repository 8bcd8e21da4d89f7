//! Forgiving field deserializers for host-supplied data
//!
//! The host stores costs, weights and tiers as free text and leaves fields
//! null. Anything that is not a usable number reads as zero, text and flags
//! fall back to their defaults, and an item or map entry that cannot be read
//! at all is dropped instead of failing the whole sheet.

use crate::types::{ArmourLocation, PerLocation};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    fn as_f64(&self) -> f64 {
        match self {
            Loose::Int(v) => *v as f64,
            Loose::Float(v) if v.is_finite() => *v,
            Loose::Float(_) => 0.0,
            Loose::Text(s) => number_from_text(s),
            Loose::Other(_) => 0.0,
        }
    }

    fn as_i32(&self) -> i32 {
        match self {
            Loose::Int(v) => (*v).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            other => other.as_f64() as i32,
        }
    }
}

/// Parse a number out of sheet text, zero when there is none
pub fn number_from_text(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integer form of [`number_from_text`], truncated toward zero
pub fn int_from_text(text: &str) -> i32 {
    number_from_text(text) as i32
}

pub(crate) fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Loose::deserialize(deserializer)?.as_i32())
}

pub(crate) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Loose::deserialize(deserializer)?.as_f64())
}

/// Text field; numbers are rendered, anything else is `None`
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => Some(s),
        Loose::Int(v) => Some(v.to_string()),
        Loose::Float(v) => Some(v.to_string()),
        Loose::Other(_) => None,
    })
}

pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Flag(bool),
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Checkbox field: `true`, `"true"` and non-zero numbers are set
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match LooseFlag::deserialize(deserializer)? {
        LooseFlag::Flag(b) => b,
        LooseFlag::Int(v) => v != 0,
        LooseFlag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        LooseFlag::Other(_) => false,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseList {
    List(Vec<Loose>),
    Text(String),
    Other(IgnoredAny),
}

/// A list of names given either as an array or a comma-separated string
pub(crate) fn string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let names = match LooseList::deserialize(deserializer)? {
        LooseList::List(values) => values
            .into_iter()
            .filter_map(|v| match v {
                Loose::Text(s) => Some(s),
                _ => None,
            })
            .collect(),
        LooseList::Text(s) => s.split(',').map(str::to_string).collect(),
        LooseList::Other(_) => Vec::new(),
    };
    Ok(names
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

pub(crate) fn string_set<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeSet<String>, D::Error> {
    Ok(string_list(deserializer)?.into_iter().collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseMap {
    Map(BTreeMap<String, Loose>),
    Other(IgnoredAny),
}

/// Per-location armour points keyed by location name; unknown keys are ignored
pub(crate) fn location_values<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PerLocation<i32>, D::Error> {
    let raw = match LooseMap::deserialize(deserializer)? {
        LooseMap::Map(map) => map,
        LooseMap::Other(_) => BTreeMap::new(),
    };
    let mut values = PerLocation::<i32>::default();
    for (key, value) in raw {
        match ArmourLocation::parse(&key) {
            Some(loc) => *values.get_mut(loc) = value.as_i32(),
            None => tracing::trace!(key = %key, "ignoring armour part for unknown location"),
        }
    }
    Ok(values)
}

/// Deserialize a list, dropping entries that do not fit `T`
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match LooseEntries::deserialize(deserializer)? {
        LooseEntries::List(values) => values,
        LooseEntries::Other(_) => Vec::new(),
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(index, %err, "dropping unreadable entry");
                None
            }
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseEntries {
    List(Vec<serde_json::Value>),
    Other(IgnoredAny),
}

/// Deserialize a keyed map, dropping entries that do not fit `T`
pub(crate) fn skip_invalid_entries<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match LooseKeyedEntries::deserialize(deserializer)? {
        LooseKeyedEntries::Map(values) => values,
        LooseKeyedEntries::Other(_) => BTreeMap::new(),
    };
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(entry) => Some((key, entry)),
            Err(err) => {
                tracing::debug!(key = %key, %err, "dropping unreadable entry");
                None
            }
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseKeyedEntries {
    Map(BTreeMap<String, serde_json::Value>),
    Other(IgnoredAny),
}

/// A nested record; anything that does not fit reads as `T::default()`
pub(crate) fn record_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::debug!(%err, "unreadable record, using defaults");
        T::default()
    }))
}
