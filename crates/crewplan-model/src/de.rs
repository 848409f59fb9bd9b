//! Lenient field deserializers
//!
//! Hand-off documents come from several writers: some store assignees as an
//! array, some leave durations `null`. These helpers accept every shape seen
//! in practice and let normalization supply the sentinels afterwards.

use crate::plan::join_names;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrSeq {
    One(String),
    Many(Vec<String>),
}

/// Accept `"a, b"`, `["a", "b"]` or `null`
pub(crate) fn string_or_seq<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrSeq>::deserialize(deserializer)? {
        Some(StringOrSeq::One(s)) => s,
        Some(StringOrSeq::Many(names)) => join_names(&names),
        None => String::new(),
    })
}

/// Accept a string or `null`
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept an array of strings or `null`
pub(crate) fn seq_or_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept resource names as strings, or as `{"name": .., "role": ..}` records
///
/// Record entries render as `name (role)` when a role is present; entries
/// that are neither are skipped.
pub(crate) fn resource_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => {
                let name = map.get("name")?.as_str()?.to_string();
                match map.get("role").and_then(serde_json::Value::as_str) {
                    Some(role) if !role.is_empty() => Some(format!("{name} ({role})")),
                    _ => Some(name),
                }
            }
            _ => None,
        })
        .collect())
}
