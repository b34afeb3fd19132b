//! Flexible id deserialization
//!
//! The catalog backend emits ids both as JSON integers and as numeric
//! strings (`42` and `"42"`). Both forms normalize to `i64` so id
//! comparisons never mix representations.

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    fn normalize<E: de::Error>(self) -> Result<i64, E> {
        match self {
            RawId::Int(id) => Ok(id),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid id: {:?}", s))),
        }
    }
}

/// Deserialize an id that may be an integer or a numeric string
pub fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.normalize()
}

/// Deserialize an optional id that may be an integer or a numeric string
pub fn flexible_id_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        Some(raw) => raw.normalize().map(Some),
        None => Ok(None),
    }
}
