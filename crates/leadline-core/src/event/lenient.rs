//! Field deserializers that never fail a whole history page.
//!
//! The history services are loosely typed: nullable lists arrive as `null`,
//! ids arrive as numbers, and timestamps arrive as anything at all. Each
//! helper here maps an unexpected shape to the field's empty value so one
//! odd record cannot reject its siblings.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A JSON scalar as the history services send it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// A string field that may also arrive as a number. Any other shape,
/// including `null`, reads as `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

/// Like [`text`], for fields whose empty value is `""`.
pub(crate) fn text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// `null` reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A free-form JSON object. `null`, arrays, and scalars read as empty.
pub(crate) fn object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "text")]
        id: Option<String>,
        #[serde(deserialize_with = "text_or_default")]
        owner: String,
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "object")]
        extra: Map<String, Value>,
    }

    #[test]
    fn numbers_read_as_text() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "owner": 7}"#).unwrap();
        assert_eq!(row.id.as_deref(), Some("42"));
        assert_eq!(row.owner, "7");
    }

    #[test]
    fn odd_shapes_read_as_empty() {
        let row: Row =
            serde_json::from_str(r#"{"id": {"nested": true}, "owner": null, "tags": null}"#)
                .unwrap();
        assert_eq!(row.id, None);
        assert_eq!(row.owner, "");
        assert!(row.tags.is_empty());

        let row: Row =
            serde_json::from_str(r#"{"id": [1, 2], "owner": false, "extra": "n/a"}"#).unwrap();
        assert_eq!(row.id, None);
        assert_eq!(row.owner, "");
        assert!(row.extra.is_empty());
    }

    #[test]
    fn objects_pass_through() {
        let row: Row = serde_json::from_str(r#"{"extra": {"author": "Kim"}}"#).unwrap();
        assert_eq!(row.extra.get("author"), Some(&Value::from("Kim")));
    }
}
