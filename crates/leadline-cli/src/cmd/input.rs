//! JSON input files for `leadline timeline`.
//!
//! Each collection is a JSON array. A flag that is absent, or a path that
//! does not exist, reads as an empty collection, matching a service that
//! returned nothing.

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Read a JSON array of `T` from `path`.
pub fn load_json_array<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<Vec<T>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    if !path.exists() {
        debug!(path = %path.display(), "input file missing, treating as empty");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<T>>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_core::event::RemarkEntry;

    #[test]
    fn absent_or_missing_reads_empty() {
        let none: Vec<RemarkEntry> = load_json_array(None).unwrap();
        assert!(none.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let missing: Vec<RemarkEntry> =
            load_json_array(Some(&dir.path().join("nope.json"))).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn array_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remarks.json");
        std::fs::write(&path, r#"[{"id": "r1", "text": "hi"}]"#).unwrap();
        let remarks: Vec<RemarkEntry> = load_json_array(Some(&path)).unwrap();
        assert_eq!(remarks.len(), 1);
        assert_eq!(remarks[0].text.as_deref(), Some("hi"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_json_array::<RemarkEntry>(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
