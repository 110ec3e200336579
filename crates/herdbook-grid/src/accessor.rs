// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::Value;
use std::fmt;

use crate::error::{GridError, Result};

/// A dotted field path (`"medication.id"`) split into segments once, when the
/// column is configured. Resolution is a fixed number of map lookups per cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    path: String,
    segments: Vec<String>,
}

impl Accessor {
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(GridError::InvalidAccessor {
                path: path.to_owned(),
                reason: "path is empty",
            });
        }

        let segments = path.split('.').map(str::to_owned).collect::<Vec<_>>();
        if segments.iter().any(String::is_empty) {
            return Err(GridError::InvalidAccessor {
                path: path.to_owned(),
                reason: "path has an empty segment",
            });
        }

        Ok(Self {
            path: path.to_owned(),
            segments,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walks `record` one segment at a time. Any missing or non-container
    /// intermediate yields `None`; so does a JSON `null` leaf.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl TryFrom<&str> for Accessor {
    type Error = GridError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Accessor;
    use crate::GridError;
    use serde_json::json;

    #[test]
    fn resolves_nested_fields() -> anyhow::Result<()> {
        let accessor = Accessor::parse("medication.id")?;
        let row = json!({"medication": {"id": "M1"}});
        assert_eq!(accessor.resolve(&row), Some(&json!("M1")));
        Ok(())
    }

    #[test]
    fn missing_intermediate_short_circuits() -> anyhow::Result<()> {
        let accessor = Accessor::parse("medication.id")?;
        assert_eq!(accessor.resolve(&json!({})), None);
        assert_eq!(accessor.resolve(&json!({"medication": null})), None);
        assert_eq!(accessor.resolve(&json!({"medication": "M1"})), None);
        assert_eq!(accessor.resolve(&json!({"medication": 7})), None);
        Ok(())
    }

    #[test]
    fn numeric_segments_index_arrays() -> anyhow::Result<()> {
        let accessor = Accessor::parse("doses.1.ml")?;
        let row = json!({"doses": [{"ml": 2}, {"ml": 5}]});
        assert_eq!(accessor.resolve(&row), Some(&json!(5)));

        let out_of_range = Accessor::parse("doses.9.ml")?;
        assert_eq!(out_of_range.resolve(&row), None);

        let not_an_index = Accessor::parse("doses.first")?;
        assert_eq!(not_an_index.resolve(&row), None);
        Ok(())
    }

    #[test]
    fn null_leaf_is_absent() -> anyhow::Result<()> {
        let accessor = Accessor::parse("weight")?;
        assert_eq!(accessor.resolve(&json!({"weight": null})), None);
        Ok(())
    }

    #[test]
    fn rejects_empty_paths_and_segments() {
        for path in ["", ".", "a..b", ".a", "a."] {
            let error = Accessor::parse(path).expect_err("invalid accessor should fail");
            assert!(
                matches!(error, GridError::InvalidAccessor { .. }),
                "path {path:?}"
            );
        }
    }

    #[test]
    fn keeps_original_path_for_display() -> anyhow::Result<()> {
        let accessor = Accessor::try_from("pen.name")?;
        assert_eq!(accessor.path(), "pen.name");
        assert_eq!(accessor.to_string(), "pen.name");
        assert_eq!(accessor.segments(), ["pen", "name"]);
        Ok(())
    }
}
