// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// The one capability the grid needs from a row: a stable identity.
pub trait Identified {
    type Id: Clone + Ord + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// Projects a record into the JSON tree that accessors walk. A record that
/// cannot be serialized projects to `null`, so every accessor resolves to absent.
pub fn project<T: Serialize>(record: &T) -> Value {
    match serde_json::to_value(record) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "record projection failed; cells will render empty");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::project;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Package {
        id: u32,
        medication: Option<Medication>,
    }

    #[derive(Serialize)]
    struct Medication {
        id: &'static str,
    }

    #[test]
    fn projects_nested_structs() {
        let package = Package {
            id: 3,
            medication: Some(Medication { id: "M1" }),
        };
        assert_eq!(project(&package), json!({"id": 3, "medication": {"id": "M1"}}));

        let orphan = Package {
            id: 4,
            medication: None,
        };
        assert_eq!(project(&orphan), json!({"id": 4, "medication": null}));
    }

    #[test]
    fn unserializable_records_project_to_null() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not JSON object keys");
        assert_eq!(project(&map), json!(null));
    }
}
