// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use herdbook_grid::{Column, ColumnKind, ColumnSpec, Identified};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const ID_FIELD: &str = "id";

/// Identity of a free-form record: JSON ids may be integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id:?}"),
        }
    }
}

/// One object from a `--data` file. It serializes back to exactly the
/// object it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    id: RecordId,
    fields: Map<String, Value>,
}

impl JsonRecord {
    pub fn from_object(fields: Map<String, Value>) -> Option<Self> {
        let id = match fields.get(ID_FIELD)? {
            Value::Number(number) => RecordId::Number(number.as_i64()?),
            Value::String(text) if !text.is_empty() => RecordId::Text(text.clone()),
            _ => return None,
        };
        Some(Self { id, fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Identified for JsonRecord {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

impl Serialize for JsonRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

pub fn load_records(path: &Path) -> Result<Vec<JsonRecord>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read data file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse JSON data file {}", path.display()))?;
    let Value::Array(entries) = value else {
        bail!(
            "data file {} must contain a JSON array of objects",
            path.display()
        );
    };

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let Value::Object(fields) = entry else {
            bail!("entry {index} in {} is not a JSON object", path.display());
        };
        let record = JsonRecord::from_object(fields).ok_or_else(|| {
            anyhow!(
                "entry {index} in {} has no usable `id`; every record needs an integer or non-empty string id",
                path.display()
            )
        })?;
        if !seen.insert(record.id.clone()) {
            bail!(
                "entry {index} in {} repeats id {}; ids must be unique",
                path.display(),
                record.id
            );
        }
        records.push(record);
    }

    debug!(path = %path.display(), records = records.len(), "data file loaded");
    Ok(records)
}

/// Columns for a data file: the configured `[[columns]]` when present,
/// otherwise one column per top-level key of the first record.
pub fn columns_for(specs: &[ColumnSpec], records: &[JsonRecord]) -> Result<Vec<Column<JsonRecord>>> {
    if specs.is_empty() {
        return Ok(infer_columns(records));
    }
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            Column::from_spec(spec)
                .with_context(|| format!("build column {index} ({:?})", spec.header))
        })
        .collect()
}

pub fn infer_columns(records: &[JsonRecord]) -> Vec<Column<JsonRecord>> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut fields = first.fields().iter().collect::<Vec<_>>();
    fields.sort_by_key(|(key, _)| key.as_str() != ID_FIELD);

    let mut columns = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        if value.is_object() || value.is_array() {
            debug!(key = %key, "skipping nested field when inferring columns");
            continue;
        }
        if key.contains('.') {
            warn!(key = %key, "field name contains a dot and cannot be addressed by a column");
            continue;
        }
        let column = match Column::new(key.clone(), key) {
            Ok(column) => column,
            Err(error) => {
                warn!(key = %key, %error, "skipping field when inferring columns");
                continue;
            }
        };
        columns.push(if value.is_number() {
            column.kind(ColumnKind::Number)
        } else {
            column.filterable()
        });
    }
    columns
}
