// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use time::OffsetDateTime;

use crate::accessor::Accessor;
use crate::format::{ColumnKind, numeric_value, parse_datetime, plain_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: Accessor,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: Accessor) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: Accessor) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Normalized comparison key. Variant order is the rank used for mixed types.
#[derive(Debug, Clone)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Date(OffsetDateTime),
    Text(String),
    List(String),
    Object,
}

impl SortKey {
    fn from_value(value: &Value, kind: ColumnKind) -> Option<Self> {
        match kind {
            ColumnKind::Date => parse_datetime(value).map(Self::Date),
            ColumnKind::Number | ColumnKind::Currency => Some(
                numeric_value(value)
                    .map(Self::Number)
                    .unwrap_or_else(|| Self::natural(value)),
            ),
            ColumnKind::Text => Some(Self::natural(value)),
        }
    }

    fn natural(value: &Value) -> Self {
        match value {
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(number.to_string())),
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(_) => Self::List(plain_text(value)),
            Value::Null | Value::Object(_) => Self::Object,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Object => 5,
        }
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) | (Self::List(left), Self::List(right)) => {
                left.cmp(right)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compares two resolved values in ascending natural order. Absent values
/// (and dates that fail to parse) order after present ones.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>, kind: ColumnKind) -> Ordering {
    let left = left.and_then(|value| SortKey::from_value(value, kind));
    let right = right.and_then(|value| SortKey::from_value(value, kind));
    compare_keys(left.as_ref(), right.as_ref(), SortDirection::Ascending)
}

fn compare_keys(left: Option<&SortKey>, right: Option<&SortKey>, direction: SortDirection) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            SortDirection::Ascending => left.cmp_key(right),
            SortDirection::Descending => left.cmp_key(right).reverse(),
        },
    }
}

/// Reorders `rows` (dataset positions, already filtered) by the value at `key`.
///
/// Each row is decorated with its position in `rows` and that position is the
/// final tie-break, so equal keys keep their incoming order even though the
/// underlying sort is unstable.
pub fn sort_rows(
    rows: &mut Vec<usize>,
    projections: &[Value],
    key: &Accessor,
    kind: ColumnKind,
    direction: SortDirection,
) {
    let mut decorated = rows
        .iter()
        .enumerate()
        .map(|(position, &row)| {
            let sort_key = projections
                .get(row)
                .and_then(|projected| key.resolve(projected))
                .and_then(|value| SortKey::from_value(value, kind));
            (position, row, sort_key)
        })
        .collect::<Vec<_>>();

    decorated.sort_unstable_by(|(left_pos, _, left_key), (right_pos, _, right_key)| {
        compare_keys(left_key.as_ref(), right_key.as_ref(), direction)
            .then_with(|| left_pos.cmp(right_pos))
    });

    *rows = decorated.into_iter().map(|(_, row, _)| row).collect();
}
