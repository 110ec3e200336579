// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::Value;

use crate::column::Column;
use crate::format::plain_text;

/// Returns the dataset positions of rows matching `query`, in dataset order.
///
/// A row matches when any filterable column's value contains the query,
/// case-insensitively. An empty query matches everything.
pub fn filter_rows<T>(projections: &[Value], columns: &[Column<T>], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..projections.len()).collect();
    }

    let needle = query.to_lowercase();
    let searchable = columns
        .iter()
        .filter(|column| column.is_filterable())
        .collect::<Vec<_>>();

    projections
        .iter()
        .enumerate()
        .filter(|(_, projected)| {
            searchable.iter().any(|column| {
                column
                    .resolve(projected)
                    .map(|value| plain_text(value).to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .map(|(index, _)| index)
        .collect()
}
