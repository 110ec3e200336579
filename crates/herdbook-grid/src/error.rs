// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Failures caused by a bad column list or grid setting. Malformed row data
/// never produces one; it degrades to empty display text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("accessor {path:?} is invalid: {reason}")]
    InvalidAccessor { path: String, reason: &'static str },
    #[error("rows per page must be positive")]
    ZeroRowsPerPage,
    #[error("column {index} does not exist; grid has {count} columns")]
    UnknownColumn { index: usize, count: usize },
    #[error("accessor {path:?} is used by more than one column")]
    DuplicateAccessor { path: String },
    #[error("unknown column type {0:?}; use one of: text, number, date, currency")]
    UnknownColumnKind(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
