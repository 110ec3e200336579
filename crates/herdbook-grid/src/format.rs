// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{GridError, Result};

const NUMBER_FRACTION_DIGITS: usize = 3;

/// Semantic type of a column, used to pick a display format and an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Date,
    Currency,
}

impl ColumnKind {
    pub const ALL: [Self; 4] = [Self::Text, Self::Number, Self::Date, Self::Currency];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Currency => "currency",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "currency" => Ok(Self::Currency),
            other => Err(GridError::UnknownColumnKind(other.to_owned())),
        }
    }
}

impl TryFrom<String> for ColumnKind {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

/// Formats a resolved cell value for display. Never fails: absent values and
/// values that do not fit `kind` degrade to empty or plain text.
pub fn format_value(value: Option<&Value>, kind: ColumnKind) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match kind {
        ColumnKind::Text => plain_text(value),
        ColumnKind::Number => match value {
            Value::Number(number) => format_grouped_number(number),
            Value::String(raw) => parse_numeric_text(raw)
                .map(format_grouped_f64)
                .unwrap_or_else(|| raw.clone()),
            other => plain_text(other),
        },
        ColumnKind::Currency => match numeric_value(value) {
            Some(amount) => format_usd(amount),
            None => plain_text(value),
        },
        ColumnKind::Date => parse_datetime(value)
            .map(|moment| format_short_date(moment.date()))
            .unwrap_or_default(),
    }
}

/// The string form used for display of text columns and for filter matching.
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(plain_text)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_numeric_text(raw),
        _ => None,
    }
}

/// Parses the date shapes a REST payload tends to carry: `YYYY-MM-DD`, RFC 3339,
/// `YYYY-MM-DD HH:MM:SS`, and epoch milliseconds. Date-only values are UTC midnight.
pub(crate) fn parse_datetime(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(raw) => parse_datetime_text(raw.trim()),
        Value::Number(number) => {
            let millis = match number.as_i64() {
                Some(millis) => i128::from(millis),
                None => number.as_f64().filter(|millis| millis.is_finite())? as i128,
            };
            OffsetDateTime::from_unix_timestamp_nanos(millis.checked_mul(1_000_000)?).ok()
        }
        _ => None,
    }
}

fn parse_datetime_text(raw: &str) -> Option<OffsetDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }
    if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(moment);
    }
    PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

fn format_short_date(date: Date) -> String {
    date.format(format_description!(
        "[month padding:none]/[day padding:none]/[year]"
    ))
    .unwrap_or_default()
}

fn parse_numeric_text(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) if value == 0.0 => "0".to_owned(),
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{value:.0}"),
        Some(value) => value.to_string(),
        None => number.to_string(),
    }
}

fn format_grouped_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        let sign = if value < 0 { "-" } else { "" };
        return format!("{sign}{}", group_thousands(&value.unsigned_abs().to_string()));
    }
    if let Some(value) = number.as_u64() {
        return group_thousands(&value.to_string());
    }
    number
        .as_f64()
        .map(format_grouped_f64)
        .unwrap_or_else(|| number.to_string())
}

fn format_grouped_f64(value: f64) -> String {
    let fixed = format!("{:.*}", NUMBER_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let negative = value < 0.0 && (whole.bytes().any(|b| b != b'0') || !fraction.is_empty());

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
