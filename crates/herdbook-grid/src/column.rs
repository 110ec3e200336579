// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use crate::accessor::Accessor;
use crate::error::Result;
use crate::format::{ColumnKind, format_value};

/// Custom cell renderer: `(resolved value, row, row is selected) -> text`.
pub type RenderFn<T> = Rc<dyn Fn(Option<&Value>, &T, bool) -> String>;

/// Decided once per column when the column list is built, never per cell.
pub enum CellRenderer<T> {
    Formatted,
    Custom(RenderFn<T>),
}

impl<T> Clone for CellRenderer<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Formatted => Self::Formatted,
            Self::Custom(render) => Self::Custom(Rc::clone(render)),
        }
    }
}

impl<T> fmt::Debug for CellRenderer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formatted => f.write_str("Formatted"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Static description of one grid column.
///
/// ```ignore
/// let columns = vec![
///     Column::new("Lot", "lot_number")?.filterable(),
///     Column::new("Medication", "medication.id")?.filterable(),
///     Column::new("Unit price", "unit_price")?.kind(ColumnKind::Currency),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column<T> {
    header: String,
    accessor: Accessor,
    kind: ColumnKind,
    filterable: bool,
    renderer: CellRenderer<T>,
}

impl<T> Column<T> {
    pub fn new(header: impl Into<String>, accessor: &str) -> Result<Self> {
        Ok(Self {
            header: header.into(),
            accessor: Accessor::parse(accessor)?,
            kind: ColumnKind::Text,
            filterable: false,
            renderer: CellRenderer::Formatted,
        })
    }

    pub fn from_spec(spec: &ColumnSpec) -> Result<Self> {
        let column = Self::new(spec.header.clone(), &spec.accessor)?.kind(spec.kind);
        Ok(if spec.filterable {
            column.filterable()
        } else {
            column
        })
    }

    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the column as eligible for free-text search.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Replaces the value formatter for this column.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &T, bool) -> String + 'static,
    {
        self.renderer = CellRenderer::Custom(Rc::new(render));
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn value_kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn renderer(&self) -> &CellRenderer<T> {
        &self.renderer
    }

    pub fn resolve<'a>(&self, projected: &'a Value) -> Option<&'a Value> {
        self.accessor.resolve(projected)
    }

    pub fn cell_text(&self, projected: &Value, row: &T, selected: bool) -> String {
        let value = self.accessor.resolve(projected);
        match &self.renderer {
            CellRenderer::Formatted => format_value(value, self.kind),
            CellRenderer::Custom(render) => render(value, row, selected),
        }
    }
}

/// Declarative column description, loadable from TOML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub accessor: String,
    #[serde(default, rename = "type")]
    pub kind: ColumnKind,
    #[serde(default)]
    pub filterable: bool,
}

#[cfg(test)]
mod tests {
    use super::{CellRenderer, Column, ColumnSpec};
    use crate::format::ColumnKind;
    use serde_json::json;

    #[derive(Debug)]
    struct Pen {
        name: &'static str,
    }

    #[test]
    fn formatted_cells_use_column_kind() -> anyhow::Result<()> {
        let column = Column::<Pen>::new("Cost", "cost")?.kind(ColumnKind::Currency);
        let row = Pen { name: "north" };
        assert_eq!(column.cell_text(&json!({"cost": 12}), &row, false), "$12.00");
        assert_eq!(column.cell_text(&json!({}), &row, false), "");
        Ok(())
    }

    #[test]
    fn custom_renderer_bypasses_formatter() -> anyhow::Result<()> {
        let column = Column::<Pen>::new("Pen", "pen.id")?
            .kind(ColumnKind::Number)
            .render(|value, row, selected| {
                let id = value.and_then(|value| value.as_i64()).unwrap_or_default();
                let mark = if selected { "*" } else { "" };
                format!("{mark}{}#{id}", row.name)
            });
        assert!(matches!(column.renderer(), CellRenderer::Custom(_)));

        let row = Pen { name: "south" };
        let projected = json!({"pen": {"id": 4000}});
        assert_eq!(column.cell_text(&projected, &row, true), "*south#4000");
        assert_eq!(column.cell_text(&json!({}), &row, false), "south#0");
        Ok(())
    }

    #[test]
    fn spec_builds_column() -> anyhow::Result<()> {
        let spec: ColumnSpec = serde_json::from_value(json!({
            "header": "Withdrawal",
            "accessor": "medication.withdrawal_days",
            "type": "number",
            "filterable": true,
        }))?;
        let column = Column::<Pen>::from_spec(&spec)?;
        assert_eq!(column.header(), "Withdrawal");
        assert_eq!(column.accessor().path(), "medication.withdrawal_days");
        assert_eq!(column.value_kind(), ColumnKind::Number);
        assert!(column.is_filterable());
        Ok(())
    }

    #[test]
    fn spec_defaults_to_plain_unfilterable_text() -> anyhow::Result<()> {
        let spec: ColumnSpec = serde_json::from_value(json!({
            "header": "Tag",
            "accessor": "tag",
        }))?;
        assert_eq!(spec.kind, ColumnKind::Text);
        assert!(!spec.filterable);
        Ok(())
    }

    #[test]
    fn spec_names_valid_types_for_unknown_type() -> anyhow::Result<()> {
        let error = serde_json::from_value::<ColumnSpec>(json!({
            "header": "Share",
            "accessor": "share",
            "type": "percent",
        }))
        .expect_err("percent is not a column type");
        let message = error.to_string();
        assert!(message.contains("\"percent\""), "unexpected message: {message}");
        assert!(
            message.contains("use one of: text, number, date, currency"),
            "unexpected message: {message}"
        );

        let spec: ColumnSpec = serde_json::from_value(json!({
            "header": "Price",
            "accessor": "unit_price",
            "type": "currency",
        }))?;
        assert_eq!(spec.kind, ColumnKind::Currency);
        Ok(())
    }

    #[test]
    fn spec_with_bad_accessor_fails() {
        let spec = ColumnSpec {
            header: "Broken".to_owned(),
            accessor: "medication..id".to_owned(),
            kind: ColumnKind::Text,
            filterable: false,
        };
        assert!(Column::<Pen>::from_spec(&spec).is_err());
    }
}
