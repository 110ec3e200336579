// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use herdbook_grid::{Column, ColumnKind, Result, SelectionMode, format_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Animal, Dose, Feeding, MedicationPackage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Animals,
    Packages,
    Doses,
    Feedings,
}

impl ViewKind {
    pub const ALL: [Self; 4] = [Self::Animals, Self::Packages, Self::Doses, Self::Feedings];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Packages => "packages",
            Self::Doses => "doses",
            Self::Feedings => "feedings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "animals" => Some(Self::Animals),
            "packages" => Some(Self::Packages),
            "doses" => Some(Self::Doses),
            "feedings" => Some(Self::Feedings),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Animals => "herd",
            Self::Packages => "medication packages",
            Self::Doses => "dose log",
            Self::Feedings => "feedings",
        }
    }

    /// Selection mode used when the view is opened as a picker. A dose is
    /// always picked alone; the other views feed batch actions.
    pub const fn picker_mode(self) -> SelectionMode {
        match self {
            Self::Doses => SelectionMode::Single,
            Self::Animals | Self::Packages | Self::Feedings => SelectionMode::Multiple,
        }
    }
}

pub fn animal_columns() -> Result<Vec<Column<Animal>>> {
    Ok(vec![
        Column::new("Tag", "tag")?.filterable(),
        Column::new("Name", "name")?.filterable(),
        Column::new("Species", "species")?.filterable(),
        Column::new("Sex", "sex")?,
        Column::new("Breed", "breed")?.filterable(),
        Column::new("Pen", "pen.name")?.filterable(),
        Column::new("Born", "birth_date")?.kind(ColumnKind::Date),
        Column::new("Weight (kg)", "weight_kg")?.kind(ColumnKind::Number),
    ])
}

pub fn package_columns() -> Result<Vec<Column<MedicationPackage>>> {
    Ok(vec![
        Column::new("Lot", "lot_number")?.filterable(),
        Column::new("Medication", "medication.name")?.filterable(),
        Column::new("Med ID", "medication.id")?.filterable(),
        Column::<MedicationPackage>::new("Stock", "quantity")?
            .kind(ColumnKind::Number)
            .render(|quantity, package, _| with_unit(quantity, &package.unit)),
        Column::new("Unit price", "unit_price")?.kind(ColumnKind::Currency),
        Column::new("Received", "received_on")?.kind(ColumnKind::Date),
        Column::new("Expires", "expires_on")?.kind(ColumnKind::Date),
    ])
}

pub fn dose_columns() -> Result<Vec<Column<Dose>>> {
    Ok(vec![
        Column::new("Given", "given_on")?.kind(ColumnKind::Date),
        Column::new("Animal", "animal.tag")?.filterable(),
        Column::new("Medication", "medication.name")?.filterable(),
        Column::<Dose>::new("Amount", "amount")?
            .kind(ColumnKind::Number)
            .render(|amount, dose, _| with_unit(amount, &dose.unit)),
        Column::new("Route", "route")?.filterable(),
        Column::<Dose>::new("Clear after", "medication.withdrawal_days")?
            .kind(ColumnKind::Number)
            .render(|_, dose, _| {
                dose.withdrawal_ends()
                    .map(|day| format_value(Some(&Value::String(day.to_string())), ColumnKind::Date))
                    .unwrap_or_default()
            }),
        Column::new("Notes", "notes")?.filterable(),
    ])
}

pub fn feeding_columns() -> Result<Vec<Column<Feeding>>> {
    Ok(vec![
        Column::new("Fed", "fed_on")?.kind(ColumnKind::Date),
        Column::new("Pen", "pen.name")?.filterable(),
        Column::new("Ration", "ration")?.filterable(),
        Column::new("Quantity (kg)", "quantity_kg")?.kind(ColumnKind::Number),
        Column::new("Cost", "cost")?.kind(ColumnKind::Currency),
    ])
}

fn with_unit(value: Option<&Value>, unit: &str) -> String {
    let amount = format_value(value, ColumnKind::Number);
    if amount.is_empty() {
        return amount;
    }
    format!("{amount} {unit}")
}
