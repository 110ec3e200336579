// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use herdbook_grid::Identified;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Cattle,
    Sheep,
    Goat,
    Pig,
}

impl Species {
    pub const ALL: [Self; 4] = [Self::Cattle, Self::Sheep, Self::Goat, Self::Pig];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cattle => "cattle",
            Self::Sheep => "sheep",
            Self::Goat => "goat",
            Self::Pig => "pig",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cattle" => Some(Self::Cattle),
            "sheep" => Some(Self::Sheep),
            "goat" => Some(Self::Goat),
            "pig" => Some(Self::Pig),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
    Castrated,
}

impl Sex {
    pub const ALL: [Self; 3] = [Self::Female, Self::Male, Self::Castrated];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Castrated => "castrated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "female" => Some(Self::Female),
            "male" => Some(Self::Male),
            "castrated" => Some(Self::Castrated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseRoute {
    Oral,
    Injection,
    PourOn,
    Topical,
}

impl DoseRoute {
    pub const ALL: [Self; 4] = [Self::Oral, Self::Injection, Self::PourOn, Self::Topical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oral => "oral",
            Self::Injection => "injection",
            Self::PourOn => "pour_on",
            Self::Topical => "topical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "oral" => Some(Self::Oral),
            "injection" => Some(Self::Injection),
            "pour_on" => Some(Self::PourOn),
            "topical" => Some(Self::Topical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pen {
    pub id: PenId,
    pub name: String,
    pub capacity: i32,
}

/// Embedded reference to a pen, as carried on animals and feedings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenRef {
    pub id: PenId,
    pub name: String,
}

impl From<&Pen> for PenRef {
    fn from(pen: &Pen) -> Self {
        Self {
            id: pen.id,
            name: pen.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub tag: String,
    pub name: String,
    pub species: Species,
    pub sex: Sex,
    pub breed: String,
    pub birth_date: Option<Date>,
    pub pen: Option<PenRef>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRef {
    pub id: AnimalId,
    pub tag: String,
}

impl From<&Animal> for AnimalRef {
    fn from(animal: &Animal) -> Self {
        Self {
            id: animal.id,
            tag: animal.tag.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    pub active_ingredient: String,
    pub withdrawal_days: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRef {
    pub id: MedicationId,
    pub name: String,
    pub withdrawal_days: i32,
}

impl From<&Medication> for MedicationRef {
    fn from(medication: &Medication) -> Self {
        Self {
            id: medication.id,
            name: medication.name.clone(),
            withdrawal_days: medication.withdrawal_days,
        }
    }
}

/// A purchased lot of one medication. `medication` is `None` when the
/// medication record was removed after the package was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationPackage {
    pub id: PackageId,
    pub lot_number: String,
    pub medication: Option<MedicationRef>,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub received_on: Date,
    pub expires_on: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    pub id: DoseId,
    pub animal: AnimalRef,
    pub package_id: PackageId,
    pub medication: MedicationRef,
    pub amount: f64,
    pub unit: String,
    pub route: DoseRoute,
    pub given_on: Date,
    pub notes: String,
}

impl Dose {
    /// First day the animal's milk or meat may ship again.
    pub fn withdrawal_ends(&self) -> Option<Date> {
        self.given_on
            .checked_add(time::Duration::days(i64::from(self.medication.withdrawal_days)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeding {
    pub id: FeedingId,
    pub pen: PenRef,
    pub ration: String,
    pub quantity_kg: f64,
    pub cost: f64,
    pub fed_on: Date,
}

macro_rules! identified {
    ($record:ty, $id:ty) => {
        impl Identified for $record {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }
        }
    };
}

identified!(Pen, PenId);
identified!(Animal, AnimalId);
identified!(Medication, MedicationId);
identified!(MedicationPackage, PackageId);
identified!(Dose, DoseId);
identified!(Feeding, FeedingId);
