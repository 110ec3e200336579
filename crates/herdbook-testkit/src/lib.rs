// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use herdbook_app::{
    Animal, AnimalId, AnimalRef, Dose, DoseId, DoseRoute, Feeding, FeedingId, Medication,
    MedicationId, MedicationPackage, MedicationRef, PackageId, Pen, PenId, PenRef, Sex, Species,
};
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration};

const REFERENCE_DAY: Date = date!(2026 - 01 - 01);

const PEN_NAMES: [&str; 10] = [
    "North Paddock",
    "South Paddock",
    "Calving Barn",
    "Creek Lot",
    "Hospital Pen",
    "Weaning Pen",
    "Ridge Pasture",
    "Old Orchard",
    "Feedlot A",
    "Feedlot B",
];

const BREEDS: [(Species, &[&str]); 4] = [
    (
        Species::Cattle,
        &["Angus", "Hereford", "Holstein", "Jersey", "Simmental", "Charolais"],
    ),
    (Species::Sheep, &["Merino", "Suffolk", "Dorper", "Katahdin"]),
    (Species::Goat, &["Boer", "Nubian", "Alpine", "Kiko"]),
    (Species::Pig, &["Berkshire", "Duroc", "Hampshire", "Large White"]),
];

const ANIMAL_NAMES: [&str; 20] = [
    "Bessie", "Clover", "Daisy", "Maple", "Hazel", "Juniper", "Pepper", "Willow", "Biscuit",
    "Rosie", "Ginger", "Buttercup", "Duke", "Moose", "Tank", "Otis", "Penny", "Sage", "Thistle",
    "Winnie",
];

/// `(name, active ingredient, withdrawal days, unit)`
const MEDICATIONS: [(&str, &str, i32, &str); 8] = [
    ("LA-200", "oxytetracycline", 28, "ml"),
    ("Excede", "ceftiofur", 13, "ml"),
    ("Dectomax", "doramectin", 35, "ml"),
    ("Banamine", "flunixin", 4, "ml"),
    ("Penicillin G", "procaine penicillin", 10, "ml"),
    ("Safe-Guard", "fenbendazole", 8, "g"),
    ("Ivomec Pour-On", "ivermectin", 48, "ml"),
    ("Draxxin", "tulathromycin", 18, "ml"),
];

const RATIONS: [&str; 8] = [
    "Grass hay",
    "Alfalfa hay",
    "Corn silage",
    "Creep feed",
    "Finishing ration",
    "Mineral mix",
    "Barley mash",
    "Lactation TMR",
];

const NOTE_WORDS: [&str; 20] = [
    "left",
    "right",
    "neck",
    "flank",
    "recheck",
    "limping",
    "cough",
    "fever",
    "calm",
    "restless",
    "booster",
    "weaned",
    "treated",
    "observed",
    "appetite",
    "normal",
    "swelling",
    "follow-up",
    "pasture",
    "isolated",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Every record of a demo herd, with references already wired together.
#[derive(Debug, Clone, PartialEq)]
pub struct Herd {
    pub pens: Vec<Pen>,
    pub animals: Vec<Animal>,
    pub medications: Vec<Medication>,
    pub packages: Vec<MedicationPackage>,
    pub doses: Vec<Dose>,
    pub feedings: Vec<Feeding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HerdSize {
    pub pens: usize,
    pub animals: usize,
    pub packages: usize,
    pub doses: usize,
    pub feedings: usize,
}

impl Default for HerdSize {
    fn default() -> Self {
        Self {
            pens: 6,
            animals: 48,
            packages: 24,
            doses: 60,
            feedings: 90,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HerdFaker {
    rng: DeterministicRng,
    seed: u64,
    next_tag: usize,
}

impl HerdFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            next_tag: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn herd(&mut self, size: HerdSize) -> Herd {
        let pens = (1..=size.pens.max(1))
            .map(|id| self.pen(PenId::new(id as i64)))
            .collect::<Vec<_>>();
        let animals = (1..=size.animals)
            .map(|id| {
                let pen = self.pick_record(&pens);
                self.animal(AnimalId::new(id as i64), pen)
            })
            .collect::<Vec<_>>();
        let medications = (1..=MEDICATIONS.len())
            .map(|id| medication(MedicationId::new(id as i64), MEDICATIONS[id - 1]))
            .collect::<Vec<_>>();
        let packages = (1..=size.packages)
            .map(|id| {
                let medication = self.pick_record(&medications);
                self.package(PackageId::new(id as i64), medication)
            })
            .collect::<Vec<_>>();
        let doses = if animals.is_empty() || packages.is_empty() {
            Vec::new()
        } else {
            (1..=size.doses)
                .map(|id| {
                    let animal = self.pick_record(&animals);
                    let package = self.pick_record(&packages);
                    self.dose(DoseId::new(id as i64), animal, package, &medications)
                })
                .collect()
        };
        let feedings = (1..=size.feedings)
            .map(|id| {
                let pen = self.pick_record(&pens);
                self.feeding(FeedingId::new(id as i64), pen)
            })
            .collect();

        Herd {
            pens,
            animals,
            medications,
            packages,
            doses,
            feedings,
        }
    }

    pub fn pen(&mut self, id: PenId) -> Pen {
        let index = (id.get().unsigned_abs() as usize).saturating_sub(1);
        let base = PEN_NAMES[index % PEN_NAMES.len()];
        let name = if index >= PEN_NAMES.len() {
            format!("{base} {}", id.get())
        } else {
            base.to_owned()
        };
        Pen {
            id,
            name,
            capacity: self.int_range(10, 80) as i32,
        }
    }

    /// Animals are tagged `US-0001`, `US-0002`, ... in creation order. Roughly
    /// one in ten has no pen, no birth date, or no recorded weight.
    pub fn animal(&mut self, id: AnimalId, pen: &Pen) -> Animal {
        let (species, breeds) = BREEDS[self.rng.int_n(BREEDS.len())];
        let sex = Sex::ALL[self.rng.int_n(Sex::ALL.len())];
        let tag = format!("US-{:04}", self.next_tag);
        self.next_tag += 1;

        Animal {
            id,
            tag,
            name: self.pick(&ANIMAL_NAMES).to_owned(),
            species,
            sex,
            breed: self.pick(breeds).to_owned(),
            birth_date: (!self.rng.chance(10)).then(|| self.day_before_reference(365 * 6)),
            pen: (!self.rng.chance(10)).then(|| PenRef::from(pen)),
            weight_kg: (!self.rng.chance(10)).then(|| self.weight_for(species)),
        }
    }

    pub fn package(&mut self, id: PackageId, medication: &Medication) -> MedicationPackage {
        let received_on = self.day_before_reference(400);
        let shelf_days = self.int_range(180, 900);
        let prefix = medication
            .name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(2)
            .collect::<String>()
            .to_uppercase();

        MedicationPackage {
            id,
            lot_number: format!("{prefix}-{:05}", self.int_range(1000, 99_999)),
            medication: (!self.rng.chance(5)).then(|| MedicationRef::from(medication)),
            quantity: (self.int_range(1, 20) * 50) as f64,
            unit: medication_unit(medication).to_owned(),
            unit_price: self.int_range(5, 250) as f64 / 100.0,
            received_on,
            expires_on: (!self.rng.chance(15)).then(|| add_days(received_on, shelf_days)),
        }
    }

    /// The dose's medication comes from the package when it still names one,
    /// otherwise from the catalogue.
    pub fn dose(
        &mut self,
        id: DoseId,
        animal: &Animal,
        package: &MedicationPackage,
        medications: &[Medication],
    ) -> Dose {
        let medication = package.medication.clone().unwrap_or_else(|| {
            MedicationRef::from(self.pick_record(medications))
        });
        let route = DoseRoute::ALL[self.rng.int_n(DoseRoute::ALL.len())];

        Dose {
            id,
            animal: AnimalRef::from(animal),
            package_id: package.id,
            medication,
            amount: self.int_range(5, 200) as f64 / 2.0,
            unit: package.unit.clone(),
            route,
            given_on: self.day_before_reference(240),
            notes: self.notes(),
        }
    }

    pub fn feeding(&mut self, id: FeedingId, pen: &Pen) -> Feeding {
        let quantity_kg = self.int_range(20, 900) as f64;
        Feeding {
            id,
            pen: PenRef::from(pen),
            ration: self.pick(&RATIONS).to_owned(),
            quantity_kg,
            cost: (quantity_kg * self.int_range(8, 45) as f64).round() / 100.0,
            fed_on: self.day_before_reference(120),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn pick_record<'a, T>(&mut self, records: &'a [T]) -> &'a T {
        &records[self.rng.int_n(records.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn day_before_reference(&mut self, max_days: i64) -> Date {
        let back = self.int_range(0, max_days);
        add_days(REFERENCE_DAY, -back)
    }

    fn weight_for(&mut self, species: Species) -> f64 {
        let (min, max) = match species {
            Species::Cattle => (180, 900),
            Species::Sheep => (35, 120),
            Species::Goat => (25, 95),
            Species::Pig => (60, 300),
        };
        self.int_range(min * 10, max * 10) as f64 / 10.0
    }

    fn notes(&mut self) -> String {
        if self.rng.chance(40) {
            return String::new();
        }
        let count = self.int_range(1, 4) as usize;
        (0..count)
            .map(|_| self.pick(&NOTE_WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn demo_herd(seed: u64) -> Herd {
    HerdFaker::new(seed).herd(HerdSize::default())
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn reference_day() -> Date {
    REFERENCE_DAY
}

fn medication(id: MedicationId, spec: (&str, &str, i32, &str)) -> Medication {
    let (name, active_ingredient, withdrawal_days, _) = spec;
    Medication {
        id,
        name: name.to_owned(),
        active_ingredient: active_ingredient.to_owned(),
        withdrawal_days,
    }
}

fn medication_unit(medication: &Medication) -> &'static str {
    MEDICATIONS
        .iter()
        .find(|(name, ..)| *name == medication.name)
        .map(|(.., unit)| *unit)
        .unwrap_or("ml")
}

fn add_days(day: Date, days: i64) -> Date {
    day.checked_add(Duration::days(days)).unwrap_or(day)
}
