// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Row selection by identity.
//!
//! The controller holds ids only, never row snapshots, and knows nothing
//! about the filter, sort, or page currently in effect. Rows are resolved
//! back against the full dataset when the caller is notified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::record::Identified;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Multiple,
}

impl SelectionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController<Id: Ord> {
    mode: SelectionMode,
    selected: BTreeSet<Id>,
}

impl<Id: Ord + Clone> SelectionController<Id> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switching to single mode with several rows selected clears the set.
    /// Returns true when the selection changed.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            self.selected.clear();
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }

    /// In single mode, checking a row replaces the whole selection.
    /// Returns true when the selection changed.
    pub fn select_row(&mut self, id: &Id, checked: bool) -> bool {
        match (self.mode, checked) {
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.clone());
                true
            }
            (SelectionMode::Multiple, true) => self.selected.insert(id.clone()),
            (_, false) => self.selected.remove(id),
        }
    }

    pub fn toggle_row(&mut self, id: &Id) -> bool {
        let checked = !self.is_selected(id);
        self.select_row(id, checked)
    }

    /// True when `visible` is non-empty and every id in it is selected.
    pub fn all_selected(&self, visible: &[Id]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id))
    }

    /// Page-scoped select-all: deselects exactly `visible` when all of it is
    /// already selected, otherwise adds all of `visible` to the selection.
    /// Selections made on other pages are left alone. A no-op in single mode
    /// and on an empty page.
    pub fn toggle_all(&mut self, visible: &[Id]) -> bool {
        if self.mode == SelectionMode::Single || visible.is_empty() {
            return false;
        }

        if self.all_selected(visible) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            for id in visible {
                self.selected.insert(id.clone());
            }
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Selected rows of `dataset`, in dataset order. Ids with no row in the
    /// current dataset are skipped, not dropped from the selection.
    pub fn resolve<'a, T>(&self, dataset: &'a [T]) -> Vec<&'a T>
    where
        T: Identified<Id = Id>,
    {
        if self.selected.is_empty() {
            return Vec::new();
        }
        dataset
            .iter()
            .filter(|row| self.selected.contains(&row.id()))
            .collect()
    }
}
