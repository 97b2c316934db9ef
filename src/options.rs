// options.rs - Known subject/backdrop values offered to the user
use serde::Serialize;

use crate::types::{SelectionField, SubjectSelection};

pub const SEED_SUBJECTS: [&str; 7] = [
    "Giant Snake",
    "Enormous Turtle",
    "Massive Alligator",
    "Huge Wild Boar",
    "Large Stag",
    "Grizzly Bear",
    "Moose",
];

pub const SEED_BACKDROPS: [&str; 6] = [
    "Muddy Riverbank",
    "Grassy Lakeshore",
    "Dense Jungle",
    "Rocky Mountain Pass",
    "Sun-drenched Meadow",
    "Boreal Forest",
];

/// Ordered set of option values. New values are prepended; values are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    pub fn from_seed(seed: &[&str]) -> Self {
        let mut set = Self { values: Vec::with_capacity(seed.len()) };
        for value in seed {
            if !set.contains(value) {
                set.values.push((*value).to_string());
            }
        }
        set
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Prepends `value` unless already present. Returns whether the set grew.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.values.insert(0, value.to_string());
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One option set per selection field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCatalog {
    pub primary: OptionSet,
    pub secondary: OptionSet,
    pub backdrop: OptionSet,
}

impl Default for OptionCatalog {
    fn default() -> Self {
        Self {
            primary: OptionSet::from_seed(&SEED_SUBJECTS),
            secondary: OptionSet::from_seed(&SEED_SUBJECTS),
            backdrop: OptionSet::from_seed(&SEED_BACKDROPS),
        }
    }
}

impl OptionCatalog {
    pub fn field(&self, field: SelectionField) -> &OptionSet {
        match field {
            SelectionField::Primary => &self.primary,
            SelectionField::Secondary => &self.secondary,
            SelectionField::Backdrop => &self.backdrop,
        }
    }

    /// Initial selection: first subject, second subject, first backdrop
    pub fn default_selection(&self) -> SubjectSelection {
        SubjectSelection {
            primary: self.primary.get(0).unwrap_or(SEED_SUBJECTS[0]).to_string(),
            secondary: self.secondary.get(1).unwrap_or(SEED_SUBJECTS[1]).to_string(),
            backdrop: self.backdrop.get(0).unwrap_or(SEED_BACKDROPS[0]).to_string(),
        }
    }
}
