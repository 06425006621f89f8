use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::Interpretation;

/// An observation as delivered by the results API, timestamp still unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    pub obs_datetime: String,
    pub value: String,
    #[serde(default)]
    pub interpretation: Interpretation,
}

impl RawObservation {
    pub fn new(obs_datetime: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            obs_datetime: obs_datetime.into(),
            value: value.into(),
            interpretation: Interpretation::Normal,
        }
    }

    #[must_use]
    pub fn with_interpretation(mut self, interpretation: Interpretation) -> Self {
        self.interpretation = interpretation;
        self
    }
}

/// A single lab result placed on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: String,
    pub interpretation: Interpretation,
    pub timestamp: NaiveDateTime,
}

/// One test concept as delivered by the results API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestRow {
    pub display: String,
    #[serde(default)]
    pub concept_uuid: String,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    pub flat_name: String,
    #[serde(default, alias = "entries")]
    pub observations: Vec<RawObservation>,
}

impl RawTestRow {
    pub fn new(display: impl Into<String>, flat_name: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            concept_uuid: String::new(),
            units: None,
            range: None,
            flat_name: flat_name.into(),
            observations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_observation(mut self, observation: RawObservation) -> Self {
        self.observations.push(observation);
        self
    }
}

/// One test concept tracked over time.
///
/// `entries` is keyed by the column index of the shared [`crate::TimeAxis`];
/// absent keys render as blank cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRow {
    pub display: String,
    pub concept_uuid: String,
    pub units: String,
    pub range: String,
    pub flat_name: String,
    pub entries: BTreeMap<usize, Observation>,
}

impl TestRow {
    /// Build an empty row carrying the descriptive fields of `raw`.
    pub fn from_raw(raw: &RawTestRow) -> Self {
        Self {
            display: raw.display.clone(),
            concept_uuid: raw.concept_uuid.clone(),
            units: raw.units.clone().unwrap_or_default(),
            range: raw.range.clone().unwrap_or_default(),
            flat_name: raw.flat_name.clone(),
            entries: BTreeMap::new(),
        }
    }

    /// Observation in column `index`, if any.
    pub fn entry(&self, index: usize) -> Option<&Observation> {
        self.entries.get(&index)
    }
}
