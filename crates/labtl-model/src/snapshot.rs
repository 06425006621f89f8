//! Explicit snapshot of the filter context consumed by one layout pass.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::FilterState;
use crate::observation::RawTestRow;
use crate::panel::PanelTree;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRows {
    #[serde(default, alias = "rows")]
    pub row_data: Option<Vec<RawTestRow>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub data: TimelineRows,
    #[serde(default)]
    pub loaded: bool,
}

/// Everything the grouped timeline reads from its surrounding filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterContextSnapshot {
    #[serde(default)]
    pub active_tests: Vec<String>,
    #[serde(default)]
    pub timeline_data: TimelineData,
    /// Panel hierarchy; when empty the hierarchy is derived from row flat names.
    #[serde(default, alias = "roots")]
    pub panels: Vec<PanelTree>,
    #[serde(default)]
    pub checkboxes: BTreeMap<String, bool>,
}

impl FilterContextSnapshot {
    /// # Errors
    ///
    /// Returns [`crate::TimelineError::Json`] when `text` is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`crate::TimelineError::Io`] when the file cannot be read and
    /// [`crate::TimelineError::Json`] when it is not a valid snapshot.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn rows(&self) -> Option<&[RawTestRow]> {
        self.timeline_data.data.row_data.as_deref()
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState::from(self.checkboxes.clone())
    }
}
