//! Checkbox selection state for the panel filter.
//!
//! The grouper only ever sees an immutable [`FilterState`]; the mutating
//! helpers exist for the host that owns the checkboxes and hands a fresh
//! snapshot to each layout pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::panel::PanelNode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    checkboxes: BTreeMap<String, bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `leaves` registered and unchecked.
    pub fn from_leaves<I, S>(leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            checkboxes: leaves.into_iter().map(|leaf| (leaf.into(), false)).collect(),
        }
    }

    pub fn checkboxes(&self) -> &BTreeMap<String, bool> {
        &self.checkboxes
    }

    /// True if any checkbox is set. When false the timeline shows everything.
    pub fn some_checked(&self) -> bool {
        self.checkboxes.values().any(|checked| *checked)
    }

    pub fn is_checked(&self, flat_name: &str) -> bool {
        self.checkboxes.get(flat_name).copied().unwrap_or(false)
    }

    /// Checked flat names in sorted order.
    pub fn checked(&self) -> impl Iterator<Item = &str> {
        self.checkboxes
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(name, _)| name.as_str())
    }

    pub fn set_leaf(&mut self, flat_name: impl Into<String>, checked: bool) {
        self.checkboxes.insert(flat_name.into(), checked);
    }

    /// Flip one checkbox and return its new state.
    pub fn toggle_leaf(&mut self, flat_name: &str) -> bool {
        let entry = self.checkboxes.entry(flat_name.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Set every leaf in `leaves`, typically all leaves of one panel.
    pub fn set_leaves<I, S>(&mut self, leaves: I, checked: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for leaf in leaves {
            self.checkboxes.insert(leaf.into(), checked);
        }
    }

    /// Check or uncheck every leaf under `panel`.
    pub fn set_panel(&mut self, panel: &PanelNode, checked: bool) {
        self.set_leaves(panel.leaves.iter().cloned(), checked);
    }

    /// Uncheck everything, keeping the registered names.
    pub fn reset(&mut self) {
        for checked in self.checkboxes.values_mut() {
            *checked = false;
        }
    }
}

impl FromIterator<(String, bool)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self {
            checkboxes: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, bool>> for FilterState {
    fn from(checkboxes: BTreeMap<String, bool>) -> Self {
        Self { checkboxes }
    }
}
