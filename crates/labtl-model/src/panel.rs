use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Nested panel hierarchy as supplied by the filter collaborator.
///
/// A node without children is a test (leaf); anything else is a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTree {
    pub display: String,
    pub flat_name: String,
    #[serde(default, alias = "subSets")]
    pub children: Vec<PanelTree>,
}

impl PanelTree {
    pub fn leaf(display: impl Into<String>, flat_name: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            flat_name: flat_name.into(),
            children: Vec::new(),
        }
    }

    pub fn panel(
        display: impl Into<String>,
        flat_name: impl Into<String>,
        children: Vec<PanelTree>,
    ) -> Self {
        Self {
            display: display.into(),
            flat_name: flat_name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A grouping node of the panel forest, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelNode {
    pub flat_name: String,
    pub display: String,
    /// Distance from the root of its tree (roots are 0).
    pub depth: usize,
    pub parent: Option<String>,
    /// Every descendant flat name, panels and leaves.
    pub descendants: BTreeSet<String>,
    /// Descendant leaves in traversal order.
    pub leaves: Vec<String>,
    /// True when at least one direct child is a leaf.
    pub has_direct_leaves: bool,
}

impl PanelNode {
    pub fn contains(&self, flat_name: &str) -> bool {
        self.descendants.contains(flat_name)
    }
}
