//! Flattened panel hierarchy.
//!
//! Panels are keyed by flat name. Membership is decided on whole segments of
//! the flat name: `Hem.CBC` encloses `Hem.CBC.WBC` but `Hem.CB` does not.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use labtl_model::{PanelNode, PanelTree, Result, TimelineError};

/// Default separator between flat-name segments.
pub const DEFAULT_DELIMITER: char = '.';

/// True if `panel` is a strict ancestor of `flat_name`.
pub fn is_ancestor(panel: &str, flat_name: &str, delimiter: char) -> bool {
    flat_name.len() > panel.len()
        && flat_name.starts_with(panel)
        && flat_name[panel.len()..].starts_with(delimiter)
}

/// Reject delimiters that could appear inside an ordinary segment.
///
/// # Errors
///
/// Returns [`TimelineError::InvalidDelimiter`] for alphanumeric or whitespace characters.
pub fn validate_delimiter(delimiter: char) -> Result<()> {
    if delimiter.is_alphanumeric() || delimiter.is_whitespace() {
        return Err(TimelineError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PanelForest {
    delimiter: char,
    /// Panels in pre-order.
    nodes: Vec<PanelNode>,
    index: HashMap<String, usize>,
    /// Leaves in pre-order.
    leaves: Vec<String>,
}

impl PanelForest {
    /// Flatten a nested hierarchy. Nodes with children are panels.
    ///
    /// # Errors
    ///
    /// Fails on an invalid delimiter, an empty flat name, or a child whose flat
    /// name is not prefixed by its parent's.
    pub fn from_trees(trees: &[PanelTree], delimiter: char) -> Result<Self> {
        validate_delimiter(delimiter)?;
        let mut forest = Self {
            delimiter,
            nodes: Vec::new(),
            index: HashMap::new(),
            leaves: Vec::new(),
        };
        for tree in trees {
            forest.flatten(tree, None, 0)?;
        }
        Ok(forest)
    }

    /// Derive the hierarchy from the ancestry encoded in flat names.
    ///
    /// Every strict prefix becomes a panel labelled with its last segment.
    /// Names with an empty segment are skipped.
    ///
    /// # Errors
    ///
    /// Fails on an invalid delimiter.
    pub fn from_flat_names<'a, I>(flat_names: I, delimiter: char) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        validate_delimiter(delimiter)?;
        let mut roots: Vec<PanelTree> = Vec::new();
        for flat_name in flat_names {
            if flat_name.split(delimiter).any(str::is_empty) {
                warn!(flat_name, "ignoring flat name with an empty segment");
                continue;
            }
            insert_path(&mut roots, flat_name, delimiter);
        }
        Self::from_trees(&roots, delimiter)
    }

    fn flatten(&mut self, tree: &PanelTree, parent: Option<&str>, depth: usize) -> Result<()> {
        if tree.flat_name.is_empty() {
            return Err(TimelineError::EmptyFlatName);
        }
        if let Some(parent) = parent
            && !is_ancestor(parent, &tree.flat_name, self.delimiter)
        {
            return Err(TimelineError::InconsistentHierarchy {
                parent: parent.to_string(),
                child: tree.flat_name.clone(),
            });
        }

        if tree.is_leaf() {
            self.leaves.push(tree.flat_name.clone());
            return Ok(());
        }

        if self.index.contains_key(&tree.flat_name) {
            warn!(flat_name = %tree.flat_name, "duplicate panel ignored");
            return Ok(());
        }

        let position = self.nodes.len();
        self.index.insert(tree.flat_name.clone(), position);
        self.nodes.push(PanelNode {
            flat_name: tree.flat_name.clone(),
            display: tree.display.clone(),
            depth,
            parent: parent.map(str::to_string),
            descendants: BTreeSet::new(),
            leaves: Vec::new(),
            has_direct_leaves: tree.children.iter().any(PanelTree::is_leaf),
        });

        let leaves_before = self.leaves.len();
        let nodes_before = self.nodes.len();
        for child in &tree.children {
            self.flatten(child, Some(&tree.flat_name), depth + 1)?;
        }

        let mut descendants: BTreeSet<String> = self.nodes[nodes_before..]
            .iter()
            .map(|node| node.flat_name.clone())
            .collect();
        let leaves = self.leaves[leaves_before..].to_vec();
        descendants.extend(leaves.iter().cloned());

        let node = &mut self.nodes[position];
        node.descendants = descendants;
        node.leaves = leaves;
        Ok(())
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Panels in pre-order.
    pub fn panels(&self) -> &[PanelNode] {
        &self.nodes
    }

    pub fn panel(&self, flat_name: &str) -> Option<&PanelNode> {
        self.index.get(flat_name).map(|&position| &self.nodes[position])
    }

    /// Leaf flat names in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        self.leaves.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panel flat name mapped to its descendant leaves.
    pub fn parents(&self) -> BTreeMap<String, Vec<String>> {
        self.nodes
            .iter()
            .map(|node| (node.flat_name.clone(), node.leaves.clone()))
            .collect()
    }

    /// The most specific known panel strictly enclosing `flat_name`.
    pub fn nearest_panel(&self, flat_name: &str) -> Option<&PanelNode> {
        flat_name
            .rmatch_indices(self.delimiter)
            .find_map(|(position, _)| self.panel(&flat_name[..position]))
    }

    /// Panels that are the nearest enclosing panel of at least one leaf, in pre-order.
    pub fn lowest_parents(&self) -> Vec<&PanelNode> {
        self.lowest_parents_for(self.leaves())
    }

    /// Like [`PanelForest::lowest_parents`] but for an arbitrary set of leaf
    /// names, such as the flat names of the rows being rendered.
    pub fn lowest_parents_for<'a, I>(&self, flat_names: I) -> Vec<&PanelNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut wanted = vec![false; self.nodes.len()];
        for flat_name in flat_names {
            if let Some(node) = self.nearest_panel(flat_name)
                && let Some(&position) = self.index.get(&node.flat_name)
            {
                wanted[position] = true;
            }
        }
        self.nodes
            .iter()
            .zip(wanted)
            .filter_map(|(node, wanted)| wanted.then_some(node))
            .collect()
    }
}

fn insert_path(roots: &mut Vec<PanelTree>, flat_name: &str, delimiter: char) {
    let mut level = roots;
    let mut end = 0usize;
    let segments: Vec<&str> = flat_name.split(delimiter).collect();
    let last = segments.len() - 1;

    for (depth, segment) in segments.iter().enumerate() {
        end += segment.len();
        if depth > 0 {
            end += delimiter.len_utf8();
        }
        let prefix = &flat_name[..end];
        let position = match level.iter().position(|node| node.flat_name == prefix) {
            Some(position) => position,
            None => {
                level.push(PanelTree::leaf(*segment, prefix));
                level.len() - 1
            }
        };
        if depth == last {
            return;
        }
        level = &mut level[position].children;
    }
}
