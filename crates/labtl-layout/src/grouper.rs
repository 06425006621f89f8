//! Splits test rows into one group per lowest parent panel.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use labtl_model::{FilterState, TestRow};

use crate::forest::PanelForest;

/// Rows rendered together under one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGroup {
    /// Flat name of the panel.
    pub panel: String,
    pub display: String,
    /// 1-based position among the shown groups.
    pub group_number: usize,
    pub rows: Vec<TestRow>,
}

impl RowGroup {
    /// The first group's label lives in the sticky corner; later groups
    /// render their own header above the grid.
    pub fn has_inline_header(&self) -> bool {
        self.group_number > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    pub groups: Vec<RowGroup>,
    /// Flat names of rows no panel encloses.
    pub orphans: Vec<String>,
}

impl Grouping {
    pub fn row_total(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

/// Group `rows` under their nearest enclosing lowest parent.
///
/// When any checkbox is set only checked rows are kept; otherwise every row
/// is shown. Groups left without rows are dropped, and group numbers are
/// assigned after that so they stay contiguous.
pub fn group_rows(forest: &PanelForest, rows: &[TestRow], filter: &FilterState) -> Grouping {
    let some_checked = filter.some_checked();
    let lowest = forest.lowest_parents_for(rows.iter().map(|row| row.flat_name.as_str()));

    let mut buckets: Vec<Vec<TestRow>> = vec![Vec::new(); lowest.len()];
    let mut orphans = Vec::new();

    for row in rows {
        let Some(panel) = forest.nearest_panel(&row.flat_name) else {
            warn!(flat_name = %row.flat_name, "row matches no panel, excluded");
            orphans.push(row.flat_name.clone());
            continue;
        };
        if some_checked && !filter.is_checked(&row.flat_name) {
            continue;
        }
        if let Some(position) = lowest
            .iter()
            .position(|parent| parent.flat_name == panel.flat_name)
        {
            buckets[position].push(row.clone());
        }
    }

    let mut groups = Vec::new();
    for (parent, rows) in lowest.iter().zip(buckets) {
        if rows.is_empty() {
            debug!(panel = %parent.flat_name, "panel has no visible rows");
            continue;
        }
        groups.push(RowGroup {
            panel: parent.flat_name.clone(),
            display: parent.display.clone(),
            group_number: groups.len() + 1,
            rows,
        });
    }

    debug!(
        groups = groups.len(),
        orphans = orphans.len(),
        some_checked,
        "rows grouped"
    );

    Grouping { groups, orphans }
}
