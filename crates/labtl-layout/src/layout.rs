//! One layout pass: rows and filter in, grouped grid description out.
//!
//! The host calls [`compute_layout`] whenever its inputs change. The result
//! is derived data with no identity beyond the pass that produced it; its
//! `epoch` lets scroll state tell one observation set from the next.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use labtl_model::{FilterContextSnapshot, FilterState, RawTestRow, Result, TimeAxis};

use crate::datetime::Granularity;
use crate::forest::{DEFAULT_DELIMITER, PanelForest};
use crate::grouper::{RowGroup, group_rows};
use crate::time_parser::{TimeFormat, TimeParser};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub granularity: Granularity,
    pub delimiter: char,
    pub time_format: TimeFormat,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            delimiter: DEFAULT_DELIMITER,
            time_format: TimeFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedLayout {
    pub axis: TimeAxis,
    pub groups: Vec<RowGroup>,
    /// Label for the sticky corner: the first shown group's display name.
    pub current_panel: Option<String>,
    pub orphans: Vec<String>,
    pub skipped_observations: usize,
    /// Fingerprint of the observation set this layout was built from.
    pub epoch: u64,
}

impl GroupedLayout {
    /// No columns or no groups: render the empty state.
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty() || self.groups.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

/// What the timeline should show for a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    /// Data has not arrived yet; render nothing.
    NotLoaded,
    /// Data arrived and there is nothing to show.
    Empty,
    Ready(GroupedLayout),
}

/// Build the time axis and row groups for one pass.
///
/// # Errors
///
/// Fails only on invalid `options` (label formats).
pub fn compute_layout(
    rows: &[RawTestRow],
    forest: &PanelForest,
    filter: &FilterState,
    options: &LayoutOptions,
) -> Result<GroupedLayout> {
    let span = info_span!("compute_layout", rows = rows.len());
    let _guard = span.enter();

    let parser = TimeParser::new(options.granularity, options.time_format.clone())?;
    let parsed = parser.parse(rows);
    let grouping = group_rows(forest, &parsed.rows, filter);

    let current_panel = grouping.groups.first().map(|group| group.display.clone());
    let epoch = layout_epoch(rows, &parsed.axis);

    info!(
        columns = parsed.axis.len(),
        groups = grouping.groups.len(),
        orphans = grouping.orphans.len(),
        skipped = parsed.skipped,
        "layout computed"
    );

    Ok(GroupedLayout {
        axis: parsed.axis,
        groups: grouping.groups,
        current_panel,
        orphans: grouping.orphans,
        skipped_observations: parsed.skipped,
        epoch,
    })
}

/// Run a layout pass over a filter context snapshot.
///
/// The panel hierarchy comes from the snapshot when present and is derived
/// from the rows' flat names otherwise.
///
/// # Errors
///
/// Fails on invalid `options` or an inconsistent panel hierarchy.
pub fn compute_layout_from_snapshot(
    snapshot: &FilterContextSnapshot,
    options: &LayoutOptions,
) -> Result<LayoutOutcome> {
    let rows = match snapshot.rows() {
        Some([]) => return Ok(LayoutOutcome::Empty),
        _ if !snapshot.timeline_data.loaded => return Ok(LayoutOutcome::NotLoaded),
        Some(rows) => rows,
        None => return Ok(LayoutOutcome::Empty),
    };

    let forest = forest_for(snapshot, rows, options.delimiter)?;
    let layout = compute_layout(rows, &forest, &snapshot.filter_state(), options)?;
    if layout.is_empty() {
        return Ok(LayoutOutcome::Empty);
    }
    Ok(LayoutOutcome::Ready(layout))
}

/// The snapshot's panel forest, or one derived from `rows`.
///
/// # Errors
///
/// Fails on an invalid delimiter or an inconsistent panel hierarchy.
pub fn forest_for(
    snapshot: &FilterContextSnapshot,
    rows: &[RawTestRow],
    delimiter: char,
) -> Result<PanelForest> {
    if snapshot.panels.is_empty() {
        PanelForest::from_flat_names(rows.iter().map(|row| row.flat_name.as_str()), delimiter)
    } else {
        PanelForest::from_trees(&snapshot.panels, delimiter)
    }
}

fn layout_epoch(rows: &[RawTestRow], axis: &TimeAxis) -> u64 {
    let mut hasher = DefaultHasher::new();
    for row in rows {
        row.flat_name.hash(&mut hasher);
        row.concept_uuid.hash(&mut hasher);
    }
    for column in &axis.columns {
        column.timestamp.hash(&mut hasher);
    }
    hasher.finish()
}
