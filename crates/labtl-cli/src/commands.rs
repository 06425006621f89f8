//! The work behind each `labtl` subcommand, separate from printing.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use labtl_layout::{GroupedLayout, LayoutOutcome, compute_layout_from_snapshot, forest_for};
use labtl_model::{FilterContextSnapshot, FilterState, PanelNode};
use labtl_render::{RenderOptions, TimelineView, render_outcome};
use labtl_scroll::ScrollSync;

use crate::config::TimelineConfig;
use crate::logging::redact_value;

pub fn load_snapshot(path: &Path) -> Result<FilterContextSnapshot> {
    FilterContextSnapshot::from_path(path)
        .with_context(|| format!("read snapshot {}", path.display()))
}

pub fn run_layout(path: &Path, config: &TimelineConfig) -> Result<LayoutOutcome> {
    let span = info_span!("layout", snapshot = %path.display());
    let _guard = span.enter();

    let snapshot = load_snapshot(path)?;
    let outcome = compute_layout_from_snapshot(&snapshot, &config.layout_options())
        .context("compute layout")?;
    if let LayoutOutcome::Ready(layout) = &outcome {
        trace_values(layout);
    }
    Ok(outcome)
}

/// Render the snapshot scrolled to `offset` px.
///
/// `None` while the snapshot's data has not loaded.
pub fn run_render(
    path: &Path,
    config: &TimelineConfig,
    offset: u32,
    patient: Option<&str>,
) -> Result<Option<TimelineView>> {
    let outcome = run_layout(path, config)?;

    let (group_count, epoch) = match &outcome {
        LayoutOutcome::Ready(layout) => (layout.groups.len(), layout.epoch),
        _ => (0, 0),
    };
    let mut sync = ScrollSync::new(group_count, epoch, config.scroll.interval());
    let frame = sync.set_offset(offset);

    let options = RenderOptions {
        patient_uuid: patient.map_or_else(
            || config.render.patient_uuid.clone(),
            str::to_string,
        ),
        ..config.render.clone()
    };
    Ok(render_outcome(&outcome, &frame, &options))
}

/// A snapshot's panel hierarchy as the grouper sees it.
#[derive(Debug, Clone)]
pub struct PanelReport {
    pub panels: Vec<PanelNode>,
    /// Flat names of panels that directly enclose at least one row.
    pub lowest_parents: Vec<String>,
    pub filter: FilterState,
    /// True when the hierarchy was derived from row flat names.
    pub derived: bool,
}

impl PanelReport {
    pub fn is_lowest_parent(&self, flat_name: &str) -> bool {
        self.lowest_parents.iter().any(|name| name == flat_name)
    }
}

pub fn run_panels(path: &Path, config: &TimelineConfig) -> Result<PanelReport> {
    let snapshot = load_snapshot(path)?;
    let rows = snapshot.rows().unwrap_or_default();
    let forest =
        forest_for(&snapshot, rows, config.hierarchy.delimiter).context("build panel forest")?;

    let lowest_parents = forest
        .lowest_parents_for(rows.iter().map(|row| row.flat_name.as_str()))
        .into_iter()
        .map(|panel| panel.flat_name.clone())
        .collect();
    info!(panels = forest.panels().len(), "panel forest built");

    Ok(PanelReport {
        panels: forest.panels().to_vec(),
        lowest_parents,
        filter: snapshot.filter_state(),
        derived: snapshot.panels.is_empty(),
    })
}

fn trace_values(layout: &GroupedLayout) {
    for group in &layout.groups {
        for row in &group.rows {
            for (column, observation) in &row.entries {
                trace!(
                    flat_name = %row.flat_name,
                    column,
                    value = redact_value(&observation.value),
                    "observation placed"
                );
            }
        }
    }
}
