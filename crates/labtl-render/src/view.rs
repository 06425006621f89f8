//! Turns a computed layout and a scroll frame into a render model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use labtl_layout::{GroupedLayout, LayoutOutcome};
use labtl_scroll::{GridId, ScrollFrame};

use crate::cells::GridRow;
use crate::header::DateHeader;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Base path of the test results app; trendline links hang off it.
    pub trendline_base: String,
    pub patient_uuid: String,
    pub empty_header_title: String,
    pub empty_display_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trendline_base: "/openmrs/spa".to_string(),
            patient_uuid: String::new(),
            empty_header_title: "Data Timeline".to_string(),
            empty_display_text: "data".to_string(),
        }
    }
}

/// One group's sub-grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupGrid {
    pub group_number: usize,
    pub panel: String,
    /// Inline panel header; `None` for the group labelled by the sticky corner.
    pub header: Option<String>,
    pub data_columns: usize,
    pub offset: u32,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineView {
    Empty {
        header_title: String,
        display_text: String,
    },
    Grid {
        /// Sticky corner label: the current panel.
        corner_label: String,
        header: DateHeader,
        groups: Vec<GroupGrid>,
    },
}

impl TimelineView {
    pub fn is_empty(&self) -> bool {
        matches!(self, TimelineView::Empty { .. })
    }

    /// Replace the sticky corner label, typically with
    /// [`labtl_scroll::PanelHeaderTracker::current_label`] as the user
    /// scrolls vertically. The empty state is returned unchanged.
    #[must_use]
    pub fn with_corner_label(mut self, label: impl Into<String>) -> Self {
        if let TimelineView::Grid { corner_label, .. } = &mut self {
            *corner_label = label.into();
        }
        self
    }

    pub fn corner_label(&self) -> Option<&str> {
        match self {
            TimelineView::Grid { corner_label, .. } => Some(corner_label),
            TimelineView::Empty { .. } => None,
        }
    }

    fn empty(options: &RenderOptions) -> Self {
        TimelineView::Empty {
            header_title: options.empty_header_title.clone(),
            display_text: options.empty_display_text.clone(),
        }
    }
}

/// Build the render model for `layout` scrolled as in `frame`.
///
/// A frame from another layout epoch is ignored and the grids render at the
/// origin.
pub fn render_view(
    layout: &GroupedLayout,
    frame: &ScrollFrame,
    options: &RenderOptions,
) -> TimelineView {
    if layout.is_empty() {
        return TimelineView::empty(options);
    }

    let current = frame.epoch == layout.epoch;
    if !current {
        debug!(
            frame_epoch = frame.epoch,
            layout_epoch = layout.epoch,
            "scroll frame is stale, rendering at origin"
        );
    }
    let offset_of = |id: GridId| -> u32 {
        if !current {
            return 0;
        }
        frame.grid(id).map_or(frame.offset, |grid| grid.offset)
    };
    let show_shadow = current && frame.show_shadow;
    let columns = layout.axis.len();

    let groups = layout
        .groups
        .iter()
        .map(|group| GroupGrid {
            group_number: group.group_number,
            panel: group.panel.clone(),
            header: group.has_inline_header().then(|| group.display.clone()),
            data_columns: columns,
            offset: offset_of(GridId::Group(group.group_number)),
            rows: group
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    GridRow::build(
                        row,
                        index,
                        columns,
                        &options.trendline_base,
                        &options.patient_uuid,
                        show_shadow,
                    )
                })
                .collect(),
        })
        .collect();

    TimelineView::Grid {
        corner_label: layout.current_panel.clone().unwrap_or_default(),
        header: DateHeader::from_axis(&layout.axis, offset_of(GridId::Header), show_shadow),
        groups,
    }
}

/// Render model for a layout outcome; `None` while data is still loading.
pub fn render_outcome(
    outcome: &LayoutOutcome,
    frame: &ScrollFrame,
    options: &RenderOptions,
) -> Option<TimelineView> {
    match outcome {
        LayoutOutcome::NotLoaded => None,
        LayoutOutcome::Empty => Some(TimelineView::empty(options)),
        LayoutOutcome::Ready(layout) => Some(render_view(layout, frame, options)),
    }
}
