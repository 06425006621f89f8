//! Render model for grouped lab timelines.
//!
//! Everything here is plain data a UI layer can draw directly: a date
//! header, one sub-grid per panel group, and an empty state.

pub mod cells;
pub mod header;
pub mod outline;
pub mod view;

pub use cells::{GridRow, RowStartCell, TimelineCell, trendline_path};
pub use header::{DateHeader, HeaderCell};
pub use outline::render_outline;
pub use view::{GroupGrid, RenderOptions, TimelineView, render_outcome, render_view};
