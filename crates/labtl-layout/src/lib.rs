//! Layout engine for grouped lab timelines.
//!
//! - **datetime**: timestamp parsing and column granularity
//! - **time_parser**: the shared time axis with day and year buckets
//! - **forest**: the flattened panel hierarchy and lowest parents
//! - **grouper**: rows split per panel under the current filter
//! - **layout**: `compute_layout`, one pure pass from inputs to grid description

pub mod datetime;
pub mod forest;
pub mod grouper;
pub mod layout;
pub mod time_parser;

pub use datetime::{Granularity, parse_timestamp};
pub use forest::{DEFAULT_DELIMITER, PanelForest, is_ancestor};
pub use grouper::{Grouping, RowGroup, group_rows};
pub use layout::{
    GroupedLayout, LayoutOptions, LayoutOutcome, compute_layout, compute_layout_from_snapshot,
    forest_for,
};
pub use time_parser::{ParsedTime, TimeFormat, TimeParser};
