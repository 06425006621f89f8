//! Data model for grouped lab-result timelines.
//!
//! - **observation**: raw and axis-indexed lab results and test rows
//! - **axis**: time columns with their day and year buckets
//! - **panel**: panel hierarchy, nested and flattened
//! - **filter**: checkbox selection state
//! - **snapshot**: the filter context handed to each layout pass

pub mod axis;
pub mod enums;
pub mod error;
pub mod filter;
pub mod observation;
pub mod panel;
pub mod snapshot;

pub use axis::{DayBucket, TimeAxis, TimeColumn, YearBucket};
pub use enums::Interpretation;
pub use error::{Result, TimelineError};
pub use filter::FilterState;
pub use observation::{Observation, RawObservation, RawTestRow, TestRow};
pub use panel::{PanelNode, PanelTree};
pub use snapshot::{FilterContextSnapshot, TimelineData, TimelineRows};
