//! Scroll state for a grouped timeline.
//!
//! - **throttle**: caller-clocked rate limiter
//! - **sync**: one horizontal offset mirrored across header and group grids
//! - **header**: sticky label for the topmost visible panel

pub mod header;
pub mod sync;
pub mod throttle;

pub use header::{PanelHeaderTracker, VISIBILITY_THRESHOLD};
pub use sync::{GridFrame, GridId, ScrollFrame, ScrollState, ScrollSync};
pub use throttle::{
    DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS, Throttle, clamp_interval,
};
