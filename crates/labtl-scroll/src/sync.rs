//! Horizontal scroll synchronization across the date header and every group grid.
//!
//! One authoritative offset is mirrored into every grid. User scrolls on
//! the header apply immediately; scrolls on a group grid pass through a
//! [`Throttle`]. Scroll events that merely echo a position this module wrote
//! are ignored, so programmatic writes never feed back into themselves.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::throttle::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "group")]
pub enum GridId {
    /// The shared year/day/time header.
    Header,
    /// A group grid, by 1-based group number.
    Group(usize),
}

/// Per-grid scroll state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    #[default]
    AtOrigin,
    Scrolled,
}

impl ScrollState {
    /// Next state after the grid moves to `offset`.
    pub fn transition(self, offset: u32) -> Self {
        match (self, offset) {
            (ScrollState::AtOrigin, 0) => ScrollState::AtOrigin,
            (ScrollState::AtOrigin, _) => ScrollState::Scrolled,
            (ScrollState::Scrolled, 0) => ScrollState::AtOrigin,
            (ScrollState::Scrolled, _) => ScrollState::Scrolled,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        matches!(self, ScrollState::Scrolled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFrame {
    pub id: GridId,
    pub offset: u32,
    pub state: ScrollState,
}

/// Everything a render pass reads about scrolling, captured at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollFrame {
    pub epoch: u64,
    pub offset: u32,
    /// Drop shadow on the row-label column and date header.
    pub show_shadow: bool,
    pub grids: Vec<GridFrame>,
}

impl ScrollFrame {
    pub fn grid(&self, id: GridId) -> Option<&GridFrame> {
        self.grids.iter().find(|grid| grid.id == id)
    }
}

#[derive(Debug, Clone, Copy)]
struct GridSlot {
    id: GridId,
    /// Last position written to or reported by this grid.
    position: u32,
    state: ScrollState,
}

#[derive(Debug, Clone)]
pub struct ScrollSync {
    offset: u32,
    epoch: u64,
    grids: Vec<GridSlot>,
    throttle: Throttle<u32>,
}

impl ScrollSync {
    pub fn new(group_count: usize, epoch: u64, interval: Duration) -> Self {
        Self {
            offset: 0,
            epoch,
            grids: build_slots(group_count, 0),
            throttle: Throttle::new(interval),
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn group_count(&self) -> usize {
        self.grids.len() - 1
    }

    /// When [`ScrollSync::tick`] should next run, if a throttled scroll is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    /// A user scrolled `grid` to `offset`.
    ///
    /// Returns the new frame when the offset was applied right away.
    pub fn on_scroll(&mut self, grid: GridId, offset: u32, now: Instant) -> Option<ScrollFrame> {
        let Some(slot) = self.grids.iter_mut().find(|slot| slot.id == grid) else {
            debug!(?grid, "scroll event from unknown grid ignored");
            return None;
        };
        if slot.position == offset {
            trace!(?grid, offset, "scroll echo ignored");
            return None;
        }
        slot.position = offset;

        match grid {
            GridId::Header => Some(self.set_offset(offset)),
            GridId::Group(_) => {
                let released = self.throttle.push(offset, now)?;
                Some(self.set_offset(released))
            }
        }
    }

    /// Release a throttled scroll whose interval has passed.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollFrame> {
        let released = self.throttle.poll(now)?;
        Some(self.set_offset(released))
    }

    /// Write `offset` into every grid and return the resulting frame.
    ///
    /// A scroll still waiting in the throttle is older than this write and
    /// is discarded.
    pub fn set_offset(&mut self, offset: u32) -> ScrollFrame {
        if self.throttle.cancel().is_some() {
            trace!(offset, "pending throttled scroll superseded");
        }
        self.offset = offset;
        for slot in &mut self.grids {
            slot.position = offset;
            slot.state = slot.state.transition(offset);
        }
        self.frame()
    }

    /// Consistent snapshot of the current scroll state.
    pub fn frame(&self) -> ScrollFrame {
        ScrollFrame {
            epoch: self.epoch,
            offset: self.offset,
            show_shadow: self.offset > 0,
            grids: self
                .grids
                .iter()
                .map(|slot| GridFrame {
                    id: slot.id,
                    offset: slot.position,
                    state: slot.state,
                })
                .collect(),
        }
    }

    /// Start over for a new observation set at offset 0.
    ///
    /// A scroll still waiting in the throttle is discarded.
    pub fn reset(&mut self, group_count: usize, epoch: u64) {
        debug!(old = self.epoch, new = epoch, groups = group_count, "scroll reset");
        self.throttle.cancel();
        self.epoch = epoch;
        self.offset = 0;
        self.grids = build_slots(group_count, 0);
    }

    /// Follow a new layout.
    ///
    /// A different `epoch` means a different observation set: everything
    /// returns to origin. A different group count with the same epoch keeps
    /// the offset. In both cases a scroll still waiting in the throttle is
    /// dropped.
    pub fn update_layout(&mut self, group_count: usize, epoch: u64) {
        if epoch != self.epoch {
            self.reset(group_count, epoch);
            return;
        }
        if group_count != self.group_count() {
            self.throttle.cancel();
            self.grids = build_slots(group_count, self.offset);
        }
    }
}

fn build_slots(group_count: usize, offset: u32) -> Vec<GridSlot> {
    let state = ScrollState::AtOrigin.transition(offset);
    std::iter::once(GridId::Header)
        .chain((1..=group_count).map(GridId::Group))
        .map(|id| GridSlot {
            id,
            position: offset,
            state,
        })
        .collect()
}
