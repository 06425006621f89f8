//! Sticky "current panel" label driven by header visibility.

use std::collections::BTreeMap;

/// Fraction of a group header that must be visible to count as shown.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Tracks which group's header is the topmost visible one.
///
/// The host reports visibility ratios for group headers as it observes
/// them; the tracker answers with the label for the sticky corner. Before
/// any report, and whenever nothing is visible, the last known label stays.
#[derive(Debug, Clone, Default)]
pub struct PanelHeaderTracker {
    labels: Vec<String>,
    visible: BTreeMap<usize, f32>,
    current: Option<usize>,
}

impl PanelHeaderTracker {
    /// `labels` in group order; group 1 is the initial label.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::default();
        tracker.reset(labels);
        tracker
    }

    /// Start over for a new set of groups.
    pub fn reset<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self.visible.clear();
        self.current = (!self.labels.is_empty()).then_some(1);
    }

    /// Record that `group_number`'s header is `ratio` visible.
    ///
    /// Returns the new label when the sticky label changed.
    pub fn notify_visibility(&mut self, group_number: usize, ratio: f32) -> Option<&str> {
        if group_number == 0 || group_number > self.labels.len() {
            return None;
        }
        if ratio >= VISIBILITY_THRESHOLD {
            self.visible.insert(group_number, ratio);
        } else {
            self.visible.remove(&group_number);
        }

        let topmost = self.visible.keys().next().copied();
        match topmost {
            Some(group) if Some(group) != self.current => {
                self.current = Some(group);
                self.current_label()
            }
            _ => None,
        }
    }

    pub fn current_group(&self) -> Option<usize> {
        self.current
    }

    pub fn current_label(&self) -> Option<&str> {
        self.current
            .and_then(|group| self.labels.get(group - 1))
            .map(String::as_str)
    }
}
