//! The three-row date header shared by every group grid.

use serde::Serialize;

use labtl_model::TimeAxis;

/// A header cell spanning `span` time columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub label: String,
    pub span: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateHeader {
    pub years: Vec<HeaderCell>,
    pub days: Vec<HeaderCell>,
    pub times: Vec<HeaderCell>,
    pub offset: u32,
    pub show_shadow: bool,
}

impl DateHeader {
    /// Header rows for `axis`; every span is in time columns.
    pub fn from_axis(axis: &TimeAxis, offset: u32, show_shadow: bool) -> Self {
        Self {
            years: axis
                .years
                .iter()
                .map(|year| HeaderCell {
                    label: year.label.clone(),
                    span: year.column_span,
                })
                .collect(),
            days: axis
                .days
                .iter()
                .map(|day| HeaderCell {
                    label: day.day.clone(),
                    span: day.span,
                })
                .collect(),
            times: axis
                .columns
                .iter()
                .map(|column| HeaderCell {
                    label: column.label.clone(),
                    span: 1,
                })
                .collect(),
            offset,
            show_shadow,
        }
    }

    pub fn column_count(&self) -> usize {
        self.times.len()
    }
}
