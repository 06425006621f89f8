//! The shared time axis of a grouped timeline.
//!
//! Columns are the distinct observation times; day buckets merge consecutive
//! columns that fall on the same calendar date, and year buckets merge
//! consecutive day buckets of the same year. Both bucket levels partition
//! their children contiguously.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// A distinct point in time shown as one grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumn {
    pub timestamp: NaiveDateTime,
    /// Time-of-day label (e.g. `09:00`).
    pub label: String,
    /// Index into [`TimeAxis::days`].
    pub day_index: usize,
    /// Index into [`TimeAxis::years`].
    pub year_index: usize,
}

/// Consecutive columns sharing a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Day label (e.g. `Jan 01`).
    pub day: String,
    pub year: i32,
    pub date: NaiveDate,
    /// Number of time columns covered.
    pub span: usize,
}

/// Consecutive day buckets sharing a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: i32,
    pub label: String,
    /// Number of day buckets covered.
    pub span: usize,
    /// Number of time columns covered.
    pub column_span: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub columns: Vec<TimeColumn>,
    pub days: Vec<DayBucket>,
    pub years: Vec<YearBucket>,
}

impl TimeAxis {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Column timestamps in axis order.
    pub fn sorted_times(&self) -> Vec<NaiveDateTime> {
        self.columns.iter().map(|column| column.timestamp).collect()
    }

    /// Position of `timestamp` on the axis, if it is a column.
    pub fn column_index(&self, timestamp: NaiveDateTime) -> Option<usize> {
        self.columns
            .binary_search_by(|column| column.timestamp.cmp(&timestamp))
            .ok()
    }

    /// Verify ordering and span partitioning.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::InvariantViolation`] naming the first broken rule.
    pub fn check_invariants(&self) -> Result<()> {
        for pair in self.columns.windows(2) {
            if pair[0].timestamp >= pair[1].timestamp {
                return Err(TimelineError::invariant(format!(
                    "columns not strictly ascending at {}",
                    pair[1].timestamp
                )));
            }
        }

        let day_total: usize = self.days.iter().map(|day| day.span).sum();
        if day_total != self.columns.len() {
            return Err(TimelineError::invariant(format!(
                "day spans sum to {day_total}, expected {}",
                self.columns.len()
            )));
        }
        let year_total: usize = self.years.iter().map(|year| year.span).sum();
        if year_total != self.days.len() {
            return Err(TimelineError::invariant(format!(
                "year spans sum to {year_total}, expected {}",
                self.days.len()
            )));
        }
        let year_columns: usize = self.years.iter().map(|year| year.column_span).sum();
        if year_columns != self.columns.len() {
            return Err(TimelineError::invariant(format!(
                "year column spans sum to {year_columns}, expected {}",
                self.columns.len()
            )));
        }
        if self.days.iter().any(|day| day.span == 0) || self.years.iter().any(|y| y.span == 0) {
            return Err(TimelineError::invariant("bucket with zero span"));
        }
        for pair in self.years.windows(2) {
            if pair[0].year >= pair[1].year {
                return Err(TimelineError::invariant(format!(
                    "year {} appears in more than one bucket",
                    pair[1].year
                )));
            }
        }

        // Walk the columns and make sure every back-reference matches the spans.
        let mut column = 0usize;
        let mut day_cursor = 0usize;
        for (year_index, year) in self.years.iter().enumerate() {
            for _ in 0..year.span {
                let day = &self.days[day_cursor];
                if day.year != year.year {
                    return Err(TimelineError::invariant(format!(
                        "day bucket {} filed under year {}",
                        day.date, year.year
                    )));
                }
                for _ in 0..day.span {
                    let entry = &self.columns[column];
                    if entry.day_index != day_cursor || entry.year_index != year_index {
                        return Err(TimelineError::invariant(format!(
                            "column {column} points at the wrong bucket"
                        )));
                    }
                    if entry.timestamp.date() != day.date {
                        return Err(TimelineError::invariant(format!(
                            "column {column} does not fall on {}",
                            day.date
                        )));
                    }
                    column += 1;
                }
                day_cursor += 1;
            }
        }
        Ok(())
    }
}
