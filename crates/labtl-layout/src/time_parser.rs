//! Builds the shared time axis from every row's observations.

use std::collections::BTreeSet;
use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use labtl_model::{
    DayBucket, Observation, RawTestRow, Result, TestRow, TimeAxis, TimeColumn, TimelineError,
    YearBucket,
};

use crate::datetime::{Granularity, parse_timestamp};

/// Label formats for the three header rows (strftime syntax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeFormat {
    pub year: String,
    pub day: String,
    pub time: String,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            year: "%Y".to_string(),
            day: "%b %d".to_string(),
            time: "%H:%M".to_string(),
        }
    }
}

impl TimeFormat {
    /// Reject format strings chrono cannot render for a naive timestamp.
    ///
    /// Time zone and offset specifiers are rejected along with malformed ones.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::InvalidFormat`] for the first bad field.
    pub fn validate(&self) -> Result<()> {
        for (field, format) in [("year", &self.year), ("day", &self.day), ("time", &self.time)] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
                || !renders_naive(format)
            {
                return Err(TimelineError::InvalidFormat {
                    field,
                    format: format.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Trial render on a naive timestamp; offset specifiers fail here.
fn renders_naive(format: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|day| day.and_hms_opt(0, 0, 0))
    else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(format)).is_ok()
}

/// Output of [`TimeParser::parse`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTime {
    pub axis: TimeAxis,
    /// Input rows re-indexed onto `axis`, same order as the input.
    pub rows: Vec<TestRow>,
    /// Observations dropped because their timestamp could not be parsed.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TimeParser {
    granularity: Granularity,
    format: TimeFormat,
}

impl TimeParser {
    /// # Errors
    ///
    /// Fails when `format` contains an invalid strftime specifier.
    pub fn new(granularity: Granularity, format: TimeFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self {
            granularity,
            format,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Parse every observation, build the axis, and place each observation
    /// in its column.
    pub fn parse(&self, rows: &[RawTestRow]) -> ParsedTime {
        let mut skipped = 0usize;
        let mut placed: Vec<Vec<(NaiveDateTime, Observation)>> = Vec::with_capacity(rows.len());
        let mut times = BTreeSet::new();

        for row in rows {
            let mut row_obs = Vec::with_capacity(row.observations.len());
            for raw in &row.observations {
                match parse_timestamp(&raw.obs_datetime) {
                    Ok(timestamp) => {
                        let column_time = self.granularity.truncate(timestamp);
                        times.insert(column_time);
                        row_obs.push((
                            column_time,
                            Observation {
                                value: raw.value.clone(),
                                interpretation: raw.interpretation,
                                timestamp,
                            },
                        ));
                    }
                    Err(error) => {
                        skipped += 1;
                        warn!(flat_name = %row.flat_name, %error, "skipping observation");
                    }
                }
            }
            placed.push(row_obs);
        }

        let sorted: Vec<NaiveDateTime> = times.into_iter().collect();
        let axis = self.build_axis(&sorted);

        let rows = rows
            .iter()
            .zip(placed)
            .map(|(raw, observations)| {
                let mut row = TestRow::from_raw(raw);
                for (column_time, observation) in observations {
                    let Ok(index) = sorted.binary_search(&column_time) else {
                        continue;
                    };
                    if row.entries.insert(index, observation).is_some() {
                        debug!(
                            flat_name = %row.flat_name,
                            column = index,
                            "observation replaced by a later one in the same column"
                        );
                    }
                }
                row
            })
            .collect();

        debug!(
            columns = axis.columns.len(),
            days = axis.days.len(),
            years = axis.years.len(),
            skipped,
            granularity = self.granularity.as_str(),
            "time axis built"
        );

        ParsedTime {
            axis,
            rows,
            skipped,
        }
    }

    /// Bucket an ascending, de-duplicated sequence of times.
    pub fn build_axis(&self, sorted: &[NaiveDateTime]) -> TimeAxis {
        let mut axis = TimeAxis::default();

        for &timestamp in sorted {
            let date = timestamp.date();
            let year = timestamp.year();

            let same_day = axis.days.last().is_some_and(|day| day.date == date);
            if same_day {
                if let Some(day) = axis.days.last_mut() {
                    day.span += 1;
                }
            } else {
                axis.days.push(DayBucket {
                    day: timestamp.format(&self.format.day).to_string(),
                    year,
                    date,
                    span: 1,
                });
                let same_year = axis.years.last().is_some_and(|bucket| bucket.year == year);
                if same_year {
                    if let Some(bucket) = axis.years.last_mut() {
                        bucket.span += 1;
                    }
                } else {
                    axis.years.push(YearBucket {
                        year,
                        label: timestamp.format(&self.format.year).to_string(),
                        span: 1,
                        column_span: 0,
                    });
                }
            }
            if let Some(bucket) = axis.years.last_mut() {
                bucket.column_span += 1;
            }

            axis.columns.push(TimeColumn {
                timestamp,
                label: timestamp.format(&self.format.time).to_string(),
                day_index: axis.days.len() - 1,
                year_index: axis.years.len() - 1,
            });
        }

        axis
    }
}
