//! Data cells and row-start cells.

use serde::Serialize;

use labtl_model::{Interpretation, Observation, TestRow};

/// One value cell of a group grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineCell {
    /// Empty for a column the row has no observation in.
    pub text: String,
    pub interpretation: Interpretation,
    /// Style class for abnormal results.
    pub css_class: Option<&'static str>,
    pub zebra: bool,
}

impl TimelineCell {
    pub fn blank(zebra: bool) -> Self {
        Self {
            text: String::new(),
            interpretation: Interpretation::Normal,
            css_class: None,
            zebra,
        }
    }

    pub fn from_observation(observation: &Observation, zebra: bool) -> Self {
        Self {
            text: observation.value.clone(),
            interpretation: observation.interpretation,
            css_class: observation.interpretation.css_class(),
            zebra,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Sticky first cell of a row: test name, reference range and trendline link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStartCell {
    pub title: String,
    pub range: String,
    pub units: String,
    pub concept_uuid: String,
    pub trendline_path: String,
    pub shadow: bool,
}

impl RowStartCell {
    /// `range units` as shown under the title.
    pub fn range_units(&self) -> String {
        format!("{} {}", self.range, self.units).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub start: RowStartCell,
    /// One cell per time column.
    pub cells: Vec<TimelineCell>,
}

impl GridRow {
    /// Build the row at `index` within its group.
    ///
    /// Odd rows are zebra-striped.
    pub fn build(
        row: &TestRow,
        index: usize,
        columns: usize,
        trendline_base: &str,
        patient_uuid: &str,
        shadow: bool,
    ) -> Self {
        let zebra = index % 2 == 1;
        let cells = (0..columns)
            .map(|column| match row.entry(column) {
                Some(observation) => TimelineCell::from_observation(observation, zebra),
                None => TimelineCell::blank(zebra),
            })
            .collect();

        Self {
            start: RowStartCell {
                title: row.display.clone(),
                range: row.range.clone(),
                units: row.units.clone(),
                concept_uuid: row.concept_uuid.clone(),
                trendline_path: trendline_path(trendline_base, patient_uuid, &row.concept_uuid),
                shadow,
            },
            cells,
        }
    }
}

/// Link target of a row's trendline view.
pub fn trendline_path(base: &str, patient_uuid: &str, concept_uuid: &str) -> String {
    format!(
        "{}/patient/{patient_uuid}/chart/test-results/trendline/{concept_uuid}",
        base.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn row() -> TestRow {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TestRow {
            display: "Hemoglobin".to_string(),
            concept_uuid: "hgb-uuid".to_string(),
            units: "g/dL".to_string(),
            range: "12 - 16".to_string(),
            flat_name: "Hem.CBC.HGB".to_string(),
            entries: BTreeMap::from([(
                1,
                Observation {
                    value: "9.1".to_string(),
                    interpretation: Interpretation::CriticallyLow,
                    timestamp,
                },
            )]),
        }
    }

    #[test]
    fn test_missing_entries_render_blank() {
        let built = GridRow::build(&row(), 3, 3, "/spa/", "p-1", true);

        assert_eq!(built.cells.len(), 3);
        assert!(built.cells[0].is_blank());
        assert!(built.cells[2].is_blank());
        assert_eq!(built.cells[1].text, "9.1");
        assert_eq!(built.cells[1].css_class, Some("criticallyLow"));
        assert!(built.cells.iter().all(|cell| cell.zebra));
    }

    #[test]
    fn test_row_start_cell() {
        let built = GridRow::build(&row(), 0, 2, "/spa/", "p-1", false);
        assert_eq!(built.start.range_units(), "12 - 16 g/dL");
        assert_eq!(
            built.start.trendline_path,
            "/spa/patient/p-1/chart/test-results/trendline/hgb-uuid"
        );
        assert!(!built.cells[0].zebra);
    }

    #[test]
    fn test_range_units_without_range() {
        let cell = RowStartCell {
            title: "Notes".to_string(),
            range: String::new(),
            units: String::new(),
            concept_uuid: String::new(),
            trendline_path: String::new(),
            shadow: false,
        };
        assert_eq!(cell.range_units(), "");
    }
}
