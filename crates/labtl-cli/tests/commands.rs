//! Subcommand behavior on snapshot files.

use std::fs;
use std::path::{Path, PathBuf};

use labtl_cli::commands::{run_layout, run_panels, run_render};
use labtl_cli::config::TimelineConfig;
use labtl_layout::LayoutOutcome;
use labtl_render::{TimelineView, render_outline};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "activeTests": ["Hem.CBC.WBC"],
    "timelineData": {
        "loaded": true,
        "data": {
            "rowData": [
                {
                    "display": "WBC",
                    "conceptUuid": "wbc-uuid",
                    "units": "10^3/uL",
                    "range": "4 - 11",
                    "flatName": "Hem.CBC.WBC",
                    "entries": [
                        { "obsDatetime": "2024-03-01T08:00:00", "value": "7.0" },
                        { "obsDatetime": "2024-03-02T08:00:00", "value": "11.8", "interpretation": "HIGH" }
                    ]
                },
                {
                    "display": "RBC",
                    "conceptUuid": "rbc-uuid",
                    "flatName": "Hem.CBC.RBC",
                    "entries": [
                        { "obsDatetime": "2024-03-01T08:00:00", "value": "4.5" }
                    ]
                },
                {
                    "display": "Sodium",
                    "conceptUuid": "na-uuid",
                    "flatName": "Chem.BMP.NA",
                    "entries": [
                        { "obsDatetime": "2024-02-28T14:15:00", "value": "138" }
                    ]
                }
            ]
        }
    },
    "panels": [
        {
            "display": "Hematology",
            "flatName": "Hem",
            "subSets": [
                {
                    "display": "Complete Blood Count",
                    "flatName": "Hem.CBC",
                    "subSets": [
                        { "display": "WBC", "flatName": "Hem.CBC.WBC" },
                        { "display": "RBC", "flatName": "Hem.CBC.RBC" }
                    ]
                }
            ]
        },
        {
            "display": "Chemistry",
            "flatName": "Chem",
            "subSets": [
                {
                    "display": "Basic Metabolic Panel",
                    "flatName": "Chem.BMP",
                    "subSets": [
                        { "display": "Sodium", "flatName": "Chem.BMP.NA" }
                    ]
                }
            ]
        }
    ],
    "checkboxes": { "Hem.CBC.WBC": true, "Hem.CBC.RBC": false }
}"#;

fn write_snapshot(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn render(path: &Path, offset: u32) -> Option<TimelineView> {
    run_render(path, &TimelineConfig::default(), offset, Some("patient-9")).unwrap()
}

#[test]
fn test_layout_keeps_checked_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "snapshot.json", SNAPSHOT);

    let LayoutOutcome::Ready(layout) = run_layout(&path, &TimelineConfig::default()).unwrap()
    else {
        panic!("expected a layout");
    };
    assert_eq!(layout.axis.len(), 3);
    assert_eq!(layout.groups.len(), 1);
    assert_eq!(layout.groups[0].panel, "Hem.CBC");
    assert_eq!(layout.row_count(), 1);
    assert_eq!(layout.current_panel.as_deref(), Some("Complete Blood Count"));
}

#[test]
fn test_render_outline_scrolled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "snapshot.json", SNAPSHOT);

    let view = render(&path, 40).unwrap();
    insta::assert_snapshot!(render_outline(&view), @r"
    corner: Complete Blood Count
    years:  2024 (3)
    days:   Feb 28 (1) | Mar 01 (1) | Mar 02 (1)
    times:  14:15 (1) | 08:00 (1) | 08:00 (1)
    scroll: 40 shadow
    group 1 Hem.CBC
      WBC [4 - 11 10^3/uL] | - | 7.0 | 11.8 (high)
    ");

    let TimelineView::Grid { groups, .. } = view else {
        panic!("expected a grid");
    };
    assert_eq!(
        groups[0].rows[0].start.trendline_path,
        "/openmrs/spa/patient/patient-9/chart/test-results/trendline/wbc-uuid"
    );
}

#[test]
fn test_render_not_loaded_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let pending = write_snapshot(
        &dir,
        "pending.json",
        &SNAPSHOT.replace(r#""loaded": true"#, r#""loaded": false"#),
    );
    assert_eq!(render(&pending, 0), None);

    let empty = write_snapshot(
        &dir,
        "empty.json",
        r#"{ "timelineData": { "loaded": true, "data": { "rowData": [] } } }"#,
    );
    let view = render(&empty, 0).unwrap();
    assert!(view.is_empty());
}

#[test]
fn test_panels_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "snapshot.json", SNAPSHOT);

    let report = run_panels(&path, &TimelineConfig::default()).unwrap();
    let names: Vec<&str> = report
        .panels
        .iter()
        .map(|panel| panel.flat_name.as_str())
        .collect();
    assert_eq!(names, vec!["Hem", "Hem.CBC", "Chem", "Chem.BMP"]);
    assert_eq!(report.lowest_parents, vec!["Hem.CBC", "Chem.BMP"]);
    assert!(report.is_lowest_parent("Chem.BMP"));
    assert!(!report.is_lowest_parent("Hem"));
    assert!(!report.derived);
    assert!(report.filter.some_checked());
}

#[test]
fn test_panels_derived_from_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "derived.json",
        r#"{
            "timelineData": {
                "loaded": true,
                "data": { "rowData": [{ "display": "K", "flatName": "Chem.BMP.K" }] }
            }
        }"#,
    );

    let report = run_panels(&path, &TimelineConfig::default()).unwrap();
    assert!(report.derived);
    assert_eq!(report.lowest_parents, vec!["Chem.BMP"]);
}

#[test]
fn test_missing_snapshot_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let error = run_layout(&path, &TimelineConfig::default()).unwrap_err();
    assert!(error.to_string().contains("read snapshot"));
}
