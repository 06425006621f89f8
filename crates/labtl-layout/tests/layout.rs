//! Tests for full layout passes.

use labtl_layout::{
    LayoutOptions, LayoutOutcome, PanelForest, compute_layout, compute_layout_from_snapshot,
};
use labtl_model::{FilterContextSnapshot, FilterState, RawObservation, RawTestRow};

fn raw(flat_name: &str, times: &[&str]) -> RawTestRow {
    let mut row = RawTestRow::new(flat_name.rsplit('.').next().unwrap(), flat_name);
    for time in times {
        row = row.with_observation(RawObservation::new(*time, "1.0"));
    }
    row
}

fn snapshot_json(rows: &str, loaded: bool, checkboxes: &str) -> String {
    format!(
        r#"{{"activeTests": [], "timelineData": {{"data": {{"rowData": {rows}}}, "loaded": {loaded}}}, "checkboxes": {checkboxes}}}"#
    )
}

#[test]
fn layout_sets_current_panel_from_first_group() {
    let rows = vec![
        raw("Hem.CBC.WBC", &["2023-01-01T09:00"]),
        raw("Chem.BMP.Na", &["2023-01-02T09:00"]),
    ];
    let forest =
        PanelForest::from_flat_names(rows.iter().map(|r| r.flat_name.as_str()), '.').unwrap();

    let layout =
        compute_layout(&rows, &forest, &FilterState::new(), &LayoutOptions::default()).unwrap();

    assert_eq!(layout.current_panel.as_deref(), Some("CBC"));
    assert_eq!(layout.groups.len(), 2);
    assert_eq!(layout.axis.len(), 2);
    assert_eq!(layout.row_count(), 2);
    assert!(!layout.is_empty());
    // Both groups index into the same axis.
    assert_eq!(layout.groups[1].rows[0].entries.keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn epoch_changes_with_observation_set() {
    let forest = PanelForest::from_flat_names(["Hem.CBC.WBC"].into_iter(), '.').unwrap();
    let options = LayoutOptions::default();
    let filter = FilterState::new();

    let first = compute_layout(&[raw("Hem.CBC.WBC", &["2023-01-01T09:00"])], &forest, &filter, &options)
        .unwrap();
    let same = compute_layout(&[raw("Hem.CBC.WBC", &["2023-01-01T09:00"])], &forest, &filter, &options)
        .unwrap();
    let other = compute_layout(&[raw("Hem.CBC.WBC", &["2023-02-01T09:00"])], &forest, &filter, &options)
        .unwrap();

    assert_eq!(first.epoch, same.epoch);
    assert_ne!(first.epoch, other.epoch);
}

#[test]
fn empty_row_data_is_empty_state() {
    let snapshot = FilterContextSnapshot::from_json(&snapshot_json("[]", true, "{}")).unwrap();
    let outcome = compute_layout_from_snapshot(&snapshot, &LayoutOptions::default()).unwrap();
    assert_eq!(outcome, LayoutOutcome::Empty);
}

#[test]
fn empty_row_data_wins_over_loading() {
    let snapshot = FilterContextSnapshot::from_json(&snapshot_json("[]", false, "{}")).unwrap();
    let outcome = compute_layout_from_snapshot(&snapshot, &LayoutOptions::default()).unwrap();
    assert_eq!(outcome, LayoutOutcome::Empty);
}

#[test]
fn unloaded_data_renders_nothing() {
    let rows = r#"[{"display": "WBC", "flatName": "Hem.CBC.WBC", "entries": []}]"#;
    let snapshot = FilterContextSnapshot::from_json(&snapshot_json(rows, false, "{}")).unwrap();
    let outcome = compute_layout_from_snapshot(&snapshot, &LayoutOptions::default()).unwrap();
    assert_eq!(outcome, LayoutOutcome::NotLoaded);
}

#[test]
fn snapshot_layout_applies_checkboxes() {
    let rows = r#"[
        {"display": "WBC", "flatName": "Hem.CBC.WBC", "entries": [{"obsDatetime": "2023-01-01T09:00", "value": "5"}]},
        {"display": "RBC", "flatName": "Hem.CBC.RBC", "entries": [{"obsDatetime": "2023-01-01T09:00", "value": "4.5"}]},
        {"display": "Na", "flatName": "Chem.BMP.Na", "entries": [{"obsDatetime": "2023-01-02T09:00", "value": "140"}]}
    ]"#;
    let snapshot =
        FilterContextSnapshot::from_json(&snapshot_json(rows, true, r#"{"Hem.CBC.WBC": true}"#))
            .unwrap();

    let LayoutOutcome::Ready(layout) =
        compute_layout_from_snapshot(&snapshot, &LayoutOptions::default()).unwrap()
    else {
        panic!("expected a layout");
    };

    assert_eq!(layout.groups.len(), 1);
    assert_eq!(layout.groups[0].panel, "Hem.CBC");
    assert_eq!(layout.groups[0].rows.len(), 1);
    assert_eq!(layout.groups[0].rows[0].display, "WBC");
    // The axis still covers every row's observations.
    assert_eq!(layout.axis.len(), 2);
}

#[test]
fn snapshot_panels_take_precedence() {
    let json = r#"{
        "timelineData": {"data": {"rowData": [
            {"display": "WBC", "flatName": "Hem.WBC", "entries": [{"obsDatetime": "2023-01-01T09:00", "value": "5"}]}
        ]}, "loaded": true},
        "panels": [{"display": "Hematology", "flatName": "Hem", "subSets": [
            {"display": "White blood cells", "flatName": "Hem.WBC"}
        ]}]
    }"#;
    let snapshot = FilterContextSnapshot::from_json(json).unwrap();

    let LayoutOutcome::Ready(layout) =
        compute_layout_from_snapshot(&snapshot, &LayoutOptions::default()).unwrap()
    else {
        panic!("expected a layout");
    };
    assert_eq!(layout.current_panel.as_deref(), Some("Hematology"));
}

#[test]
fn invalid_delimiter_is_an_error() {
    let rows = r#"[{"display": "WBC", "flatName": "Hem.WBC", "entries": []}]"#;
    let snapshot = FilterContextSnapshot::from_json(&snapshot_json(rows, true, "{}")).unwrap();
    let options = LayoutOptions {
        delimiter: 'x',
        ..LayoutOptions::default()
    };
    assert!(compute_layout_from_snapshot(&snapshot, &options).is_err());
}
