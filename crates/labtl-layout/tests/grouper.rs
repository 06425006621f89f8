//! Tests for the panel forest and row grouping.

use labtl_layout::{PanelForest, TimeParser, group_rows};
use labtl_model::{FilterState, PanelTree, RawObservation, RawTestRow, TestRow, TimelineError};

fn rows(flat_names: &[&str]) -> Vec<TestRow> {
    let raw: Vec<RawTestRow> = flat_names
        .iter()
        .map(|name| {
            RawTestRow::new(name.rsplit('.').next().unwrap(), *name)
                .with_observation(RawObservation::new("2023-01-01T09:00", "1"))
        })
        .collect();
    TimeParser::default().parse(&raw).rows
}

fn derived_forest(flat_names: &[&str]) -> PanelForest {
    PanelForest::from_flat_names(flat_names.iter().copied(), '.').unwrap()
}

#[test]
fn checked_leaf_selects_its_nearest_panel_only() {
    let names = ["Hem.CBC.WBC", "Hem.CBC.RBC", "Chem.BMP.Na"];
    let forest = derived_forest(&names);
    let filter: FilterState = [("Hem.CBC.WBC".to_string(), true)].into_iter().collect();

    let grouping = group_rows(&forest, &rows(&names), &filter);

    assert_eq!(grouping.groups.len(), 1);
    let group = &grouping.groups[0];
    assert_eq!(group.panel, "Hem.CBC");
    assert_eq!(group.display, "CBC");
    assert_eq!(group.group_number, 1);
    assert!(!group.has_inline_header());
    assert_eq!(group.rows.len(), 1);
    assert_eq!(group.rows[0].display, "WBC");
}

#[test]
fn nothing_checked_shows_every_panel_with_rows() {
    let names = ["Hem.CBC.WBC", "Hem.CBC.RBC", "Chem.BMP.Na"];
    let forest = derived_forest(&names);

    let grouping = group_rows(&forest, &rows(&names), &FilterState::from_leaves(names));

    let panels: Vec<&str> = grouping.groups.iter().map(|g| g.panel.as_str()).collect();
    assert_eq!(panels, vec!["Hem.CBC", "Chem.BMP"]);
    assert_eq!(grouping.groups[0].rows.len(), 2);
    assert_eq!(grouping.groups[1].group_number, 2);
    assert!(grouping.groups[1].has_inline_header());
}

#[test]
fn groups_follow_forest_order_not_row_order() {
    let trees = vec![
        PanelTree::panel(
            "Chemistry",
            "Chem",
            vec![PanelTree::panel(
                "Basic metabolic panel",
                "Chem.BMP",
                vec![PanelTree::leaf("Sodium", "Chem.BMP.Na")],
            )],
        ),
        PanelTree::panel(
            "Hematology",
            "Hem",
            vec![PanelTree::panel(
                "Complete blood count",
                "Hem.CBC",
                vec![PanelTree::leaf("WBC", "Hem.CBC.WBC")],
            )],
        ),
    ];
    let forest = PanelForest::from_trees(&trees, '.').unwrap();

    let grouping = group_rows(
        &forest,
        &rows(&["Hem.CBC.WBC", "Chem.BMP.Na"]),
        &FilterState::new(),
    );

    let labels: Vec<&str> = grouping.groups.iter().map(|g| g.display.as_str()).collect();
    assert_eq!(labels, vec!["Basic metabolic panel", "Complete blood count"]);
}

#[test]
fn orphan_rows_are_excluded() {
    let trees = vec![PanelTree::panel(
        "Hematology",
        "Hem",
        vec![PanelTree::leaf("WBC", "Hem.WBC")],
    )];
    let forest = PanelForest::from_trees(&trees, '.').unwrap();

    let grouping = group_rows(
        &forest,
        &rows(&["Hem.WBC", "Urine.pH", "Lonely"]),
        &FilterState::new(),
    );

    assert_eq!(grouping.groups.len(), 1);
    assert_eq!(grouping.groups[0].rows.len(), 1);
    assert_eq!(grouping.orphans, vec!["Urine.pH".to_string(), "Lonely".to_string()]);
}

#[test]
fn panel_with_no_checked_rows_is_omitted() {
    let names = ["Hem.CBC.WBC", "Chem.BMP.Na", "Chem.BMP.K"];
    let forest = derived_forest(&names);
    let filter: FilterState = [
        ("Chem.BMP.K".to_string(), true),
        ("Hem.CBC.WBC".to_string(), false),
    ]
    .into_iter()
    .collect();

    let grouping = group_rows(&forest, &rows(&names), &filter);

    assert_eq!(grouping.groups.len(), 1);
    assert_eq!(grouping.groups[0].panel, "Chem.BMP");
    assert_eq!(grouping.groups[0].rows[0].flat_name, "Chem.BMP.K");
}

#[test]
fn rows_land_in_nearest_panel_without_duplication() {
    let names = ["Hem.Ferritin", "Hem.CBC.WBC"];
    let forest = derived_forest(&names);

    let grouping = group_rows(&forest, &rows(&names), &FilterState::new());

    let panels: Vec<&str> = grouping.groups.iter().map(|g| g.panel.as_str()).collect();
    assert_eq!(panels, vec!["Hem", "Hem.CBC"]);
    assert_eq!(grouping.row_total(), 2);
}

#[test]
fn forest_reports_parents_and_lowest_parents() {
    let forest = derived_forest(&["Hem.CBC.WBC", "Hem.CBC.RBC", "Chem.BMP.Na"]);

    let parents = forest.parents();
    assert_eq!(parents["Hem"], vec!["Hem.CBC.WBC", "Hem.CBC.RBC"]);
    assert_eq!(parents["Hem.CBC"], vec!["Hem.CBC.WBC", "Hem.CBC.RBC"]);

    let lowest: Vec<&str> = forest
        .lowest_parents()
        .iter()
        .map(|node| node.flat_name.as_str())
        .collect();
    assert_eq!(lowest, vec!["Hem.CBC", "Chem.BMP"]);

    let hem = forest.panel("Hem").unwrap();
    assert_eq!(hem.depth, 0);
    assert!(hem.contains("Hem.CBC"));
    assert!(hem.contains("Hem.CBC.WBC"));
    assert!(!hem.has_direct_leaves);
    assert!(forest.panel("Hem.CBC").unwrap().has_direct_leaves);
}

#[test]
fn custom_delimiter() {
    let forest =
        PanelForest::from_flat_names(["Hematology-CBC-WBC"].into_iter(), '-').unwrap();
    assert_eq!(
        forest.nearest_panel("Hematology-CBC-WBC").unwrap().flat_name,
        "Hematology-CBC"
    );
}

#[test]
fn inconsistent_tree_is_rejected() {
    let trees = vec![PanelTree::panel(
        "Hematology",
        "Hem",
        vec![PanelTree::leaf("Sodium", "Chem.Na")],
    )];
    let err = PanelForest::from_trees(&trees, '.').unwrap_err();
    assert!(matches!(err, TimelineError::InconsistentHierarchy { .. }));
}

#[test]
fn empty_segments_do_not_create_panels() {
    let names = ["Hem.CBC.WBC", "Hem..RBC"];
    let forest = derived_forest(&names);
    assert!(forest.panel("Hem.").is_none());
}
