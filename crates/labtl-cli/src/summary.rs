use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labtl_cli::commands::PanelReport;
use labtl_layout::GroupedLayout;
use labtl_model::PanelNode;

pub fn print_layout_summary(layout: &GroupedLayout) {
    println!(
        "Columns: {}  Days: {}  Years: {}",
        layout.axis.len(),
        layout.axis.days.len(),
        layout.axis.years.len()
    );
    if let Some(panel) = &layout.current_panel {
        println!("Current panel: {panel}");
    }

    let mut axis = Table::new();
    axis.set_header(vec![
        header_cell("Year"),
        header_cell("Day"),
        header_cell("Times"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut axis);
    align_column(&mut axis, 3, CellAlignment::Right);
    let mut columns = layout.axis.columns.iter();
    for day in &layout.axis.days {
        let times: Vec<&str> = columns
            .by_ref()
            .take(day.span)
            .map(|column| column.label.as_str())
            .collect();
        table_row_for_day(&mut axis, day.year, &day.day, &times);
    }
    println!("{axis}");

    let mut groups = Table::new();
    groups.set_header(vec![
        header_cell("#"),
        header_cell("Panel"),
        header_cell("Display"),
        header_cell("Rows"),
        header_cell("Observations"),
    ]);
    apply_summary_table_style(&mut groups);
    align_column(&mut groups, 0, CellAlignment::Right);
    align_column(&mut groups, 3, CellAlignment::Right);
    align_column(&mut groups, 4, CellAlignment::Right);
    let mut total_observations = 0usize;
    for group in &layout.groups {
        let observations: usize = group.rows.iter().map(|row| row.entries.len()).sum();
        total_observations += observations;
        groups.add_row(vec![
            Cell::new(group.group_number),
            panel_cell(&group.panel),
            Cell::new(&group.display),
            Cell::new(group.rows.len()),
            Cell::new(observations),
        ]);
    }
    groups.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(layout.row_count()).add_attribute(Attribute::Bold),
        Cell::new(total_observations).add_attribute(Attribute::Bold),
    ]);
    println!("{groups}");

    if layout.skipped_observations > 0 {
        eprintln!(
            "Skipped {} observation(s) with unreadable timestamps",
            layout.skipped_observations
        );
    }
    if !layout.orphans.is_empty() {
        eprintln!("Rows outside every panel:");
        for orphan in &layout.orphans {
            eprintln!("- {orphan}");
        }
    }
}

pub fn print_panels(report: &PanelReport) {
    if report.derived {
        println!("Panels derived from row flat names");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Panel"),
        header_cell("Display"),
        header_cell("Leaves"),
        header_cell("Checked"),
        header_cell("Lowest"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for panel in &report.panels {
        let checked = panel
            .leaves
            .iter()
            .filter(|leaf| report.filter.is_checked(leaf))
            .count();
        table.add_row(vec![
            indented_cell(panel),
            Cell::new(&panel.display),
            Cell::new(panel.leaves.len()),
            count_cell(checked),
            lowest_cell(report.is_lowest_parent(&panel.flat_name)),
        ]);
    }
    println!("{table}");
    if !report.filter.some_checked() {
        println!("No tests checked: every panel with rows is shown");
    }
}

fn table_row_for_day(table: &mut Table, year: i32, day: &str, times: &[&str]) {
    table.add_row(vec![
        Cell::new(year),
        Cell::new(day),
        Cell::new(times.join(", ")),
        Cell::new(times.len()),
    ]);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn panel_cell(flat_name: &str) -> Cell {
    Cell::new(flat_name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn indented_cell(panel: &PanelNode) -> Cell {
    let label = format!("{}{}", "  ".repeat(panel.depth), panel.flat_name);
    if panel.depth == 0 {
        panel_cell(&label)
    } else {
        Cell::new(label)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn lowest_cell(lowest: bool) -> Cell {
    if lowest {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
