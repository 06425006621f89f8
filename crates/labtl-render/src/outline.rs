//! Plain-text outline of a render model, for terminals and logs.

use crate::cells::{GridRow, TimelineCell};
use crate::header::HeaderCell;
use crate::view::TimelineView;

/// Blank cell marker.
const BLANK: &str = "-";

/// Render `view` as a line-oriented outline.
///
/// Header cells print as `label (span)`. Rows start with `~` when zebra
/// striped; abnormal values carry their style class in parentheses.
pub fn render_outline(view: &TimelineView) -> String {
    let mut lines = Vec::new();
    match view {
        TimelineView::Empty {
            header_title,
            display_text,
        } => {
            lines.push(format!("{header_title}: no {display_text} to display"));
        }
        TimelineView::Grid {
            corner_label,
            header,
            groups,
        } => {
            lines.push(format!("corner: {corner_label}"));
            lines.push(format!("years:  {}", header_row(&header.years)));
            lines.push(format!("days:   {}", header_row(&header.days)));
            lines.push(format!("times:  {}", header_row(&header.times)));
            let shadow = if header.show_shadow { " shadow" } else { "" };
            lines.push(format!("scroll: {}{shadow}", header.offset));

            for group in groups {
                match &group.header {
                    Some(label) => {
                        lines.push(format!("group {} {}: {label}", group.group_number, group.panel));
                    }
                    None => lines.push(format!("group {} {}", group.group_number, group.panel)),
                }
                lines.extend(group.rows.iter().map(row_line));
            }
        }
    }
    lines.join("\n")
}

fn header_row(cells: &[HeaderCell]) -> String {
    cells
        .iter()
        .map(|cell| format!("{} ({})", cell.label, cell.span))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn row_line(row: &GridRow) -> String {
    let zebra = row.cells.first().is_some_and(|cell| cell.zebra);
    let mut line = String::from(if zebra { "~ " } else { "  " });
    line.push_str(&row.start.title);
    let range_units = row.start.range_units();
    if !range_units.is_empty() {
        line.push_str(&format!(" [{range_units}]"));
    }
    for cell in &row.cells {
        line.push_str(" | ");
        line.push_str(&cell_text(cell));
    }
    line
}

fn cell_text(cell: &TimelineCell) -> String {
    if cell.is_blank() {
        return BLANK.to_string();
    }
    match cell.css_class {
        Some(class) => format!("{} ({class})", cell.text),
        None => cell.text.clone(),
    }
}
