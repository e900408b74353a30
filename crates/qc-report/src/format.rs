//! Text helpers shared by the console and Markdown renderers.

use qc_model::RowRef;

/// Row numbers listed before the list is truncated.
pub const ROW_LIST_LIMIT: usize = 10;
/// Missing serials listed before the list is truncated.
pub const SERIAL_LIST_LIMIT: usize = 5;
/// Width of a full bar in the console charts.
pub const BAR_WIDTH: usize = 40;

/// Formats a ratio in `[0, 1]` as a percentage with two decimals.
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Formats a ratio in `[0, 1]` as a percentage with one decimal.
pub fn percent_short(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Joins up to `limit` items, followed by `... and N more` when truncated.
pub fn truncated_list<T: ToString>(items: &[T], limit: usize) -> String {
    let shown: Vec<String> = items.iter().take(limit).map(ToString::to_string).collect();
    let mut joined = shown.join(", ");
    if items.len() > limit {
        joined.push_str(&format!(", ... and {} more", items.len() - limit));
    }
    joined
}

/// Escapes `|` so a value stays inside its Markdown table cell.
pub fn table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// User-facing row numbers of a row list, truncated at [`ROW_LIST_LIMIT`].
pub fn row_list(rows: &[RowRef]) -> String {
    let numbers: Vec<usize> = rows.iter().map(RowRef::display_row).collect();
    truncated_list(&numbers, ROW_LIST_LIMIT)
}

/// Quoted identifier, or a marker when the row has none.
pub fn id_label(id: Option<&str>) -> String {
    match id {
        Some(id) => format!("'{id}'"),
        None => "(no ID)".to_string(),
    }
}

/// Horizontal bar proportional to a ratio in `[0, 1]`.
pub fn bar(ratio: f64) -> String {
    let width = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width)
}

/// Lays names out in a fixed-width grid, `width` characters per line.
pub fn column_grid(names: &[String], width: usize) -> Vec<String> {
    let Some(longest) = names.iter().map(|name| name.chars().count()).max() else {
        return Vec::new();
    };
    let cell = longest + 2;
    let per_line = (width / cell).max(1);
    names
        .chunks(per_line)
        .map(|chunk| {
            chunk
                .iter()
                .map(|name| format!("{name:<cell$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.25), "25.00%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent_short(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn test_truncated_list() {
        assert_eq!(truncated_list(&[1, 2, 3], 5), "1, 2, 3");
        assert_eq!(
            truncated_list(&[1, 2, 3, 4, 5, 6, 7], 5),
            "1, 2, 3, 4, 5, ... and 2 more"
        );
        assert_eq!(truncated_list::<u64>(&[], 5), "");
    }

    #[test]
    fn test_table_cell_escapes_pipes() {
        assert_eq!(table_cell("24|1"), "24\\|1");
        assert_eq!(table_cell("25001"), "25001");
    }

    #[test]
    fn test_row_list_applies_offset() {
        let rows: Vec<RowRef> = (0..12).map(|row| RowRef::new(row, None)).collect();
        assert_eq!(row_list(&rows), "2, 3, 4, 5, 6, 7, 8, 9, 10, 11, ... and 2 more");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(0.5).chars().count(), 20);
        assert_eq!(bar(1.5).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_column_grid() {
        let names: Vec<String> = ["ID", "processo", "nome"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let lines = column_grid(&names, 25);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("nome"));
        assert!(column_grid(&[], 80).is_empty());
    }
}
