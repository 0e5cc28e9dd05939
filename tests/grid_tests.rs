use gridsheet::state::grid::{column_letter, Grid};
use gridsheet::state::value::{CellValue, ColumnType, Status};

fn small_grid() -> (Grid, Vec<String>, Vec<String>) {
    let mut grid = Grid::new();
    let cols = vec![grid.append_column(), grid.append_column()];
    let rows = vec![grid.append_row(), grid.append_row(), grid.append_row()];
    (grid, rows, cols)
}

#[test]
fn test_never_written_cell_reads_empty() {
    let (grid, rows, cols) = small_grid();
    assert_eq!(grid.cell_value(&rows[0], &cols[0]), CellValue::Null);
}

#[test]
fn test_unknown_ids_read_empty_never_fail() {
    let (grid, _, _) = small_grid();
    assert_eq!(grid.cell_value("row-99", "col-99"), CellValue::Null);
    assert_eq!(grid.display_value("row-99", "col-99"), "");
}

#[test]
fn test_mutations_on_unknown_ids_are_noops() {
    let (mut grid, rows, cols) = small_grid();
    grid.set_cell("row-99", &cols[0], CellValue::Text("x".to_string()));
    assert_eq!(grid.commit_cell(&rows[0], "col-99", "x"), None);
    assert_eq!(grid.commit_cell("row-99", &cols[0], "x"), None);
    grid.rename_column("col-99", "ghost");
    grid.retype_column("col-99", ColumnType::Url);
    assert_eq!(grid.cell_value(&rows[0], &cols[0]), CellValue::Null);
}

#[test]
fn test_commit_stores_coerced_value() {
    let (mut grid, rows, cols) = small_grid();
    grid.retype_column(&cols[0], ColumnType::Number);
    let stored = grid.commit_cell(&rows[0], &cols[0], "42");
    assert_eq!(stored, Some(CellValue::Number(42.0)));
    assert_eq!(grid.cell_value(&rows[0], &cols[0]), CellValue::Number(42.0));
}

#[test]
fn test_status_rejection_retains_prior_value() {
    let (mut grid, rows, cols) = small_grid();
    grid.retype_column(&cols[0], ColumnType::Status);
    grid.commit_cell(&rows[0], &cols[0], "blocked");
    assert_eq!(grid.commit_cell(&rows[0], &cols[0], "someday"), None);
    assert_eq!(
        grid.cell_value(&rows[0], &cols[0]),
        CellValue::Status(Status::Blocked)
    );
}

#[test]
fn test_draft_write_is_visible_uncoerced() {
    let (mut grid, rows, cols) = small_grid();
    grid.retype_column(&cols[0], ColumnType::Url);
    grid.set_cell_draft(&rows[0], &cols[0], "exampl");
    assert_eq!(
        grid.cell_value(&rows[0], &cols[0]),
        CellValue::Text("exampl".to_string())
    );
}

#[test]
fn test_column_letter_sequence() {
    assert_eq!(column_letter(1), "A");
    assert_eq!(column_letter(2), "B");
    assert_eq!(column_letter(26), "Z");
    assert_eq!(column_letter(27), "AA");
    assert_eq!(column_letter(52), "AZ");
    assert_eq!(column_letter(53), "BA");
    assert_eq!(column_letter(702), "ZZ");
    assert_eq!(column_letter(703), "AAA");
}

#[test]
fn test_append_column_synthesizes_lettered_titles() {
    let mut grid = Grid::new();
    for _ in 0..27 {
        grid.append_column();
    }
    let columns = grid.columns();
    assert_eq!(columns[0].title, "A");
    assert_eq!(columns[0].ty, ColumnType::Text);
    assert_eq!(columns[25].title, "Z");
    assert_eq!(columns[26].title, "AA");
}

#[test]
fn test_append_row_prepopulates_empty_cells() {
    let mut grid = Grid::new();
    let col = grid.append_column();
    let row = grid.append_row();
    assert_eq!(grid.row_count(), 1);
    assert_eq!(grid.cell_value(&row, &col), CellValue::Null);
    assert_eq!(grid.display_value(&row, &col), "");
}

#[test]
fn test_ids_stay_unique_across_growth() {
    let (mut grid, rows, cols) = small_grid();
    let new_col = grid.append_column();
    let new_row = grid.append_row();
    assert!(!cols.contains(&new_col));
    assert!(!rows.contains(&new_row));
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.row_count(), 4);
}

#[test]
fn test_rename_column_keeps_id() {
    let (mut grid, _, cols) = small_grid();
    grid.rename_column(&cols[0], "Job Request");
    let column = grid.column(&cols[0]).unwrap();
    assert_eq!(column.title, "Job Request");
    assert_eq!(column.id, cols[0]);
}

#[test]
fn test_retype_to_url_backfills_existing_values() {
    let (mut grid, rows, cols) = small_grid();
    grid.commit_cell(&rows[0], &cols[0], "example.com");
    grid.commit_cell(&rows[1], &cols[0], "https://already.dev");
    grid.retype_column(&cols[0], ColumnType::Url);

    assert_eq!(
        grid.cell_value(&rows[0], &cols[0]),
        CellValue::Text("https://example.com".to_string())
    );
    assert_eq!(
        grid.cell_value(&rows[1], &cols[0]),
        CellValue::Text("https://already.dev".to_string())
    );
    // Empty cells stay empty.
    assert_eq!(grid.cell_value(&rows[2], &cols[0]), CellValue::Null);
}

#[test]
fn test_retype_to_url_twice_never_double_prefixes() {
    let (mut grid, rows, cols) = small_grid();
    grid.commit_cell(&rows[0], &cols[0], "example.com");
    grid.retype_column(&cols[0], ColumnType::Url);
    grid.retype_column(&cols[0], ColumnType::Url);
    assert_eq!(
        grid.cell_value(&rows[0], &cols[0]),
        CellValue::Text("https://example.com".to_string())
    );
}

#[test]
fn test_retype_away_from_url_rewrites_nothing() {
    let (mut grid, rows, cols) = small_grid();
    grid.commit_cell(&rows[0], &cols[0], "plain text");
    grid.retype_column(&cols[0], ColumnType::Number);
    assert_eq!(
        grid.cell_value(&rows[0], &cols[0]),
        CellValue::Text("plain text".to_string())
    );
}

#[test]
fn test_presentation_hints_are_carried() {
    let (mut grid, _, cols) = small_grid();
    grid.resize_column(&cols[0], "200px");
    grid.set_header_color(&cols[1], "#E8F0E9");
    assert_eq!(grid.column(&cols[0]).unwrap().width.as_deref(), Some("200px"));
    assert_eq!(
        grid.column(&cols[1]).unwrap().header_color.as_deref(),
        Some("#E8F0E9")
    );
}

#[test]
fn test_visible_rows_filters_by_substring() {
    let (mut grid, rows, cols) = small_grid();
    grid.commit_cell(&rows[0], &cols[0], "Launch campaign");
    grid.commit_cell(&rows[1], &cols[1], "press kit");
    grid.commit_cell(&rows[2], &cols[0], "user testing");

    assert_eq!(grid.visible_rows(""), rows);
    assert_eq!(grid.visible_rows("PRESS"), vec![rows[1].clone()]);
    assert_eq!(
        grid.visible_rows("ca"),
        vec![rows[0].clone()] // "Launch campaign"
    );
    assert!(grid.visible_rows("zzz").is_empty());
}

#[test]
fn test_cell_matches_search_is_case_insensitive() {
    let (mut grid, rows, cols) = small_grid();
    grid.commit_cell(&rows[0], &cols[0], "Launch campaign");
    assert!(grid.cell_matches_search(&rows[0], &cols[0], "launch"));
    assert!(!grid.cell_matches_search(&rows[0], &cols[0], ""));
    assert!(!grid.cell_matches_search(&rows[1], &cols[0], "launch"));
}

#[test]
fn test_with_defaults_shape() {
    let grid = Grid::with_defaults();
    assert_eq!(grid.column_count(), 10);
    assert_eq!(grid.row_count(), 20);
    assert_eq!(grid.columns()[0].title, "A");
    assert_eq!(grid.columns()[9].title, "J");
    assert!(grid
        .columns()
        .iter()
        .all(|c| c.ty == ColumnType::Text));
}
