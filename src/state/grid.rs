use std::collections::BTreeMap;

use crate::state::value::{self, CellValue, ColumnType};

/// Column metadata. `id` is immutable once created; `title` and `ty` may
/// change over the column's lifetime. `width` and `header_color` are opaque
/// presentation hints carried for the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub ty: ColumnType,
    pub width: Option<String>,
    pub header_color: Option<String>,
}

/// Number of lettered columns and empty rows in a freshly mounted sheet.
const DEFAULT_COLUMNS: usize = 10;
const DEFAULT_ROWS: usize = 20;

/// The addressable cell/column/row model. Cells are keyed by the
/// `(row id, column id)` pair, never by flat index; a missing entry reads as
/// `CellValue::Null`. All mutations addressed to unknown ids are silent
/// no-ops so a stale reference can never take down the interactive session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    columns: Vec<Column>,
    rows: Vec<String>,
    cells: BTreeMap<(String, String), CellValue>,
    next_column: usize,
    next_row: usize,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default sheet a host mounts with: lettered text columns over a
    /// block of empty rows.
    pub fn with_defaults() -> Self {
        let mut grid = Self::new();
        for _ in 0..DEFAULT_COLUMNS {
            grid.append_column();
        }
        for _ in 0..DEFAULT_ROWS {
            grid.append_row();
        }
        grid
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn column_ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn column(&self, col_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == col_id)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn has_row(&self, row_id: &str) -> bool {
        self.rows.iter().any(|r| r == row_id)
    }

    /// Stored value, or `Null` for a never-written or unknown address.
    /// Never fails for unknown ids.
    pub fn cell_value(&self, row_id: &str, col_id: &str) -> CellValue {
        self.cells
            .get(&(row_id.to_string(), col_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Display form of a cell under its column's type.
    pub fn display_value(&self, row_id: &str, col_id: &str) -> String {
        let ty = self.column(col_id).map(|c| c.ty).unwrap_or_default();
        value::display_value(ty, &self.cell_value(row_id, col_id))
    }

    /// Direct store without coercion. Used for the Escape restore path and
    /// for bulk import, where raw values are carried unmodified.
    pub fn set_cell(&mut self, row_id: &str, col_id: &str, value: CellValue) {
        if !self.has_row(row_id) || self.column(col_id).is_none() {
            return;
        }
        self.cells
            .insert((row_id.to_string(), col_id.to_string()), value);
    }

    /// Live keystroke write-through: the in-progress text lands in the model
    /// uncoerced so other observers see partial input. Final coercion happens
    /// at commit time only.
    pub fn set_cell_draft(&mut self, row_id: &str, col_id: &str, raw: &str) {
        let value = if raw.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(raw.to_string())
        };
        self.set_cell(row_id, col_id, value);
    }

    /// Commit an edited string: looks up the column type, runs coercion and
    /// stores the canonical value. Returns the stored value for change
    /// notification, or `None` when the write was rejected or addressed to
    /// an unknown id (prior value retained either way).
    pub fn commit_cell(&mut self, row_id: &str, col_id: &str, raw: &str) -> Option<CellValue> {
        if !self.has_row(row_id) {
            return None;
        }
        let ty = self.column(col_id)?.ty;
        let value = value::coerce_commit(ty, raw)?;
        self.cells
            .insert((row_id.to_string(), col_id.to_string()), value.clone());
        Some(value)
    }

    /// Appends a column with a synthesized id and spreadsheet-letter title,
    /// default type text.
    pub fn append_column(&mut self) -> String {
        self.next_column += 1;
        let id = format!("col-{}", self.next_column);
        self.columns.push(Column {
            id: id.clone(),
            title: column_letter(self.next_column),
            ty: ColumnType::Text,
            width: None,
            header_color: None,
        });
        id
    }

    /// Appends a row with a synthesized id, pre-populating an empty cell for
    /// every existing column.
    pub fn append_row(&mut self) -> String {
        self.next_row += 1;
        let id = format!("row-{}", self.next_row);
        for column in &self.columns {
            self.cells
                .insert((id.clone(), column.id.clone()), CellValue::Null);
        }
        self.rows.push(id.clone());
        id
    }

    pub fn rename_column(&mut self, col_id: &str, title: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == col_id) {
            column.title = title.to_string();
        }
    }

    /// Changes a column's type. Retyping to url runs a one-time back-fill:
    /// every existing non-empty value lacking a scheme prefix is rewritten
    /// with `https://` prepended. The pass is idempotent, so repeating the
    /// retype never double-prefixes. Other target types rewrite nothing.
    pub fn retype_column(&mut self, col_id: &str, ty: ColumnType) {
        let Some(column) = self.columns.iter_mut().find(|c| c.id == col_id) else {
            return;
        };
        column.ty = ty;
        if ty != ColumnType::Url {
            return;
        }
        for row_id in &self.rows {
            let key = (row_id.clone(), col_id.to_string());
            let Some(existing) = self.cells.get(&key) else {
                continue;
            };
            if existing.is_empty() {
                continue;
            }
            let raw = existing.raw_string();
            if !value::has_url_protocol(&raw) {
                self.cells
                    .insert(key, CellValue::Text(value::ensure_url_protocol(&raw)));
            }
        }
    }

    pub fn resize_column(&mut self, col_id: &str, width: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == col_id) {
            column.width = Some(width.to_string());
        }
    }

    pub fn set_header_color(&mut self, col_id: &str, color: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == col_id) {
            column.header_color = Some(color.to_string());
        }
    }

    /// Row ids whose display values contain the query, case-insensitive.
    /// An empty query keeps every row visible.
    pub fn visible_rows(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_ascii_lowercase();
        self.rows
            .iter()
            .filter(|row_id| needle.is_empty() || self.row_matches(row_id, &needle))
            .cloned()
            .collect()
    }

    pub fn cell_matches_search(&self, row_id: &str, col_id: &str, query: &str) -> bool {
        let needle = query.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.display_value(row_id, col_id)
            .to_ascii_lowercase()
            .contains(&needle)
    }

    fn row_matches(&self, row_id: &str, needle: &str) -> bool {
        self.columns.iter().any(|column| {
            self.display_value(row_id, &column.id)
                .to_ascii_lowercase()
                .contains(needle)
        })
    }
}

/// Spreadsheet-style column letters: 1 -> "A", 26 -> "Z", 27 -> "AA",
/// bijective base-26.
pub fn column_letter(n: usize) -> String {
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
