/// Addressable cell identity: always the (row id, column id) pair, never a
/// flat index, so references stay stable under structural growth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub row: String,
    pub col: String,
}

impl CellRef {
    pub fn new(row: impl Into<String>, col: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            col: col.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Tab { shift: bool },
    Enter,
    Escape,
    /// A single printable character with no modifier held.
    Char(char),
}

/// What the controller must do after a transition: which cell's draft to
/// finalize, which to restore to its last-committed value, which cell just
/// entered editing (so a fresh draft can be opened), and the character that
/// should seed the new draft.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyOutcome {
    pub handled: bool,
    pub committed: Option<CellRef>,
    pub cancelled: Option<CellRef>,
    pub started: Option<CellRef>,
    pub seed: Option<char>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }
}

/// Tracks the active (focused) cell and the at-most-one editing cell.
/// Invariant: the editing cell, when set, is always also the active cell.
/// Transitions are synchronous; each input is fully processed before the
/// next is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigator {
    active: Option<CellRef>,
    editing: Option<CellRef>,
    selection_enabled: bool,
    editing_enabled: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            active: None,
            editing: None,
            selection_enabled: true,
            editing_enabled: true,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&CellRef> {
        self.active.as_ref()
    }

    pub fn editing(&self) -> Option<&CellRef> {
        self.editing.as_ref()
    }

    pub fn is_active(&self, row_id: &str, col_id: &str) -> bool {
        self.active
            .as_ref()
            .map(|c| c.row == row_id && c.col == col_id)
            .unwrap_or(false)
    }

    pub fn is_editing(&self, row_id: &str, col_id: &str) -> bool {
        self.editing
            .as_ref()
            .map(|c| c.row == row_id && c.col == col_id)
            .unwrap_or(false)
    }

    pub fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    pub fn set_editing_enabled(&mut self, enabled: bool) {
        self.editing_enabled = enabled;
        if !enabled {
            self.editing = None;
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.editing = None;
    }

    /// Drops pointers whose row or column no longer exists, e.g. after an
    /// import replaced the whole model.
    pub fn retain_within(&mut self, rows: &[String], cols: &[String]) {
        let stale = |cell: &CellRef| {
            !rows.iter().any(|r| *r == cell.row) || !cols.iter().any(|c| *c == cell.col)
        };
        if self.active.as_ref().map(&stale).unwrap_or(false) {
            self.active = None;
            self.editing = None;
        }
        if self.editing.as_ref().map(&stale).unwrap_or(false) {
            self.editing = None;
        }
    }

    /// Pointer selection of a cell. With editing enabled the cell enters
    /// editing immediately; a previously editing cell is committed first.
    pub fn click(&mut self, row_id: &str, col_id: &str) -> KeyOutcome {
        if !self.selection_enabled {
            return KeyOutcome::ignored();
        }
        let target = CellRef::new(row_id, col_id);
        let mut outcome = KeyOutcome {
            handled: true,
            ..Default::default()
        };
        if let Some(previous) = self.editing.take() {
            if previous != target {
                outcome.committed = Some(previous);
            }
        }
        self.active = Some(target.clone());
        if self.editing_enabled {
            self.editing = Some(target.clone());
            outcome.started = Some(target);
        }
        outcome
    }

    /// Processes one keyboard input against the current grid bounds. `rows`
    /// and `cols` are the ordered id sequences; values are never consulted.
    pub fn on_key(&mut self, rows: &[String], cols: &[String], key: NavKey) -> KeyOutcome {
        if !self.selection_enabled || rows.is_empty() || cols.is_empty() {
            return KeyOutcome::ignored();
        }
        let Some(active) = self.active.clone() else {
            return KeyOutcome::ignored();
        };
        let Some(row_index) = rows.iter().position(|r| *r == active.row) else {
            return KeyOutcome::ignored();
        };
        let Some(col_index) = cols.iter().position(|c| *c == active.col) else {
            return KeyOutcome::ignored();
        };

        match key {
            NavKey::Up => self.arrow_move(rows, cols, wrap_dec(row_index, rows.len()), col_index),
            NavKey::Down => self.arrow_move(rows, cols, wrap_inc(row_index, rows.len()), col_index),
            NavKey::Left => self.arrow_move(rows, cols, row_index, wrap_dec(col_index, cols.len())),
            NavKey::Right => self.arrow_move(rows, cols, row_index, wrap_inc(col_index, cols.len())),
            NavKey::Tab { shift } => {
                let (next_row, next_col) = if shift {
                    tab_backward(row_index, col_index, rows.len(), cols.len())
                } else {
                    tab_forward(row_index, col_index, rows.len(), cols.len())
                };
                self.arrow_move(rows, cols, next_row, next_col)
            }
            NavKey::Enter => {
                if !self.editing_enabled {
                    return KeyOutcome::ignored();
                }
                if self.editing.is_some() {
                    // Commit and advance one row down, wrapping.
                    let committed = self.editing.take();
                    let next = CellRef::new(rows[wrap_inc(row_index, rows.len())].clone(), active.col);
                    self.active = Some(next.clone());
                    self.editing = Some(next.clone());
                    KeyOutcome {
                        handled: true,
                        committed,
                        started: Some(next),
                        ..Default::default()
                    }
                } else {
                    self.editing = Some(active.clone());
                    KeyOutcome {
                        handled: true,
                        started: Some(active),
                        ..Default::default()
                    }
                }
            }
            NavKey::Escape => {
                if let Some(cell) = self.editing.take() {
                    // Discard the in-progress draft; the cell stays active.
                    KeyOutcome {
                        handled: true,
                        cancelled: Some(cell),
                        ..Default::default()
                    }
                } else {
                    KeyOutcome::ignored()
                }
            }
            NavKey::Char(ch) => {
                if self.editing.is_some() || !self.editing_enabled {
                    return KeyOutcome::ignored();
                }
                self.editing = Some(active.clone());
                KeyOutcome {
                    handled: true,
                    started: Some(active),
                    seed: Some(ch),
                    ..Default::default()
                }
            }
        }
    }

    fn arrow_move(
        &mut self,
        rows: &[String],
        cols: &[String],
        next_row: usize,
        next_col: usize,
    ) -> KeyOutcome {
        let committed = self.editing.take();
        let next = CellRef::new(rows[next_row].clone(), cols[next_col].clone());
        self.active = Some(next.clone());
        let mut outcome = KeyOutcome {
            handled: true,
            committed,
            ..Default::default()
        };
        if self.editing_enabled {
            self.editing = Some(next.clone());
            outcome.started = Some(next);
        }
        outcome
    }
}

fn wrap_inc(index: usize, len: usize) -> usize {
    (index + 1) % len
}

fn wrap_dec(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Tab treats the grid as one cyclic sequence in row-major order: crossing
/// the last column advances the row, and the last cell of the last row wraps
/// to the first cell of the first row.
fn tab_forward(row: usize, col: usize, row_len: usize, col_len: usize) -> (usize, usize) {
    if col == col_len - 1 {
        (wrap_inc(row, row_len), 0)
    } else {
        (row, col + 1)
    }
}

fn tab_backward(row: usize, col: usize, row_len: usize, col_len: usize) -> (usize, usize) {
    if col == 0 {
        (wrap_dec(row, row_len), col_len - 1)
    } else {
        (row, col - 1)
    }
}
