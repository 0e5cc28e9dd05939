use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::xlsx_io;
use crate::state::grid::Grid;
use crate::state::i18n::{self, Language};
use crate::state::nav::Navigator;

/// Picks a workbook and replaces the whole model in one observable step.
/// A failed parse surfaces a single error and leaves the prior model,
/// pointers and search untouched.
pub async fn import_file(
    mut grid: Signal<Grid>,
    mut nav: Signal<Navigator>,
    language: Signal<Language>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
    mut search_query: Signal<String>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter(
            i18n::tr(*language.read(), "dialog.workbook_filter"),
            &["xlsx", "xls"],
        )
        .pick_file()
        .await;

    if let Some(handle) = task {
        let path = handle.path().to_path_buf();
        match xlsx_io::import_workbook(&path) {
            Ok(imported) => {
                let rows = imported.rows().to_vec();
                let cols = imported.column_ids();
                grid.set(imported);
                // Pointers into the replaced model are stale by construction.
                nav.with_mut(|n| n.retain_within(&rows, &cols));
                search_query.set(String::new());
                file_path.set(Some(path));
                error_message.set(None);
            }
            Err(e) => {
                error_message.set(Some(e.to_string()));
            }
        }
    }
}

/// Exports the grid to a host-chosen path, defaulting to a date-stamped
/// filename. Returns whether a workbook was written.
pub async fn export_file(
    grid: Signal<Grid>,
    language: Signal<Language>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    let task = rfd::AsyncFileDialog::new()
        .add_filter(
            i18n::tr(*language.read(), "dialog.workbook_filter"),
            &["xlsx"],
        )
        .set_file_name(xlsx_io::default_export_filename())
        .save_file()
        .await;

    let Some(handle) = task else {
        return false;
    };
    let path = handle.path().to_path_buf();

    let snapshot = grid.read().clone();
    if let Err(err) = xlsx_io::export_workbook(&snapshot, &path) {
        error_message.set(Some(err.to_string()));
        return false;
    }

    file_path.set(Some(path));
    error_message.set(None);
    true
}
