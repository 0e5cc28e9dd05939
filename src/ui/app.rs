use dioxus::prelude::*;
use std::path::PathBuf;

use crate::state::grid::Grid;
use crate::state::i18n::Language;
use crate::state::nav::Navigator;
use crate::ui::table::GridTable;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let grid = use_signal(Grid::with_defaults);
    let nav = use_signal(Navigator::new);
    let language = use_signal(Language::default);
    let file_path = use_signal::<Option<PathBuf>>(|| None);
    let mut error_message = use_signal::<Option<String>>(|| None);
    let search_query = use_signal(String::new);
    let export_success = use_signal(|| false);

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            Toolbar { grid, nav, language, file_path, error_message, search_query, export_success }
            GridTable {
                grid,
                nav,
                language,
                search_query,
                // A successful edit clears any stale import/export error.
                on_cell_change: move |_| {
                    error_message.set(None);
                },
            }
        }
    }
}
