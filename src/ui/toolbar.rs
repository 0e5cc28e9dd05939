use dioxus::prelude::*;
use std::path::PathBuf;

use crate::state::grid::Grid;
use crate::state::i18n::{self, Language};
use crate::state::nav::Navigator;
use crate::ui::actions;

#[component]
pub fn Toolbar(
    grid: Signal<Grid>,
    nav: Signal<Navigator>,
    language: Signal<Language>,
    file_path: Signal<Option<PathBuf>>,
    error_message: Signal<Option<String>>,
    search_query: Signal<String>,
    export_success: Signal<bool>,
) -> Element {
    let current_language = *language.read();
    let search_value = search_query.read().clone();

    let import_label = i18n::tr(current_language, "toolbar.import");
    let export_label = i18n::tr(current_language, "toolbar.export");
    let export_success_label = i18n::tr(current_language, "toolbar.export_success");
    let search_placeholder = i18n::tr(current_language, "toolbar.search_placeholder");

    rsx! {
        div { class: "toolbar",
            // File group
            div { class: "toolbar-group",
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-language",
                    value: "{current_language.code()}",
                    onchange: move |evt| {
                        if let Some(next_language) = Language::from_code(&evt.value()) {
                            language.set(next_language);
                        }
                    },
                    for lang in Language::all().iter().copied() {
                        option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-import",
                    onclick: move |_| {
                        spawn(async move {
                            actions::import_file(
                                grid,
                                nav,
                                language,
                                file_path,
                                error_message,
                                search_query,
                            )
                            .await;
                        });
                    },
                    "\u{1F4C2} {import_label}"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-export",
                    onclick: move |_| {
                        spawn(async move {
                            let exported =
                                actions::export_file(grid, language, file_path, error_message)
                                    .await;
                            if exported {
                                export_success.set(true);
                                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                                export_success.set(false);
                            }
                        });
                    },
                    "\u{1F4BE} {export_label}"
                }
                if *export_success.read() {
                    span { class: "export-success", "\u{2714} {export_success_label}" }
                }
            }
            div { class: "toolbar-separator" }

            // Search group
            div { class: "toolbar-group",
                input {
                    class: "toolbar-input",
                    id: "input-search-query",
                    placeholder: "{search_placeholder}",
                    value: "{search_value}",
                    oninput: move |evt| {
                        search_query.set(evt.value());
                    }
                }
            }

            // Info area (right-aligned)
            div { class: "toolbar-info",
                if let Some(path) = file_path.read().as_ref() {
                    span { class: "file-path", "{path.display()}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", "{err}" }
                }
            }
        }
    }
}
