use dioxus::prelude::{Key, Modifiers, *};

use crate::state::grid::{Column, Grid};
use crate::state::i18n::{self, Language};
use crate::state::nav::{CellRef, KeyOutcome, NavKey, Navigator};
use crate::state::value::{self, CellValue, ColumnType, Status};

/// In-progress edit of one cell: the draft text mirrored into the model on
/// every keystroke, and the last-committed value restored on Escape.
#[derive(Clone, PartialEq)]
struct EditSession {
    cell: CellRef,
    draft: String,
    origin: CellValue,
}

#[derive(Clone, PartialEq)]
struct HeaderEdit {
    col_id: String,
    draft: String,
}

#[component]
pub fn GridTable(
    grid: Signal<Grid>,
    nav: Signal<Navigator>,
    language: Signal<Language>,
    search_query: Signal<String>,
    #[props(default)] on_cell_change: EventHandler<(String, String, CellValue)>,
    #[props(default)] on_column_title_change: EventHandler<(String, String)>,
    #[props(default)] on_column_type_change: EventHandler<(String, ColumnType)>,
    #[props(default)] on_column_add: EventHandler<()>,
    #[props(default)] on_row_add: EventHandler<()>,
) -> Element {
    let session = use_signal::<Option<EditSession>>(|| None);
    let header_edit = use_signal::<Option<HeaderEdit>>(|| None);

    let snapshot = grid.read().clone();
    let columns = snapshot.columns().to_vec();
    let query = search_query.read().clone();
    let visible_rows = snapshot.visible_rows(&query);
    let current_language = *language.read();

    if columns.is_empty() {
        let empty_label = i18n::tr(current_language, "table.empty");
        return rsx! {
            p { class: "empty-message", id: "empty-message", "{empty_label}" }
        };
    }

    let add_row_label = i18n::tr(current_language, "table.add_row");
    let add_column_title = i18n::tr(current_language, "table.add_column");

    rsx! {
        div {
            class: "grid-container",
            id: "grid-container",
            tabindex: "0",
            onkeydown: move |evt| {
                let Some(key) = to_nav_key(&evt) else {
                    return;
                };
                let (rows, cols) = {
                    let g = grid.read();
                    (g.rows().to_vec(), g.column_ids())
                };
                let outcome = nav.with_mut(|n| n.on_key(&rows, &cols, key));
                if outcome.handled {
                    evt.prevent_default();
                    apply_outcome(grid, session, on_cell_change, outcome);
                }
            },
            table {
                thead {
                    tr {
                        th { class: "row-number", "#" }
                        for col in &columns {
                            HeaderCell {
                                column: col.clone(),
                                grid,
                                header_edit,
                                on_column_title_change,
                                on_column_type_change,
                            }
                        }
                        th { class: "add-column-cell",
                            button {
                                class: "add-column-btn",
                                id: "btn-add-column",
                                title: "{add_column_title}",
                                onclick: move |_| {
                                    grid.with_mut(|g| {
                                        g.append_column();
                                    });
                                    on_column_add.call(());
                                },
                                "+"
                            }
                        }
                    }
                }
                tbody {
                    for (display_index, row_id) in visible_rows.iter().enumerate() {
                        GridRow {
                            display_index,
                            row_id: row_id.clone(),
                            columns: columns.clone(),
                            query: query.clone(),
                            grid,
                            nav,
                            session,
                            on_cell_change,
                        }
                    }
                }
            }
        }
        div { class: "add-row-bar",
            button {
                class: "add-row-btn",
                id: "btn-add-row",
                onclick: move |_| {
                    grid.with_mut(|g| {
                        g.append_row();
                    });
                    on_row_add.call(());
                },
                "\u{2795} {add_row_label}"
            }
        }
    }
}

#[component]
fn HeaderCell(
    column: Column,
    grid: Signal<Grid>,
    header_edit: Signal<Option<HeaderEdit>>,
    #[props(default)] on_column_title_change: EventHandler<(String, String)>,
    #[props(default)] on_column_type_change: EventHandler<(String, ColumnType)>,
) -> Element {
    let editing_title = header_edit
        .read()
        .as_ref()
        .map(|edit| edit.col_id == column.id)
        .unwrap_or(false);
    let style = column
        .header_color
        .as_deref()
        .map(|color| format!("background-color: {color};"))
        .unwrap_or_default();

    rsx! {
        th {
            class: "header-cell",
            id: format!("col-header-{}", sanitize_id(&column.id)),
            style: "{style}",
            if editing_title {
                input {
                    class: "header-input",
                    value: "{header_edit.read().as_ref().map(|e| e.draft.clone()).unwrap_or_default()}",
                    autofocus: true,
                    oninput: move |evt| {
                        let draft = evt.value();
                        header_edit.with_mut(|edit| {
                            if let Some(edit) = edit {
                                edit.draft = draft;
                            }
                        });
                    },
                    onblur: move |_| {
                        commit_header_edit(grid, header_edit, on_column_title_change);
                    },
                    onkeydown: move |evt| {
                        evt.stop_propagation();
                        match evt.key() {
                            Key::Enter => {
                                commit_header_edit(grid, header_edit, on_column_title_change)
                            }
                            Key::Escape => header_edit.set(None),
                            _ => {}
                        }
                    },
                }
            } else {
                div {
                    class: "header-title",
                    ondoubleclick: {
                        let col_id = column.id.clone();
                        let title = column.title.clone();
                        move |_| {
                            header_edit.set(Some(HeaderEdit {
                                col_id: col_id.clone(),
                                draft: title.clone(),
                            }));
                        }
                    },
                    "{column.title}"
                }
            }
            select {
                class: "header-type",
                value: "{column.ty.as_str()}",
                onchange: {
                    let col_id = column.id.clone();
                    move |evt: Event<FormData>| {
                        let Some(ty) = ColumnType::from_code(&evt.value()) else {
                            return;
                        };
                        grid.with_mut(|g| g.retype_column(&col_id, ty));
                        on_column_type_change.call((col_id.clone(), ty));
                    }
                },
                for ty in ColumnType::all().iter().copied() {
                    option { value: "{ty.as_str()}", selected: ty == column.ty, "{ty.as_str()}" }
                }
            }
        }
    }
}

#[component]
fn GridRow(
    display_index: usize,
    row_id: String,
    columns: Vec<Column>,
    query: String,
    grid: Signal<Grid>,
    nav: Signal<Navigator>,
    session: Signal<Option<EditSession>>,
    #[props(default)] on_cell_change: EventHandler<(String, String, CellValue)>,
) -> Element {
    rsx! {
        tr { id: format!("row-{}", sanitize_id(&row_id)),
            td { class: "row-number", "{display_index + 1}" }
            for col in &columns {
                GridCell {
                    row_id: row_id.clone(),
                    column: col.clone(),
                    query: query.clone(),
                    grid,
                    nav,
                    session,
                    on_cell_change,
                }
            }
            td { class: "add-column-cell" }
        }
    }
}

#[component]
fn GridCell(
    row_id: String,
    column: Column,
    query: String,
    grid: Signal<Grid>,
    nav: Signal<Navigator>,
    session: Signal<Option<EditSession>>,
    #[props(default)] on_cell_change: EventHandler<(String, String, CellValue)>,
) -> Element {
    let is_active = nav.read().is_active(&row_id, &column.id);
    let is_editing = nav.read().is_editing(&row_id, &column.id);
    let snapshot = grid.read().clone();

    let mut classes = vec!["cell"];
    if is_active {
        classes.push("active-cell");
    }
    if is_editing {
        classes.push("editing-cell");
    }
    if snapshot.cell_matches_search(&row_id, &column.id, &query) {
        classes.push("search-match");
    }
    let class = classes.join(" ");
    let cell_id = format!("cell-{}-{}", sanitize_id(&row_id), sanitize_id(&column.id));

    if is_editing {
        if column.ty == ColumnType::Status {
            let current = session
                .read()
                .as_ref()
                .map(|s| s.draft.clone())
                .unwrap_or_default();
            return rsx! {
                td { class: "{class}", id: "{cell_id}",
                    select {
                        class: "cell-select",
                        autofocus: true,
                        value: "{current}",
                        onchange: {
                            let row_id = row_id.clone();
                            let col_id = column.id.clone();
                            move |evt: Event<FormData>| {
                                let token = evt.value();
                                session.with_mut(|s| {
                                    if let Some(s) = s {
                                        s.draft = token.clone();
                                    }
                                });
                                let stored =
                                    grid.with_mut(|g| g.commit_cell(&row_id, &col_id, &token));
                                if let Some(stored) = stored {
                                    on_cell_change
                                        .call((row_id.clone(), col_id.clone(), stored));
                                }
                            }
                        },
                        option { value: "", "" }
                        for status in Status::all().iter().copied() {
                            option {
                                value: "{status.as_str()}",
                                selected: current == status.as_str(),
                                "{status.label()}"
                            }
                        }
                    }
                }
            };
        }

        let draft = session
            .read()
            .as_ref()
            .map(|s| s.draft.clone())
            .unwrap_or_default();
        let input_type = match column.ty {
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            _ => "text",
        };
        return rsx! {
            td { class: "{class}", id: "{cell_id}",
                input {
                    class: "cell-input",
                    r#type: "{input_type}",
                    value: "{draft}",
                    autofocus: true,
                    oninput: {
                        let row_id = row_id.clone();
                        let col_id = column.id.clone();
                        move |evt| {
                            let raw = evt.value();
                            session.with_mut(|s| {
                                if let Some(s) = s {
                                    s.draft = raw.clone();
                                }
                            });
                            // Live write-through: observers see partial input;
                            // final coercion waits for commit.
                            grid.with_mut(|g| g.set_cell_draft(&row_id, &col_id, &raw));
                        }
                    },
                    onblur: {
                        let row_id = row_id.clone();
                        let col_id = column.id.clone();
                        move |_| {
                            let still_here = session
                                .read()
                                .as_ref()
                                .map(|s| s.cell.row == row_id && s.cell.col == col_id)
                                .unwrap_or(false);
                            if still_here {
                                let outcome = KeyOutcome {
                                    handled: true,
                                    committed: Some(CellRef::new(row_id.clone(), col_id.clone())),
                                    ..Default::default()
                                };
                                apply_outcome(grid, session, on_cell_change, outcome);
                            }
                        }
                    },
                }
            }
        };
    }

    let display = snapshot.display_value(&row_id, &column.id);
    let stored = snapshot.cell_value(&row_id, &column.id);

    rsx! {
        td {
            class: "{class}",
            id: "{cell_id}",
            onclick: {
                let row_id = row_id.clone();
                let col_id = column.id.clone();
                move |_| {
                    let outcome = nav.with_mut(|n| n.click(&row_id, &col_id));
                    if outcome.handled {
                        apply_outcome(grid, session, on_cell_change, outcome);
                    }
                }
            },
            if column.ty == ColumnType::Url && !stored.is_empty() {
                {
                    let href = value::ensure_url_protocol(&display);
                    let link = href.clone();
                    rsx! {
                        a {
                            class: "url-link",
                            href: "{href}",
                            onclick: move |evt| {
                                // Opening the link and selecting the cell are
                                // mutually exclusive for the same click.
                                evt.stop_propagation();
                                evt.prevent_default();
                                let _ = open::that(&link);
                            },
                            "{display}"
                        }
                    }
                }
            } else {
                span { class: "cell-text", "{display}" }
            }
        }
    }
}

fn to_nav_key(evt: &Event<KeyboardData>) -> Option<NavKey> {
    let modifiers = evt.modifiers();
    match evt.key() {
        Key::ArrowUp => Some(NavKey::Up),
        Key::ArrowDown => Some(NavKey::Down),
        Key::ArrowLeft => Some(NavKey::Left),
        Key::ArrowRight => Some(NavKey::Right),
        Key::Tab => Some(NavKey::Tab {
            shift: modifiers.contains(Modifiers::SHIFT),
        }),
        Key::Enter => Some(NavKey::Enter),
        Key::Escape => Some(NavKey::Escape),
        Key::Character(text) => {
            if modifiers.contains(Modifiers::CONTROL)
                || modifiers.contains(Modifiers::ALT)
                || modifiers.contains(Modifiers::META)
            {
                return None;
            }
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(NavKey::Char(ch)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Applies a state-machine outcome to the model: restore the cancelled
/// cell, finalize the committed cell (firing the change callback), and open
/// a fresh draft for the cell that entered editing.
fn apply_outcome(
    mut grid: Signal<Grid>,
    mut session: Signal<Option<EditSession>>,
    on_cell_change: EventHandler<(String, String, CellValue)>,
    outcome: KeyOutcome,
) {
    if let Some(cell) = outcome.cancelled {
        let origin = session
            .read()
            .as_ref()
            .filter(|s| s.cell == cell)
            .map(|s| s.origin.clone());
        if let Some(origin) = origin {
            grid.with_mut(|g| g.set_cell(&cell.row, &cell.col, origin));
        }
        session.set(None);
    }

    if let Some(cell) = outcome.committed {
        let draft = session
            .read()
            .as_ref()
            .filter(|s| s.cell == cell)
            .map(|s| s.draft.clone());
        let raw =
            draft.unwrap_or_else(|| grid.read().cell_value(&cell.row, &cell.col).raw_string());
        let stored = grid.with_mut(|g| g.commit_cell(&cell.row, &cell.col, &raw));
        session.set(None);
        if let Some(stored) = stored {
            on_cell_change.call((cell.row, cell.col, stored));
        }
    }

    if let Some(cell) = outcome.started {
        let ty = grid
            .read()
            .column(&cell.col)
            .map(|c| c.ty)
            .unwrap_or_default();
        let origin = grid.read().cell_value(&cell.row, &cell.col);
        let draft = match outcome.seed {
            // The opening keystroke replaces the previous content, like
            // typing over a selected value.
            Some(seed) => {
                let draft = seed.to_string();
                grid.with_mut(|g| g.set_cell_draft(&cell.row, &cell.col, &draft));
                draft
            }
            None => match ty {
                ColumnType::Url => value::strip_url_protocol(&origin.raw_string()).to_string(),
                _ => origin.raw_string(),
            },
        };
        session.set(Some(EditSession { cell, draft, origin }));
    }
}

fn commit_header_edit(
    mut grid: Signal<Grid>,
    mut header_edit: Signal<Option<HeaderEdit>>,
    on_column_title_change: EventHandler<(String, String)>,
) {
    let edit = header_edit.read().as_ref().cloned();
    if let Some(edit) = edit {
        let title = edit.draft.trim().to_string();
        if !title.is_empty() {
            grid.with_mut(|g| g.rename_column(&edit.col_id, &title));
            on_column_title_change.call((edit.col_id, title));
        }
    }
    header_edit.set(None);
}

fn sanitize_id(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
