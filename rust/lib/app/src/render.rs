//! Text templates, one per view.

use std::fmt::Write;

use prodtask_core::{Catalog, Document, Section};

use crate::grid::{LineRow, render_table};
use crate::state::{AppState, Level, Notice, View};

/// Render whatever the current view shows.
pub fn render(state: &AppState) -> String {
    match state.view {
        View::Tasks => tasks_view(state),
        View::EditTask => match state.editing_document() {
            Some(doc) => edit_view(doc, Catalog::new(&state.nomenclature)),
            None => tasks_view(state),
        },
        View::Settings => settings_view(state),
    }
}

pub fn tasks_view(state: &AppState) -> String {
    let rows: Vec<Document> = state.visible_documents().into_iter().cloned().collect();
    let mut out = String::from("Tasks\n\n");
    if rows.is_empty() {
        out.push_str("(no tasks)\n");
    } else {
        out.push_str(&render_table(&rows));
    }
    if !state.task_filter.is_empty() {
        let _ = writeln!(out, "\n{} of {} shown", rows.len(), state.documents.len());
    }
    out
}

pub fn edit_view(doc: &Document, catalog: Catalog<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Task {}  {}", doc.id_erp, doc.number);
    let _ = writeln!(out, "Date: {}   Status: {}", doc.date, doc.status_label());

    for (section, title) in [
        (Section::Consumption, "Consumption"),
        (Section::Production, "Production"),
    ] {
        let _ = writeln!(out, "\n{title}");
        let rows = LineRow::build(doc.lines(section), catalog);
        if rows.is_empty() {
            out.push_str("(none)\n");
        } else {
            out.push_str(&render_table(&rows));
        }
    }
    out
}

pub fn settings_view(state: &AppState) -> String {
    let s = &state.settings;
    let mut out = String::from("Settings\n\n");
    let _ = writeln!(out, "Production tasks URL:  {}", s.api_production_tasks);
    let _ = writeln!(out, "Task completion URL:   {}", s.api_task_completion);
    let _ = writeln!(out, "Username:              {}", s.username);
    let _ = writeln!(out, "Token:                 {}", s.masked_token());

    out.push_str("\nLocal store\n\n");
    if state.db_stats.is_empty() {
        out.push_str("(empty)\n");
    }
    let width = state.db_stats.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, count) in &state.db_stats {
        let _ = writeln!(out, "{key:<width$}  {count}");
    }
    out
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        Level::Info => notice.text.clone(),
        Level::Error => format!("error: {}", notice.text),
    }
}
