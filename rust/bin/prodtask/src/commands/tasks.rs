//! Task list and document editing.
//!
//! `prodtask tasks`, `prodtask show D002`,
//! `prodtask edit D002 --production 0=24`.

use anyhow::Result;
use prodtask_app::{Event, TaskFilter, render};
use prodtask_core::{Catalog, Section, parse_quantity};

use super::{Session, print_json, run};

/// A `ROW=QTY` edit from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub qty: f64,
}

/// clap value parser for `ROW=QTY`. Accepts a decimal comma in QTY.
pub fn parse_cell_edit(arg: &str) -> Result<CellEdit, String> {
    let (row, qty) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=QTY, got {arg:?}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("row must be a non-negative integer, got {row:?}"))?;
    let qty = parse_quantity(qty)?;
    Ok(CellEdit { row, qty })
}

pub async fn list(session: &Session<'_>, filters: &[String]) -> Result<()> {
    let mut app = session.open().await?;
    let filter = TaskFilter::parse(filters)?;
    run(&mut app, Event::FilterTasks(filter)).await?;

    if session.json {
        return print_json(&app.state().visible_documents());
    }
    print!("{}", render::tasks_view(app.state()));
    Ok(())
}

pub async fn show(session: &Session<'_>, id: &str) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::OpenDocument(id.to_string())).await?;
    print_open(session, &app)
}

pub async fn edit(
    session: &Session<'_>,
    id: &str,
    consumption: &[CellEdit],
    production: &[CellEdit],
) -> Result<()> {
    if consumption.is_empty() && production.is_empty() {
        anyhow::bail!("Nothing to edit. Pass --consumption ROW=QTY or --production ROW=QTY.");
    }

    let mut app = session.open().await?;
    run(&mut app, Event::OpenDocument(id.to_string())).await?;

    let edits = consumption
        .iter()
        .map(|e| (Section::Consumption, e))
        .chain(production.iter().map(|e| (Section::Production, e)));
    for (section, edit) in edits {
        run(
            &mut app,
            Event::SetActual {
                section,
                row: edit.row,
                qty: edit.qty,
            },
        )
        .await?;
    }

    run(&mut app, Event::SaveDocuments).await?;
    print_open(session, &app)
}

fn print_open(session: &Session<'_>, app: &prodtask_app::App) -> Result<()> {
    let state = app.state();
    let Some(doc) = state.editing_document() else {
        anyhow::bail!("No document is open.");
    };
    if session.json {
        return print_json(doc);
    }
    print!("{}", render::edit_view(doc, Catalog::new(&state.nomenclature)));
    Ok(())
}
