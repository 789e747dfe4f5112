//! Settings, store statistics and dictionaries.

use anyhow::Result;
use prodtask_app::{Event, View, render};
use prodtask_core::{SettingsPatch, keys};
use serde_json::json;

use super::{Session, print_json, run};

pub async fn show(session: &Session<'_>) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::ShowView(View::Settings)).await?;

    let state = app.state();
    if session.json {
        let s = &state.settings;
        return print_json(&json!({
            "apiProductionTasks": s.api_production_tasks,
            "apiTaskCompletion": s.api_task_completion,
            "username": s.username,
            "token": s.masked_token(),
            "dbStats": state.db_stats,
        }));
    }
    print!("{}", render::settings_view(state));
    Ok(())
}

pub async fn set(session: &Session<'_>, patch: SettingsPatch) -> Result<()> {
    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to set. Pass --tasks-url, --completion-url, --username or --token."
        );
    }

    let mut app = session.open().await?;
    run(&mut app, Event::UpdateSettings(patch)).await?;
    run(&mut app, Event::SaveSettings).await?;
    Ok(())
}

pub async fn stats(session: &Session<'_>) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::RefreshStats).await?;

    let stats = &app.state().db_stats;
    if session.json {
        return print_json(stats);
    }
    if stats.is_empty() {
        println!("(empty)");
    }
    let width = stats.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, count) in stats {
        println!("{key:<width$}  {count}");
    }
    Ok(())
}

pub async fn dict(session: &Session<'_>, name: &str) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::LoadDictionary(name.to_string())).await?;

    let Some(dict) = app.state().dictionaries.get(keys::canonical(name)) else {
        anyhow::bail!("Dictionary {name} was not loaded.");
    };
    if session.json {
        return print_json(&dict.entries);
    }
    println!("{} ({} entries)", dict.name, dict.len());
    for entry in &dict.entries {
        println!("  {entry}");
    }
    Ok(())
}
