//! Exchange with the ERP server: `prodtask pull`, `prodtask push D002`.

use anyhow::Result;
use prodtask_app::{Event, render};

use super::{Session, print_json, run};

/// Replace every local document with the server's task list.
pub async fn pull(session: &Session<'_>) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::PullTasks).await?;

    if session.json {
        return print_json(&app.state().documents);
    }
    print!("{}", render::tasks_view(app.state()));
    Ok(())
}

/// Send one document to the completion endpoint. The local copy is kept
/// whatever the outcome.
pub async fn push(session: &Session<'_>, id: &str) -> Result<()> {
    let mut app = session.open().await?;
    run(&mut app, Event::PushCompletion(id.to_string())).await?;

    if session.json {
        let last = app.state().notices.last().map(|n| n.text.as_str());
        return print_json(&serde_json::json!({ "id": id, "result": last }));
    }
    Ok(())
}
