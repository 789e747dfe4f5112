use prodtask_core::{Section, SettingsPatch};

use crate::grid::TaskFilter;
use crate::state::View;

/// A user action. [`App::dispatch`](crate::App::dispatch) is the only
/// consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Seed an empty store, then load settings, nomenclature and documents.
    Initialize,
    ShowView(View),
    /// Row click in the task grid.
    OpenDocument(String),
    /// Cell edit in a line-item grid of the open document.
    SetActual {
        section: Section,
        row: usize,
        qty: f64,
    },
    /// Persist the whole document array.
    SaveDocuments,
    /// Replace all documents with the server's task list.
    PullTasks,
    /// Submit one document to the completion endpoint.
    PushCompletion(String),
    UpdateSettings(SettingsPatch),
    SaveSettings,
    LoadDictionary(String),
    RefreshStats,
    FilterTasks(TaskFilter),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Initialize => "initialize",
            Event::ShowView(_) => "show_view",
            Event::OpenDocument(_) => "open_document",
            Event::SetActual { .. } => "set_actual",
            Event::SaveDocuments => "save_documents",
            Event::PullTasks => "pull_tasks",
            Event::PushCompletion(_) => "push_completion",
            Event::UpdateSettings(_) => "update_settings",
            Event::SaveSettings => "save_settings",
            Event::LoadDictionary(_) => "load_dictionary",
            Event::RefreshStats => "refresh_stats",
            Event::FilterTasks(_) => "filter_tasks",
        }
    }

    /// Lead-in for the message shown when this event fails.
    pub(crate) fn failure_text(&self) -> &'static str {
        match self {
            Event::Initialize => "Failed to load local data",
            Event::OpenDocument(_) => "Failed to open document",
            Event::PullTasks => "Failed to load data from server",
            Event::PushCompletion(_) => "Failed to send document",
            Event::SaveDocuments => "Failed to save documents",
            Event::SaveSettings => "Failed to save settings",
            Event::LoadDictionary(_) => "Failed to load dictionary",
            Event::RefreshStats => "Failed to read store statistics",
            _ => "Action failed",
        }
    }
}
