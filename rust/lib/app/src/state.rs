use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use prodtask_core::{CoreError, Dictionary, Document, NomenclatureEntry, Settings};

use crate::grid::TaskFilter;

/// The screen being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Tasks,
    EditTask,
    Settings,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Tasks => "tasks",
            View::EditTask => "editTask",
            View::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tasks" => Ok(View::Tasks),
            "editTask" | "edit" => Ok(View::EditTask),
            "settings" => Ok(View::Settings),
            other => Err(CoreError::UnknownView(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A message for the user: the outcome of an action or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Everything the front-end renders. Owned by [`App`](crate::App).
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub documents: Vec<Document>,
    pub nomenclature: Vec<NomenclatureEntry>,
    pub settings: Settings,
    /// Item count per store key, refreshed on entering the settings view.
    pub db_stats: BTreeMap<String, usize>,
    /// Dictionaries loaded on demand, by name.
    pub dictionaries: BTreeMap<String, Dictionary>,
    /// Index into `documents` of the document being edited. Edits go to
    /// that element directly.
    pub editing: Option<usize>,
    pub task_filter: TaskFilter,
    pub notices: Vec<Notice>,
}

impl AppState {
    pub fn editing_document(&self) -> Option<&Document> {
        self.editing.and_then(|i| self.documents.get(i))
    }

    pub(crate) fn editing_document_mut(&mut self) -> Option<&mut Document> {
        self.editing.and_then(|i| self.documents.get_mut(i))
    }

    /// Documents passing the task grid filter, in stored order.
    pub fn visible_documents(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| self.task_filter.matches(*d))
            .collect()
    }
}
