use std::sync::Arc;

use prodtask_core::{duplicate_ids, find_document};
use prodtask_store::{FixtureSource, LocalStore, SeedOutcome, StoreError, bootstrap};
use prodtask_sync::TaskApi;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::event::Event;
use crate::state::{AppState, Notice, View};

/// Callback for user-facing notices, called as each notice is raised.
pub type NoticeHandler = Arc<dyn Fn(&Notice) + Send + Sync>;

/// The application controller.
///
/// Holds the state, the local store and the remote API. Events are applied
/// one at a time; each is awaited to completion before the next.
pub struct App {
    state: AppState,
    store: LocalStore,
    api: Arc<dyn TaskApi>,
    fixture: Arc<dyn FixtureSource>,
    listeners: Vec<NoticeHandler>,
}

impl App {
    pub fn new(store: LocalStore, api: Arc<dyn TaskApi>, fixture: Arc<dyn FixtureSource>) -> Self {
        Self {
            state: AppState::default(),
            store,
            api,
            fixture,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Observe notices as they are raised.
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(handler));
    }

    /// Apply one event.
    ///
    /// Failures never escape: they are logged and turned into an error
    /// notice, and nothing is retried. Returns whether the event succeeded.
    pub async fn dispatch(&mut self, event: Event) -> bool {
        let name = event.name();
        let failure = event.failure_text();
        debug!(event = name, "dispatch");

        match self.apply(event).await {
            Ok(()) => true,
            Err(err) => {
                error!(event = name, "{err}");
                self.notify(Notice::error(format!("{failure}: {err}")));
                false
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        for listener in &self.listeners {
            listener(&notice);
        }
        self.state.notices.push(notice);
    }

    async fn apply(&mut self, event: Event) -> Result<(), AppError> {
        match event {
            Event::Initialize => self.initialize().await,
            Event::ShowView(view) => self.show_view(view),
            Event::OpenDocument(id) => self.open_document(&id),
            Event::SetActual { section, row, qty } => {
                let doc = self
                    .state
                    .editing_document_mut()
                    .ok_or(AppError::NoOpenDocument)?;
                doc.set_actual(section, row, qty)?;
                Ok(())
            }
            Event::SaveDocuments => {
                self.store.save_documents(&self.state.documents)?;
                info!("saved {} documents", self.state.documents.len());
                self.notify(Notice::info("Documents saved"));
                Ok(())
            }
            Event::PullTasks => self.pull_tasks().await,
            Event::PushCompletion(id) => self.push_completion(&id).await,
            Event::UpdateSettings(patch) => {
                self.state.settings.apply(patch);
                Ok(())
            }
            Event::SaveSettings => {
                self.store.save_settings(&self.state.settings)?;
                self.notify(Notice::info("Settings saved"));
                Ok(())
            }
            Event::LoadDictionary(name) => {
                let dict = self.store.load_dictionary(&name)?;
                debug!("dictionary {} has {} entries", dict.name, dict.len());
                self.state.dictionaries.insert(dict.name.clone(), dict);
                Ok(())
            }
            Event::RefreshStats => {
                self.state.db_stats = self.store.db_stats()?;
                Ok(())
            }
            Event::FilterTasks(filter) => {
                self.state.task_filter = filter;
                Ok(())
            }
        }
    }

    async fn initialize(&mut self) -> Result<(), AppError> {
        // A missing fixture is reported but does not stop startup; the app
        // carries on with whatever the store holds.
        match bootstrap(&self.store, self.fixture.as_ref()).await {
            Ok(SeedOutcome::Seeded { keys }) => {
                self.notify(Notice::info(format!("Loaded initial data ({})", keys.join(", "))));
            }
            Ok(SeedOutcome::AlreadySeeded) => {}
            Err(err) => {
                error!("seeding failed: {err}");
                self.notify(Notice::error(format!("Failed to load data from fixture: {err}")));
            }
        }

        self.state.view = View::Tasks;
        self.state.editing = None;
        let settings = self.store.load_settings();
        self.state.settings = self.loaded_or_default("settings", settings);
        let nomenclature = self.store.load_nomenclature();
        self.state.nomenclature = self.loaded_or_default("nomenclature", nomenclature);
        let documents = self.store.load_documents();
        self.state.documents = self.loaded_or_default("documents", documents);

        let dups = duplicate_ids(&self.state.documents);
        if !dups.is_empty() {
            warn!("duplicate document ids in local store: {}", dups.join(", "));
        }
        info!(
            "initialized with {} documents, {} nomenclature entries",
            self.state.documents.len(),
            self.state.nomenclature.len()
        );
        Ok(())
    }

    /// A key that cannot be read is reported and treated as empty, so one
    /// bad value does not keep the rest of the store out of reach.
    fn loaded_or_default<T: Default>(&mut self, what: &str, loaded: Result<T, StoreError>) -> T {
        match loaded {
            Ok(value) => value,
            Err(err) => {
                error!("loading {what} failed: {err}");
                self.notify(Notice::error(format!("Failed to load {what}: {err}")));
                T::default()
            }
        }
    }

    fn show_view(&mut self, view: View) -> Result<(), AppError> {
        match view {
            View::Tasks => {
                self.state.editing = None;
            }
            View::EditTask => {
                if self.state.editing_document().is_none() {
                    return Err(AppError::NoOpenDocument);
                }
            }
            View::Settings => {
                self.state.db_stats = self.store.db_stats()?;
            }
        }
        self.state.view = view;
        Ok(())
    }

    fn open_document(&mut self, id: &str) -> Result<(), AppError> {
        let index = find_document(&self.state.documents, id)
            .ok_or_else(|| AppError::DocumentNotFound(id.to_string()))?;
        self.state.editing = Some(index);
        self.state.view = View::EditTask;
        Ok(())
    }

    async fn pull_tasks(&mut self) -> Result<(), AppError> {
        let tasks = self.api.pull_tasks(&self.state.settings).await?;
        // Persist before touching memory so both stay in step on failure.
        self.store.save_documents(&tasks)?;
        self.state.documents = tasks;
        self.state.editing = None;
        self.notify(Notice::info(format!(
            "Loaded {} tasks from server",
            self.state.documents.len()
        )));
        Ok(())
    }

    async fn push_completion(&mut self, id: &str) -> Result<(), AppError> {
        let index = find_document(&self.state.documents, id)
            .ok_or_else(|| AppError::DocumentNotFound(id.to_string()))?;
        let status = self
            .api
            .push_completion(&self.state.settings, &self.state.documents[index])
            .await?;
        self.notify(Notice::info(format!("Document sent. Server response: {status}")));
        Ok(())
    }
}
