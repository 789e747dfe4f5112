//! View-state controller for the production-task client.
//!
//! [`App`] owns all application state. Front-ends turn user actions into
//! [`Event`]s, hand them to [`App::dispatch`] one at a time, and render the
//! resulting [`AppState`]. Side effects (store writes, HTTP calls) happen only
//! inside dispatch.
//!
//! ```ignore
//! let mut app = App::new(store, Arc::new(HttpTaskApi::new()), Arc::new(EmbeddedFixture));
//! app.subscribe(|notice| eprintln!("{}", notice.text));
//!
//! app.dispatch(Event::Initialize).await;
//! app.dispatch(Event::OpenDocument("D002".into())).await;
//! app.dispatch(Event::SetActual { section: Section::Production, row: 0, qty: 24.0 }).await;
//! app.dispatch(Event::SaveDocuments).await;
//! ```

pub mod controller;
pub mod error;
pub mod event;
pub mod grid;
pub mod render;
pub mod state;

pub use controller::{App, NoticeHandler};
pub use error::AppError;
pub use event::Event;
pub use grid::{Column, GridRow, LineRow, TaskFilter};
pub use state::{AppState, Level, Notice, View};
