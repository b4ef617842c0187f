//! Library surface for hwdash: the widget synchronization engine and the
//! pieces the TUI binary wires together.

pub mod app;
pub mod binding;
pub mod error;
pub mod history;
pub mod proto;
pub mod session;
pub mod settings;
pub mod topology;
pub mod types;
pub mod ui;
pub mod widget;
pub mod ws;

pub use error::{SyncError, SyncResult};
pub use session::{Session, SessionState};
