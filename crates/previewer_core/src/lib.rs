//! Previewer core: history reconciliation and the pure controller state machine.
mod effect;
mod entry;
mod failure;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use entry::{Cursor, EntryId, HistoryEntry, HistoryPage, PreviewStatus};
pub use failure::{FailureKind, FailureNotice, ServiceFailure};
pub use msg::Msg;
pub use state::{AppState, BusyFlags, DEFAULT_PAGE_LIMIT};
pub use store::HistoryStore;
pub use update::update;
pub use view_model::{AppViewModel, EntryRowView, LoadMoreView};
