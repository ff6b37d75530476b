use crate::{EntryId, FailureNotice, HistoryEntry, PreviewStatus};

/// State of the "load more" affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMoreView {
    /// No further page exists (or none has been fetched yet).
    #[default]
    Hidden,
    Enabled,
    /// A page request is in flight; the control is shown but disabled.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub rows: Vec<EntryRowView>,
    pub submitting: bool,
    pub loading: bool,
    pub submit_label: &'static str,
    pub load_more: LoadMoreView,
    pub last_failure: Option<FailureNotice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub id: EntryId,
    pub url: String,
    pub image_url: Option<String>,
    pub status: Option<PreviewStatus>,
}

impl From<&HistoryEntry> for EntryRowView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            url: entry.url.clone(),
            image_url: entry.image_url.clone(),
            status: entry.status,
        }
    }
}
