use crate::view_model::{AppViewModel, EntryRowView, LoadMoreView};
use crate::{FailureNotice, HistoryStore};

/// Default page size requested from the History Service.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Per-action busy flags. Each one guards re-entrant triggers of its own
/// action only; a submission and a page load may be in flight together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusyFlags {
    pub submitting: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Lifecycle {
    #[default]
    Attached,
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    store: HistoryStore,
    busy: BusyFlags,
    lifecycle: Lifecycle,
    page_limit: u32,
    last_failure: Option<FailureNotice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            store: HistoryStore::new(),
            busy: BusyFlags::default(),
            lifecycle: Lifecycle::Attached,
            page_limit: DEFAULT_PAGE_LIMIT,
            last_failure: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero limit falls back to [`DEFAULT_PAGE_LIMIT`].
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit };
        self
    }

    pub fn view(&self) -> AppViewModel {
        let can_load = self.store.has_more() || self.store.pages_merged() == 0;
        let load_more = if !can_load {
            LoadMoreView::Hidden
        } else if self.busy.loading {
            LoadMoreView::Busy
        } else {
            LoadMoreView::Enabled
        };

        AppViewModel {
            input: self.input.clone(),
            rows: self.store.entries().map(EntryRowView::from).collect(),
            submitting: self.busy.submitting,
            loading: self.busy.loading,
            submit_label: if self.busy.submitting {
                "Submitting..."
            } else {
                "Submit"
            },
            load_more,
            last_failure: self.last_failure.clone(),
            dirty: self.dirty,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn busy(&self) -> BusyFlags {
        self.busy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn last_failure(&self) -> Option<&FailureNotice> {
        self.last_failure.as_ref()
    }

    pub fn is_detached(&self) -> bool {
        self.lifecycle == Lifecycle::Detached
    }

    /// Returns whether anything visible changed since the last call, and
    /// resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn store_mut(&mut self) -> &mut HistoryStore {
        &mut self.store
    }

    pub(crate) fn busy_mut(&mut self) -> &mut BusyFlags {
        &mut self.busy
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_input(&mut self) {
        self.set_input(String::new());
    }

    pub(crate) fn set_last_failure(&mut self, notice: Option<FailureNotice>) {
        self.last_failure = notice;
    }

    pub(crate) fn detach(&mut self) {
        self.lifecycle = Lifecycle::Detached;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
