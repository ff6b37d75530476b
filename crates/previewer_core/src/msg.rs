use crate::{HistoryEntry, HistoryPage, ServiceFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// The view came up; request the first history page.
    Mounted,
    /// User submitted the current URL input.
    SubmitClicked,
    /// User asked for the next history page.
    LoadMoreClicked,
    /// Submission Service answered.
    SubmissionSettled(Result<HistoryEntry, ServiceFailure>),
    /// History Service answered.
    HistoryPageSettled(Result<HistoryPage, ServiceFailure>),
    /// The view is going away; later results must be dropped.
    Unmounted,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
