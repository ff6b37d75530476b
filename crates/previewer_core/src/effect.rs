use crate::{Cursor, FailureNotice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitUrl { url: String },
    FetchHistory { cursor: Option<Cursor>, limit: u32 },
    /// Must be shown to the user before the next view is rendered.
    Notify(FailureNotice),
}
