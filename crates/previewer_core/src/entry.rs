use std::fmt;

/// Identity of a history entry. Two entries with equal ids are the same
/// logical entry, whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(value) => write!(f, "{value}"),
            EntryId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        EntryId::Number(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId::Text(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub url: String,
    pub image_url: Option<String>,
    pub status: Option<PreviewStatus>,
}

impl HistoryEntry {
    pub fn new(id: impl Into<EntryId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            image_url: None,
            status: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_status(mut self, status: PreviewStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Opaque pagination token pointing at the next page to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of history as returned by the History Service, newest first.
/// `next_cursor` is `None` iff there are no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryPage {
    pub results: Vec<HistoryEntry>,
    pub next_cursor: Option<Cursor>,
}

impl HistoryPage {
    pub fn new(results: Vec<HistoryEntry>, next_cursor: Option<Cursor>) -> Self {
        Self {
            results,
            next_cursor,
        }
    }

    pub fn last(results: Vec<HistoryEntry>) -> Self {
        Self::new(results, None)
    }
}
