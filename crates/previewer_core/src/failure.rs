use std::fmt;

/// Which user action a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Submission,
    Fetch,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Submission => "Failed to submit URL.",
            FailureKind::Fetch => "Failed to load history.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Submission => write!(f, "submission failure"),
            FailureKind::Fetch => write!(f, "fetch failure"),
        }
    }
}

/// Failure reported back by the platform layer when a service call fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    pub message: String,
}

impl ServiceFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A failure the user must be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub kind: FailureKind,
    /// Underlying cause, for logs and detail lines.
    pub detail: String,
}

impl FailureNotice {
    pub fn new(kind: FailureKind, failure: ServiceFailure) -> Self {
        Self {
            kind,
            detail: failure.message,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}
