//! Previewer engine: HTTP transport for the submission and history services.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, PreviewApi, ReqwestPreviewApi, DEFAULT_API_BASE};
pub use engine::EngineHandle;
pub use types::{
    ApiError, EngineEvent, EntryRecord, FailureKind, HistoryPageRecord, RequestId, WireId,
};
