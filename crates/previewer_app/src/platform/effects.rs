use std::io::Write;

use previewer_core::{
    Cursor, Effect, EntryId, FailureNotice, HistoryEntry, HistoryPage, Msg, PreviewStatus,
    ServiceFailure,
};
use previewer_engine::{
    ApiError, EngineEvent, EngineHandle, EntryRecord, HistoryPageRecord, WireId,
};
use previewer_logging::{log_info, log_warn};

/// Executes core effects against the engine and turns engine completions
/// back into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Notifications are written to `notify_out` before this returns, so they
    /// are always seen before the next render.
    pub fn run(&mut self, effects: Vec<Effect>, notify_out: &mut dyn Write) {
        for effect in effects {
            match effect {
                Effect::SubmitUrl { url } => {
                    let request_id = self.engine.submit(url.clone());
                    log_info!("SubmitUrl request_id={} url={}", request_id, url);
                }
                Effect::FetchHistory { cursor, limit } => {
                    let cursor = cursor.map(Cursor::into_inner);
                    let request_id = self.engine.fetch_history(cursor.clone(), limit);
                    log_info!(
                        "FetchHistory request_id={} cursor={:?} limit={}",
                        request_id,
                        cursor,
                        limit
                    );
                }
                Effect::Notify(notice) => notify(&notice, notify_out),
            }
        }
    }

    /// Next completed engine result, if any.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

pub(crate) fn notify(notice: &FailureNotice, out: &mut dyn Write) {
    if let Err(err) = writeln!(out, "! {} ({})", notice.user_message(), notice.detail)
        .and_then(|()| out.flush())
    {
        log_warn!("could not show notification: {}", err);
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmitCompleted { request_id, result } => {
            log_info!("submit #{} settled ok={}", request_id, result.is_ok());
            Msg::SubmissionSettled(result.map(map_entry).map_err(map_failure))
        }
        EngineEvent::HistoryCompleted { request_id, result } => {
            log_info!("history #{} settled ok={}", request_id, result.is_ok());
            Msg::HistoryPageSettled(result.map(map_page).map_err(map_failure))
        }
    }
}

fn map_entry(record: EntryRecord) -> HistoryEntry {
    HistoryEntry {
        id: map_id(record.id),
        url: record.url,
        image_url: record.image_url.filter(|image| !image.is_empty()),
        status: record.status.as_deref().and_then(map_status),
    }
}

fn map_page(record: HistoryPageRecord) -> HistoryPage {
    HistoryPage {
        results: record.results.into_iter().map(map_entry).collect(),
        next_cursor: record
            .next_cursor
            .map(|cursor| Cursor::new(cursor.into_token())),
    }
}

fn map_id(id: WireId) -> EntryId {
    match id {
        WireId::Number(value) => EntryId::Number(value),
        WireId::Text(value) => EntryId::Text(value),
    }
}

fn map_status(status: &str) -> Option<PreviewStatus> {
    match status.to_ascii_lowercase().as_str() {
        "pending" => Some(PreviewStatus::Pending),
        "success" => Some(PreviewStatus::Success),
        "failed" => Some(PreviewStatus::Failed),
        _ => None,
    }
}

fn map_failure(err: ApiError) -> ServiceFailure {
    ServiceFailure::new(err.to_string())
}
