use previewer_logging::{log_debug, log_info, log_warn};

use crate::{AppState, Effect, FailureKind, FailureNotice, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_detached() {
        log_debug!("dropping {msg:?} after unmount");
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Mounted => {
            // The first page is requested once; only a failed first load
            // leaves the door open for another attempt.
            if state.busy().loading || state.store().pages_merged() > 0 {
                log_debug!("initial history load already done or in flight");
                return (state, Vec::new());
            }
            begin_load(&mut state, None)
        }
        Msg::LoadMoreClicked => {
            if state.busy().loading {
                log_debug!("load more ignored: a page request is in flight");
                return (state, Vec::new());
            }
            // Until a page has been merged there is no cursor yet, and the
            // action requests the first page instead.
            let cursor = state.store().cursor().cloned();
            if cursor.is_none() && state.store().pages_merged() > 0 {
                log_debug!("load more ignored: history exhausted");
                return (state, Vec::new());
            }
            begin_load(&mut state, cursor)
        }
        Msg::SubmitClicked => {
            let url = state.input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            if state.busy().submitting {
                log_debug!("submit ignored: a submission is in flight");
                return (state, Vec::new());
            }
            state.busy_mut().submitting = true;
            state.mark_dirty();
            vec![Effect::SubmitUrl { url }]
        }
        Msg::SubmissionSettled(result) => {
            if !state.busy().submitting {
                log_warn!("stray submission result ignored");
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            match result {
                Ok(entry) => {
                    log_info!("submission settled id={} url={}", entry.id, entry.url);
                    state.store_mut().promote_submission(entry);
                    state.set_last_failure(None);
                }
                Err(failure) => {
                    log_warn!("submission failed: {failure}");
                    let notice = FailureNotice::new(FailureKind::Submission, failure);
                    state.set_last_failure(Some(notice.clone()));
                    effects.push(Effect::Notify(notice));
                }
            }
            state.clear_input();
            state.busy_mut().submitting = false;
            state.mark_dirty();
            effects
        }
        Msg::HistoryPageSettled(result) => {
            if !state.busy().loading {
                log_warn!("stray history page ignored");
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            match result {
                Ok(page) => {
                    let received = page.results.len();
                    let appended = state.store_mut().merge_page(page);
                    log_info!(
                        "history page merged received={received} appended={appended} has_more={}",
                        state.store().has_more()
                    );
                    state.set_last_failure(None);
                }
                Err(failure) => {
                    log_warn!("history fetch failed: {failure}");
                    let notice = FailureNotice::new(FailureKind::Fetch, failure);
                    state.set_last_failure(Some(notice.clone()));
                    effects.push(Effect::Notify(notice));
                }
            }
            state.busy_mut().loading = false;
            state.mark_dirty();
            effects
        }
        Msg::Unmounted => {
            state.detach();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn begin_load(state: &mut AppState, cursor: Option<crate::Cursor>) -> Vec<Effect> {
    state.busy_mut().loading = true;
    state.mark_dirty();
    vec![Effect::FetchHistory {
        cursor,
        limit: state.page_limit(),
    }]
}
