use crate::{Effect, MintFailure, Msg, Phase, SessionState, ToastKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(url) => {
            state.set_webhook_url(url);
            Vec::new()
        }
        Msg::MintClicked => {
            // Exactly one request in flight at a time: further clicks while
            // pending are ignored rather than queued.
            if state.phase() == Phase::Pending {
                return (state, Vec::new());
            }
            if state.webhook_url().is_empty() {
                state.record_failure(&MintFailure::MissingConfiguration);
                return (state, Vec::new());
            }
            let url = state.webhook_url().to_owned();
            state.begin_mint();
            vec![Effect::InvokeWebhook { url }]
        }
        Msg::MintSucceeded { record } => {
            state.record_success(record);
            Vec::new()
        }
        Msg::MintFailed { reason } => {
            state.record_failure(&reason);
            Vec::new()
        }
        Msg::DownloadClicked => match state.current() {
            Some(record) => vec![Effect::SaveImage {
                record: record.clone(),
            }],
            None => Vec::new(),
        },
        Msg::ImageSaved { filename } => {
            state.set_toast(format!("Saved {filename}"), ToastKind::Success);
            Vec::new()
        }
        Msg::ImageSaveFailed { message } => {
            state.set_toast(format!("Save failed: {message}"), ToastKind::Failure);
            Vec::new()
        }
        Msg::Tick => {
            state.tick();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
