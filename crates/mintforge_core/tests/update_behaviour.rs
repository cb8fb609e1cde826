use std::sync::Once;

use mintforge_core::{
    update, Effect, MintFailure, MintRecord, Msg, Phase, SessionState, ToastKind, TOAST_TICKS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(forge_logging::initialize_for_tests);
}

fn record(edition: &str, rarity: &str) -> MintRecord {
    MintRecord {
        id: format!("{edition}-1700000000000"),
        image: "data:image/png;base64,AAAA".to_string(),
        rarity: rarity.to_string(),
        edition: edition.to_string(),
    }
}

#[test]
fn mint_with_empty_url_fails_without_network_call() {
    init_logging();
    let state = SessionState::new();

    let (next, effects) = update(state, Msg::MintClicked);
    let view = next.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(
        view.error.as_deref(),
        Some("enter a webhook URL before minting")
    );
    assert!(view.dirty);
}

#[test]
fn mint_with_url_goes_pending_and_invokes_webhook() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");

    let (next, effects) = update(state, Msg::MintClicked);

    assert_eq!(next.view().phase, Phase::Pending);
    assert_eq!(next.view().error, None);
    assert_eq!(
        effects,
        vec![Effect::InvokeWebhook {
            url: "https://hooks.example.com/mint".to_string(),
        }]
    );
}

#[test]
fn mint_click_while_pending_is_ignored() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");
    let (state, _effects) = update(state, Msg::MintClicked);

    let (next, effects) = update(state, Msg::MintClicked);

    assert_eq!(next.view().phase, Phase::Pending);
    assert!(effects.is_empty());
}

#[test]
fn success_returns_to_idle_and_raises_toast() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");
    let (state, _effects) = update(state, Msg::MintClicked);

    let (next, effects) = update(
        state,
        Msg::MintSucceeded {
            record: record("deadbeefcafe", "Legendary"),
        },
    );
    let view = next.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.total_minted, 1);
    let toast = view.toast.expect("success toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.text, "Legendary minted! Edition #deadbeef");
}

#[test]
fn failure_leaves_prior_state_untouched() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");
    let (state, _effects) = update(state, Msg::MintClicked);
    let (state, _effects) = update(
        state,
        Msg::MintSucceeded {
            record: record("aaaa", "Rare"),
        },
    );
    let history_before = state.history().to_vec();
    let counts_before = state.counts().clone();

    let (state, _effects) = update(state, Msg::MintClicked);
    let (next, effects) = update(
        state,
        Msg::MintFailed {
            reason: MintFailure::RequestFailed(500),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.view().phase, Phase::Idle);
    assert_eq!(next.history(), history_before.as_slice());
    assert_eq!(next.counts(), &counts_before);
    assert_eq!(
        next.view().error.as_deref(),
        Some("webhook returned HTTP status 500")
    );
    assert_eq!(next.current().map(|r| r.edition.as_str()), Some("aaaa"));
}

#[test]
fn url_edit_marks_dirty_only_on_change() {
    init_logging();
    let mut state = SessionState::new();
    assert!(!state.consume_dirty());

    let (mut state, _effects) = update(state, Msg::UrlChanged("https://a".into()));
    assert!(state.consume_dirty());

    let (mut state, _effects) = update(state, Msg::UrlChanged("https://a".into()));
    assert!(!state.consume_dirty());
}

#[test]
fn download_without_current_record_does_nothing() {
    init_logging();
    let state = SessionState::new();

    let (next, effects) = update(state.clone(), Msg::DownloadClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn download_with_current_record_requests_save() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");
    let (state, _effects) = update(state, Msg::MintClicked);
    let minted = record("ed01", "Epic");
    let (state, _effects) = update(
        state,
        Msg::MintSucceeded {
            record: minted.clone(),
        },
    );

    let (_next, effects) = update(state, Msg::DownloadClicked);

    assert_eq!(effects, vec![Effect::SaveImage { record: minted }]);
}

#[test]
fn toast_expires_after_its_ticks() {
    init_logging();
    let state = SessionState::with_webhook_url("https://hooks.example.com/mint");
    let (state, _effects) = update(state, Msg::MintClicked);
    let (mut state, _effects) = update(
        state,
        Msg::MintSucceeded {
            record: record("ed01", "Common"),
        },
    );
    assert!(state.consume_dirty());

    for _ in 0..TOAST_TICKS - 1 {
        let (next, effects) = update(state, Msg::Tick);
        assert!(effects.is_empty());
        state = next;
        assert!(state.view().toast.is_some());
    }

    let (mut state, _effects) = update(state, Msg::Tick);
    assert!(state.view().toast.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn save_completions_only_raise_toasts() {
    init_logging();
    let state = SessionState::new();

    let (state, effects) = update(
        state,
        Msg::ImageSaved {
            filename: "ed01_Epic.png".to_string(),
        },
    );
    assert!(effects.is_empty());
    let toast = state.view().toast.expect("saved toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.text, "Saved ed01_Epic.png");

    let (state, effects) = update(
        state,
        Msg::ImageSaveFailed {
            message: "image payload is not a data: URI".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().toast.expect("failed toast").kind,
        ToastKind::Failure
    );
}
