use std::collections::BTreeMap;
use std::fmt;

use crate::view_model::build_view;
use crate::SessionViewModel;

/// The canonical rarity tiers, in display order. Responses may carry any
/// other non-empty label; those become extra buckets after these five.
pub const CANONICAL_RARITIES: [&str; 5] = ["Common", "Rare", "Epic", "Legendary", "Unique"];

/// How many ticks a toast stays visible (ticks arrive every ~75 ms).
pub const TOAST_TICKS: u8 = 40;

/// One minted artifact plus its metadata. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRecord {
    /// Unique id, `{edition}-{millis}`; stays unique even when editions collide.
    pub id: String,
    /// Displayable image reference: a `data:` URI or a plain URL.
    pub image: String,
    /// Rarity label; free-form, see [`CANONICAL_RARITIES`].
    pub rarity: String,
    /// Opaque edition identifier supplied by the workflow or defaulted.
    pub edition: String,
}

/// Per-invocation phase. `Pending` blocks new invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// Transient notification shown for [`TOAST_TICKS`] ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub ticks_left: u8,
}

impl Toast {
    fn new(text: String, kind: ToastKind) -> Self {
        Self {
            text,
            kind,
            ticks_left: TOAST_TICKS,
        }
    }
}

/// Why a mint did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintFailure {
    /// No webhook URL was entered; no network call was made.
    MissingConfiguration,
    /// The webhook answered with a non-success HTTP status.
    RequestFailed(u16),
    /// The response body was not parseable JSON.
    MalformedResponse,
    /// The response carried neither an `images` list nor an `image` field.
    MissingImage,
    InvalidUrl,
    Timeout,
    Network(String),
}

impl fmt::Display for MintFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintFailure::MissingConfiguration => write!(f, "enter a webhook URL before minting"),
            MintFailure::RequestFailed(code) => write!(f, "webhook returned HTTP status {code}"),
            MintFailure::MalformedResponse => write!(f, "webhook response is not valid JSON"),
            MintFailure::MissingImage => write!(f, "no image received from webhook"),
            MintFailure::InvalidUrl => write!(f, "webhook URL is not a valid URL"),
            MintFailure::Timeout => write!(f, "webhook request timed out"),
            MintFailure::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

/// In-memory mint session: the current record, the append-only history and
/// the per-rarity occurrence counts, updated atomically on each success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    webhook_url: String,
    phase: Phase,
    current: Option<MintRecord>,
    history: Vec<MintRecord>,
    counts: BTreeMap<String, u32>,
    error: Option<String>,
    toast: Option<Toast>,
    dirty: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-seeded with a webhook URL (e.g. from the command line).
    pub fn with_webhook_url(url: impl Into<String>) -> Self {
        Self {
            webhook_url: url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> SessionViewModel {
        build_view(self)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn current(&self) -> Option<&MintRecord> {
        self.current.as_ref()
    }

    /// Arrival order, oldest first. Never reordered or deduplicated.
    pub fn history(&self) -> &[MintRecord] {
        &self.history
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub(crate) fn dirty_flag(&self) -> bool {
        self.dirty
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_webhook_url(&mut self, url: String) {
        if self.webhook_url != url {
            self.webhook_url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_mint(&mut self) {
        self.phase = Phase::Pending;
        self.error = None;
        self.mark_dirty();
    }

    /// Applies one successful mint: sets `current`, appends to history and
    /// increments the rarity bucket, as a single state transition.
    pub(crate) fn record_success(&mut self, record: MintRecord) {
        *self.counts.entry(record.rarity.clone()).or_insert(0) += 1;
        self.toast = Some(Toast::new(
            format!(
                "{} minted! Edition #{}",
                record.rarity,
                short_edition(&record.edition)
            ),
            ToastKind::Success,
        ));
        self.current = Some(record.clone());
        self.history.push(record);
        self.phase = Phase::Idle;
        self.error = None;
        self.mark_dirty();
    }

    /// A failed invocation only updates the transient error message; the
    /// prior current record, history and counts are left untouched.
    pub(crate) fn record_failure(&mut self, reason: &MintFailure) {
        self.error = Some(reason.to_string());
        self.toast = Some(Toast::new(
            format!("Mint failed: {reason}"),
            ToastKind::Failure,
        ));
        self.phase = Phase::Idle;
        self.mark_dirty();
    }

    pub(crate) fn set_toast(&mut self, text: String, kind: ToastKind) {
        self.toast = Some(Toast::new(text, kind));
        self.mark_dirty();
    }

    /// Advances toast expiry by one tick.
    pub(crate) fn tick(&mut self) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
                self.mark_dirty();
            }
        }
    }
}

/// First eight characters of an edition id, as shown on cards and toasts.
pub(crate) fn short_edition(edition: &str) -> &str {
    let end = edition
        .char_indices()
        .nth(8)
        .map(|(idx, _)| idx)
        .unwrap_or(edition.len());
    &edition[..end]
}
