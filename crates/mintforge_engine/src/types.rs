use std::fmt;
use std::path::PathBuf;

pub type MintId = u64;

/// One normalized mint result, ready to hand to the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintArtifact {
    /// `{edition}-{timestamp}`; unique even when editions collide.
    pub id: String,
    /// `data:` URI (inline base64 payload) or a plain URL.
    pub image: String,
    pub rarity: String,
    pub edition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    MintCompleted {
        mint_id: MintId,
        result: Result<MintArtifact, WebhookError>,
    },
    ImageSaved {
        record_id: String,
        /// Err carries the rendered failure message.
        result: Result<PathBuf, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookError {
    pub kind: WebhookFailureKind,
    pub message: String,
}

impl WebhookError {
    pub(crate) fn new(kind: WebhookFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookFailureKind {
    InvalidUrl,
    /// Non-success HTTP status from the webhook.
    HttpStatus(u16),
    /// Response body was not parseable JSON.
    MalformedResponse,
    /// Response carried neither `images` nor `image`.
    MissingImage,
    Timeout,
    Network,
}

impl fmt::Display for WebhookFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookFailureKind::InvalidUrl => write!(f, "invalid url"),
            WebhookFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            WebhookFailureKind::MalformedResponse => write!(f, "malformed response"),
            WebhookFailureKind::MissingImage => write!(f, "missing image"),
            WebhookFailureKind::Timeout => write!(f, "timeout"),
            WebhookFailureKind::Network => write!(f, "network error"),
        }
    }
}
