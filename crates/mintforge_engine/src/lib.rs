//! MintForge engine: webhook IO, response normalization and image persistence.
mod engine;
mod filename;
mod normalize;
mod persist;
mod types;
mod webhook;

pub use engine::{EngineConfig, EngineHandle};
pub use filename::mint_filename;
pub use normalize::normalize_response;
pub use persist::{ensure_output_dir, save_image, AtomicImageWriter, SaveError};
pub use types::{EngineEvent, MintArtifact, MintId, WebhookError, WebhookFailureKind};
pub use webhook::{ReqwestInvoker, WebhookInvoker, WebhookSettings};
