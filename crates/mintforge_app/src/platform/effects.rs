use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use forge_logging::{forge_info, forge_warn};
use mintforge_core::{Effect, MintFailure, MintRecord, Msg};
use mintforge_engine::{
    EngineConfig, EngineEvent, EngineHandle, MintArtifact, MintId, WebhookError,
    WebhookFailureKind,
};

/// Translates core effects into engine commands and engine events back
/// into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    next_mint_id: MintId,
}

impl EffectRunner {
    pub fn new(output_dir: PathBuf, msg_tx: mpsc::Sender<Msg>) -> Self {
        let mut config = EngineConfig::default_with_output(output_dir);
        config.minted_at = Arc::new(|| Utc::now().timestamp_millis().to_string());

        let (engine, event_rx) = EngineHandle::new(config);
        spawn_event_loop(event_rx, msg_tx);

        Self {
            engine,
            next_mint_id: 1,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::InvokeWebhook { url } => {
                    let mint_id = self.next_mint_id;
                    self.next_mint_id += 1;
                    forge_info!("InvokeWebhook mint_id={} url={}", mint_id, url);
                    self.engine.invoke(mint_id, url);
                }
                Effect::SaveImage { record } => {
                    forge_info!("SaveImage record_id={}", record.id);
                    self.engine.save(record_to_artifact(record));
                }
            }
        }
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            let msg = match event {
                EngineEvent::MintCompleted { mint_id, result } => match result {
                    Ok(artifact) => Msg::MintSucceeded {
                        record: artifact_to_record(artifact),
                    },
                    Err(err) => {
                        forge_warn!("mint {} failed: {} ({})", mint_id, err.kind, err.message);
                        Msg::MintFailed {
                            reason: map_failure(err),
                        }
                    }
                },
                EngineEvent::ImageSaved { record_id, result } => match result {
                    Ok(path) => Msg::ImageSaved {
                        filename: path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string()),
                    },
                    Err(message) => {
                        forge_warn!("save for record {} failed: {}", record_id, message);
                        Msg::ImageSaveFailed { message }
                    }
                },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn artifact_to_record(artifact: MintArtifact) -> MintRecord {
    MintRecord {
        id: artifact.id,
        image: artifact.image,
        rarity: artifact.rarity,
        edition: artifact.edition,
    }
}

fn record_to_artifact(record: MintRecord) -> MintArtifact {
    MintArtifact {
        id: record.id,
        image: record.image,
        rarity: record.rarity,
        edition: record.edition,
    }
}

fn map_failure(err: WebhookError) -> MintFailure {
    match err.kind {
        WebhookFailureKind::InvalidUrl => MintFailure::InvalidUrl,
        WebhookFailureKind::HttpStatus(code) => MintFailure::RequestFailed(code),
        WebhookFailureKind::MalformedResponse => MintFailure::MalformedResponse,
        WebhookFailureKind::MissingImage => MintFailure::MissingImage,
        WebhookFailureKind::Timeout => MintFailure::Timeout,
        WebhookFailureKind::Network => MintFailure::Network(err.message),
    }
}
