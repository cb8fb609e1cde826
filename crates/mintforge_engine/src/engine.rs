use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use forge_logging::{forge_info, forge_warn};

use crate::normalize::normalize_response;
use crate::persist::save_image;
use crate::webhook::{ReqwestInvoker, WebhookInvoker, WebhookSettings};
use crate::{EngineEvent, MintArtifact, MintId, WebhookError};

/// Engine-wide configuration, owned by the worker thread.
#[derive(Clone)]
pub struct EngineConfig {
    pub settings: WebhookSettings,
    /// Directory image downloads are written into.
    pub output_dir: PathBuf,
    /// Timestamp source backing edition defaults and record ids.
    /// Injectable so tests stay deterministic.
    pub minted_at: Arc<dyn Fn() -> String + Send + Sync>,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            settings: WebhookSettings::default(),
            output_dir,
            minted_at: Arc::new(unix_millis),
        }
    }
}

fn unix_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

enum EngineCommand {
    Invoke { mint_id: MintId, url: String },
    SaveImage { artifact: MintArtifact },
}

/// Command channel into a worker thread owning a tokio runtime. Events
/// come back through the receiver returned by [`EngineHandle::new`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let invoker = Arc::new(ReqwestInvoker::new(config.settings.clone()));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Invoke { mint_id, url } => {
                        let invoker = invoker.clone();
                        let event_tx = event_tx.clone();
                        let minted_at = config.minted_at.clone();
                        runtime.spawn(async move {
                            let stamp = (*minted_at)();
                            let result = run_mint(invoker.as_ref(), &url, &stamp).await;
                            if let Err(err) = &result {
                                forge_warn!("mint {} failed: {}", mint_id, err.kind);
                            }
                            let _ = event_tx.send(EngineEvent::MintCompleted { mint_id, result });
                        });
                    }
                    EngineCommand::SaveImage { artifact } => {
                        // Plain filesystem work; no need to go through the runtime.
                        let result = save_image(&config.output_dir, &artifact)
                            .map_err(|err| err.to_string());
                        match &result {
                            Ok(path) => forge_info!("saved image to {:?}", path),
                            Err(message) => forge_warn!("image save failed: {}", message),
                        }
                        let _ = event_tx.send(EngineEvent::ImageSaved {
                            record_id: artifact.id,
                            result,
                        });
                    }
                }
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn invoke(&self, mint_id: MintId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Invoke {
            mint_id,
            url: url.into(),
        });
    }

    pub fn save(&self, artifact: MintArtifact) {
        let _ = self.cmd_tx.send(EngineCommand::SaveImage { artifact });
    }
}

async fn run_mint(
    invoker: &dyn WebhookInvoker,
    url: &str,
    minted_at: &str,
) -> Result<MintArtifact, WebhookError> {
    let value = invoker.invoke(url).await?;
    normalize_response(&value, minted_at)
}
