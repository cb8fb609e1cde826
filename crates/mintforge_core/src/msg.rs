#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the webhook URL input box.
    UrlChanged(String),
    /// User triggered a mint.
    MintClicked,
    /// Engine completed a mint and produced a record.
    MintSucceeded { record: crate::MintRecord },
    /// Engine completed a mint with a failure.
    MintFailed { reason: crate::MintFailure },
    /// User asked to save the currently displayed image to a file.
    DownloadClicked,
    /// Image persistence finished.
    ImageSaved { filename: String },
    /// Image persistence failed.
    ImageSaveFailed { message: String },
    /// UI/render tick to coalesce rendering and expire toasts.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
