#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one POST request against the configured webhook URL.
    InvokeWebhook { url: String },
    /// Persist the image payload of `record` to disk.
    SaveImage { record: crate::MintRecord },
}
