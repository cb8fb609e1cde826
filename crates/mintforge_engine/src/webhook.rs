use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::{WebhookError, WebhookFailureKind};

#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Issues the single workflow invocation: one POST with an empty body,
/// expecting a JSON response.
#[async_trait::async_trait]
pub trait WebhookInvoker: Send + Sync {
    async fn invoke(&self, url: &str) -> Result<serde_json::Value, WebhookError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInvoker {
    settings: WebhookSettings,
}

impl ReqwestInvoker {
    pub fn new(settings: WebhookSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, WebhookError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| WebhookError::new(WebhookFailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl WebhookInvoker for ReqwestInvoker {
    async fn invoke(&self, url: &str) -> Result<serde_json::Value, WebhookError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| WebhookError::new(WebhookFailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        // The contract is a bodiless POST with a JSON content type.
        let response = client
            .post(parsed)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::new(
                WebhookFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| {
            WebhookError::new(WebhookFailureKind::MalformedResponse, err.to_string())
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> WebhookError {
    if err.is_timeout() {
        return WebhookError::new(WebhookFailureKind::Timeout, err.to_string());
    }
    WebhookError::new(WebhookFailureKind::Network, err.to_string())
}
