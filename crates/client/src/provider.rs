//! Translation provider boundary.

use async_trait::async_trait;
use mockall::automock;
use shared::{TranslateErrorResponse, TranslateRequest, TranslateResponse};
use thiserror::Error;

/// Provider call failure variants.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("translation request failed")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("translation provider returned {status}: {message}")]
    Provider { status: u16, message: String },
}

/// External text-translation service.
#[automock]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translates `request.text` into `request.target_language`.
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError>;
}

/// Fire-and-forget channel for surfacing problems to the end user.
#[automock]
pub trait NotificationSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// HTTP-backed provider client.
#[derive(Debug, Clone)]
pub struct HttpTranslationProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslationProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TranslationProvider for HttpTranslationProvider {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // Prefer the provider's own error message when the body parses.
            let message = match resp.json::<TranslateErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(ProviderError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = resp.json().await?;
        Ok(body.translated_text)
    }
}
