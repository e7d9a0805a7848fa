use digest_logging::{digest_debug, digest_info, digest_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::types::map_reqwest_error;
use crate::{ClientError, FailureKind, FetchError, FetchSettings};

/// Resolves a topic to the raw response text the controller caches.
///
/// Never fails: every error is folded into the returned text.
#[async_trait::async_trait]
pub trait TopicSource: Send + Sync {
    async fn fetch_topic(&self, topic: &str) -> String;
}

/// POSTs `{"topic": ...}` to the automation webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl WebhookClient {
    pub fn new(endpoint: &str, settings: &FetchSettings) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|err| ClientError::InvalidUrl {
            url: endpoint.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            client: settings.build_client()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Single attempt; only a `200 OK` body counts as success.
    pub async fn try_fetch(&self, topic: &str) -> Result<String, FetchError> {
        let body = serde_json::json!({ "topic": topic }).to_string();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl TopicSource for WebhookClient {
    async fn fetch_topic(&self, topic: &str) -> String {
        digest_info!("Fetching results for '{}'...", topic);
        match self.try_fetch(topic).await {
            Ok(body) => {
                digest_debug!("Webhook answered '{}' with {} bytes", topic, body.len());
                body
            }
            Err(err) => {
                digest_warn!(
                    "Webhook fetch for '{}' failed ({}): {}",
                    topic,
                    err.kind,
                    err.message
                );
                err.into_raw_response()
            }
        }
    }
}
