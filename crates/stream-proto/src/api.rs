//! HTTP client for the schedule and live-status endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::protocol::{LiveStreamStatus, ScheduledVideoEntry, UpcomingResponse};

pub const UPCOMING_PATH: &str = "/api/upcoming";
pub const LIVE_PATH: &str = "/api/live";

/// Why a fetch produced no usable body.
///
/// Cloneable so a view can keep the last one around and hand it to the
/// renderer alongside stale data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded {code} {reason}")]
    Status { code: u16, reason: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short diagnostic, the HTTP reason phrase when there is one.
    pub fn status_text(&self) -> String {
        match self {
            Self::Status { code, reason } if reason.is_empty() => code.to_string(),
            Self::Status { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("streamwatch/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/upcoming`, unwrapped from its `scheduled_videos` envelope.
    pub async fn fetch_upcoming(&self) -> Result<Vec<ScheduledVideoEntry>, FetchError> {
        let resp: UpcomingResponse = self.get_json(UPCOMING_PATH).await?;
        Ok(resp.scheduled_videos)
    }

    /// `GET /api/live`; the body is the status object itself.
    pub async fn fetch_live(&self) -> Result<LiveStreamStatus, FetchError> {
        self.get_json(LIVE_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!("[api] GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        // Read the body first so a malformed payload is reported as a decode
        // error rather than a transport one.
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            request_timeout_secs: Some(3),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.endpoint(LIVE_PATH), "http://localhost:8080/api/live");
    }

    #[test]
    fn status_text_prefers_reason_phrase() {
        let err = FetchError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.status_text(), "Service Unavailable");
        assert_eq!(err.to_string(), "server responded 503 Service Unavailable");

        let bare = FetchError::Status {
            code: 599,
            reason: String::new(),
        };
        assert_eq!(bare.status_text(), "599");

        let net = FetchError::Network("connection refused".to_string());
        assert_eq!(net.status_text(), "request failed: connection refused");
    }
}
