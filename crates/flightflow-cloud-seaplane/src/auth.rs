//! Token exchange against the Seaplane identity API

use crate::client::Endpoints;
use crate::error::{Result, SeaplaneError};
use reqwest::header::CONTENT_LENGTH;

/// Short-lived bearer token for compute API calls
///
/// Lives only for one run and is never persisted or logged.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Exchanges an API key for a [`SessionToken`]
pub struct Authenticator<'a> {
    client: &'a reqwest::Client,
    endpoints: &'a Endpoints,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a reqwest::Client, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Exchange the API key for a session token
    ///
    /// Sends an empty-body `POST` authorized with the API key; the raw
    /// response body is the token. Any failure is fatal for the run.
    pub async fn authenticate(&self, api_key: &str) -> Result<SessionToken> {
        if api_key.is_empty() {
            return Err(SeaplaneError::Authentication(
                "API key is empty".to_string(),
            ));
        }

        let url = self.endpoints.token_url()?;
        tracing::debug!("Requesting session token from {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await
            .map_err(|e| SeaplaneError::Authentication(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeaplaneError::Authentication(format!(
                "identity endpoint returned {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SeaplaneError::Authentication(format!("unreadable token: {}", e)))?;

        let token = String::from_utf8_lossy(&body).trim().to_string();
        if token.is_empty() {
            return Err(SeaplaneError::Authentication(
                "identity endpoint returned an empty token".to_string(),
            ));
        }

        tracing::debug!("Obtained session token");
        Ok(SessionToken(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("very-secret");
        assert!(!format!("{:?}", token).contains("very-secret"));
        assert_eq!(token.as_str(), "very-secret");
    }

    #[tokio::test]
    async fn test_empty_api_key_rejected_without_request() {
        let client = reqwest::Client::new();
        let endpoints = Endpoints {
            identity: "http://127.0.0.1:1".to_string(),
            compute: "http://127.0.0.1:1".to_string(),
        };
        let auth = Authenticator::new(&client, &endpoints);
        assert!(matches!(
            auth.authenticate("").await,
            Err(SeaplaneError::Authentication(_))
        ));
    }
}
