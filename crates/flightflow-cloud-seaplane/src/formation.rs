//! Seaplane compute API: formations
//!
//! Create, read and delete a single named formation, and classify the
//! create responses into user-facing outcomes.

use crate::auth::SessionToken;
use crate::client::Endpoints;
use crate::error::{Result, SeaplaneError};
use flightflow_core::FormationSpec;
use reqwest::StatusCode;
use serde::Deserialize;

/// Outcome of a create call, keyed by response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// 200
    Created,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// Any other status, not reported to the user
    Unrecognized(u16),
}

impl CreateOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            200 => CreateOutcome::Created,
            400 => CreateOutcome::BadRequest,
            401 => CreateOutcome::Unauthorized,
            403 => CreateOutcome::Forbidden,
            404 => CreateOutcome::NotFound,
            409 => CreateOutcome::Conflict,
            other => CreateOutcome::Unrecognized(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CreateOutcome::Created)
    }

    /// Message shown to the user, `None` when the outcome is not reported
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CreateOutcome::Created => Some("Application deployed successfully"),
            CreateOutcome::BadRequest => Some(
                "There was something wrong with your request (this is usually caused by an issue with your included configuration)",
            ),
            CreateOutcome::Unauthorized => {
                Some("You are not logged in (try setting the `Authorization` header)")
            }
            CreateOutcome::Forbidden => {
                Some("You have insufficient permissions to perform this action")
            }
            CreateOutcome::NotFound => Some("The source for the clone operation was not found"),
            CreateOutcome::Conflict => Some(
                "There is already a formation with this name, formation names must be unique within your organization",
            ),
            CreateOutcome::Unrecognized(_) => None,
        }
    }
}

/// Body of `GET /v1/formations/{name}`
#[derive(Debug, Deserialize)]
struct FormationUrl {
    url: String,
}

/// Issues formation requests with an already obtained session token
pub struct FormationController<'a> {
    client: &'a reqwest::Client,
    endpoints: &'a Endpoints,
    token: &'a SessionToken,
}

impl<'a> FormationController<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        endpoints: &'a Endpoints,
        token: &'a SessionToken,
    ) -> Self {
        Self {
            client,
            endpoints,
            token,
        }
    }

    /// Create the formation
    ///
    /// Non-200 responses are returned as outcomes, not errors; only
    /// transport failures are errors.
    pub async fn create(&self, formation: &FormationSpec) -> Result<CreateOutcome> {
        let url = self.endpoints.formation_url(&formation.name)?;
        let body = serde_json::to_vec(formation)?;
        tracing::debug!(formation = %formation.name, "Creating formation at {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let outcome = CreateOutcome::from_status(response.status());
        tracing::info!(formation = %formation.name, ?outcome, "Formation create finished");
        Ok(outcome)
    }

    /// Read the externally reachable URL of the formation
    ///
    /// An unparseable body yields `Ok(None)`.
    pub async fn url(&self, name: &str) -> Result<Option<String>> {
        let url = self.endpoints.formation_url(name)?;
        tracing::debug!(formation = %name, "Reading formation URL");

        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let body = response.bytes().await?;
        match serde_json::from_slice::<FormationUrl>(&body) {
            Ok(parsed) if !parsed.url.is_empty() => Ok(Some(parsed.url)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(formation = %name, error = %e, "Can not unmarshal formation URL");
                Ok(None)
            }
        }
    }

    /// Force-delete the formation
    pub async fn delete(&self, name: &str) -> Result<()> {
        let mut url = self.endpoints.formation_url(name)?;
        url.query_pairs_mut().append_pair("force", "true");
        tracing::debug!(formation = %name, "Deleting formation");

        let response = self
            .client
            .delete(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|e| SeaplaneError::DeleteFailed {
                formation: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SeaplaneError::DeleteFailed {
                formation: name.to_string(),
                reason: format!("server returned {}", status),
            });
        }

        tracing::info!(formation = %name, "Formation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        let cases = [
            (200, CreateOutcome::Created),
            (400, CreateOutcome::BadRequest),
            (401, CreateOutcome::Unauthorized),
            (403, CreateOutcome::Forbidden),
            (404, CreateOutcome::NotFound),
            (409, CreateOutcome::Conflict),
            (500, CreateOutcome::Unrecognized(500)),
            (201, CreateOutcome::Unrecognized(201)),
        ];
        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(CreateOutcome::from_status(status), expected, "status {}", code);
        }
    }

    #[test]
    fn test_only_unrecognized_is_silent() {
        assert!(CreateOutcome::Unrecognized(502).message().is_none());
        assert!(CreateOutcome::Conflict.message().unwrap().contains("already a formation"));
        assert!(CreateOutcome::Forbidden.message().unwrap().contains("insufficient permissions"));
        assert!(CreateOutcome::Created.is_success());
        assert!(!CreateOutcome::Conflict.is_success());
    }
}
