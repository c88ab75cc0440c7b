//! Deployment orchestration on Seaplane
//!
//! A [`SeaplanePlatform`] is built per run from an explicit config value and
//! owns the HTTP client used for every call of that run. Every operation is
//! strictly sequential; dropping the returned future cancels the request in
//! flight.

use crate::auth::{Authenticator, SessionToken};
use crate::client::{Endpoints, build_client};
use crate::error::Result;
use crate::formation::FormationController;
use crate::resource::{DEPLOYMENT_RESOURCE, DeploymentResource, DeploymentState};
use flightflow_cloud::{
    DeploymentRecord, Health, HealthReport, Reporter, ResourceContext, ResourceManager,
    StepStatus,
};
use flightflow_core::{DeployConfig, FlightConfig};
use std::time::Duration;

/// Message of the status report
pub const STATUS_MESSAGE: &str = "Application successfully deployed";

/// Connection options for a run
#[derive(Debug, Clone, Default)]
pub struct PlatformOptions {
    pub endpoints: Endpoints,
    pub timeout: Option<Duration>,
}

impl PlatformOptions {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            endpoints: Endpoints::from_config(&config.endpoints),
            timeout: config.timeout(),
        }
    }
}

/// Seaplane deployment platform
pub struct SeaplanePlatform {
    config: DeployConfig,
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl SeaplanePlatform {
    /// Create a platform for one run; the config and API key are validated first
    pub fn new(config: DeployConfig, options: PlatformOptions) -> Result<Self> {
        config.validate()?;
        config.validate_credentials()?;
        let client = build_client(options.timeout)?;
        Ok(Self {
            config,
            endpoints: options.endpoints,
            client,
        })
    }

    /// Resources every Seaplane deployment consists of
    fn resource_manager() -> ResourceManager {
        ResourceManager::new().with_resource(DeploymentResource)
    }

    async fn authenticate(&self, reporter: &dyn Reporter) -> Result<SessionToken> {
        reporter.update("Authenticating with Seaplane");
        let token = Authenticator::new(&self.client, &self.endpoints)
            .authenticate(&self.config.api_key)
            .await?;
        reporter.step(StepStatus::Ok, "Successfully authenticated with Seaplane");
        Ok(token)
    }

    /// Deploy `image` as the configured formation
    ///
    /// Create responses other than 200 are reported and produce a record
    /// with `deployed == false`; they are not errors. Authentication and
    /// transport failures abort the run.
    pub async fn deploy(&self, image: &str, reporter: &dyn Reporter) -> Result<DeploymentRecord> {
        reporter.update("Deploy application");
        let formation_name = self.config.formation_name.as_str();

        let mut resources = Self::resource_manager();
        resources
            .create_all(&ResourceContext {
                deployment_name: formation_name,
                reporter,
            })
            .await?;

        reporter.update("Deploying Application on Seaplane");
        let token = self.authenticate(reporter).await?;
        let controller = FormationController::new(&self.client, &self.endpoints, &token);

        let formation = self.config.formation(image);
        reporter.update("Launching Formation");
        let outcome = controller.create(&formation).await?;

        let mut record = DeploymentRecord::new(formation_name);

        if outcome.is_success() {
            reporter.step(StepStatus::Ok, "Application deployed successfully");
            reporter.health(Health::Alive);
            record.deployed = true;

            match controller.url(formation_name).await {
                Ok(Some(url)) => {
                    reporter.step(
                        StepStatus::Ok,
                        &format!(
                            "We are launching your formation on {} give it a minute if the URL does not immediately load",
                            url
                        ),
                    );
                    record.url = url;
                }
                Ok(None) => {
                    tracing::warn!(formation = %formation_name, "Formation URL not available");
                }
                Err(e) => {
                    tracing::warn!(formation = %formation_name, error = %e, "Failed to read formation URL");
                    reporter.step(
                        StepStatus::Warning,
                        "Formation created, but its URL could not be read",
                    );
                }
            }
        } else if let Some(message) = outcome.message() {
            reporter.step(StepStatus::Error, message);
        } else {
            tracing::warn!(
                formation = %formation_name,
                ?outcome,
                "Formation create returned an unexpected status"
            );
        }

        record.resource_state = Some(resources.state());
        Ok(record)
    }

    /// Load the record's resource state, rebuilding it from the name when absent
    fn load_resources(record: &DeploymentRecord) -> Result<ResourceManager> {
        let mut resources = Self::resource_manager();
        match &record.resource_state {
            None => {
                tracing::debug!(deployment = %record.name, "No resource state, using legacy fallback");
                resources.reconstruct(&record.name);
            }
            Some(blob) => resources.load_state(blob)?,
        }
        Ok(resources)
    }

    /// Tear down the deployment described by `record`
    ///
    /// A failed delete is returned as an error before any local resource is
    /// marked destroyed, so the caller can keep the record and retry.
    pub async fn destroy(
        &self,
        record: &DeploymentRecord,
        reporter: &dyn Reporter,
    ) -> Result<HealthReport> {
        let mut resources = Self::load_resources(record)?;

        let formation_name = resources
            .typed_state::<DeploymentState>(DEPLOYMENT_RESOURCE)
            .map(|state| state.name)
            .unwrap_or_else(|_| record.name.clone());

        let token = self.authenticate(reporter).await?;
        let controller = FormationController::new(&self.client, &self.endpoints, &token);

        if let Err(e) = controller.delete(&formation_name).await {
            reporter.step(
                StepStatus::Error,
                &format!("Unable to remove formation {}", formation_name),
            );
            return Err(e);
        }

        reporter.step(
            StepStatus::Ok,
            &format!("Removed formation {}", formation_name),
        );
        reporter.health(Health::Down);

        resources.destroy_all(reporter).await?;

        Ok(HealthReport::new(
            Health::Down,
            format!("Formation {} removed", formation_name),
        ))
    }

    /// Report the health of the deployment described by `record`
    ///
    /// Does not query Seaplane and needs no credentials: the report only
    /// states that the deploy call completed.
    pub async fn status(record: &DeploymentRecord, reporter: &dyn Reporter) -> Result<HealthReport> {
        let resources = Self::load_resources(record)?;

        for (resource, health) in resources.status_all(reporter).await? {
            tracing::debug!(%resource, %health, "Resource status");
        }

        Ok(HealthReport::new(Health::Ready, STATUS_MESSAGE))
    }
}
