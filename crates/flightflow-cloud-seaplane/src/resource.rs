//! The `deployment` resource
//!
//! The formation itself is created and deleted by the platform; this
//! resource only records which formation the deployment owns so teardown
//! can find it again.

use async_trait::async_trait;
use flightflow_cloud::{Health, Reporter, ResourceContext, ResourceHandler};
use serde::{Deserialize, Serialize};

pub const DEPLOYMENT_RESOURCE: &str = "deployment";

/// State stored for the `deployment` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentState {
    /// Formation name
    pub name: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DeploymentResource;

#[async_trait]
impl ResourceHandler for DeploymentResource {
    fn name(&self) -> &str {
        DEPLOYMENT_RESOURCE
    }

    async fn create(&self, ctx: &ResourceContext<'_>) -> flightflow_cloud::Result<serde_json::Value> {
        let state = DeploymentState {
            name: ctx.deployment_name.to_string(),
        };
        Ok(serde_json::to_value(state)?)
    }

    async fn destroy(
        &self,
        state: &serde_json::Value,
        _reporter: &dyn Reporter,
    ) -> flightflow_cloud::Result<()> {
        tracing::debug!(?state, "Releasing deployment resource");
        Ok(())
    }

    async fn status(
        &self,
        _state: &serde_json::Value,
        _reporter: &dyn Reporter,
    ) -> flightflow_cloud::Result<Option<Health>> {
        Ok(None)
    }

    fn legacy_state(&self, deployment_name: &str) -> Option<serde_json::Value> {
        serde_json::to_value(DeploymentState {
            name: deployment_name.to_string(),
        })
        .ok()
    }
}
