//! Declared resources
//!
//! A provider declares the resources a deployment consists of by
//! registering [`ResourceHandler`]s with a [`ResourceManager`]. The manager
//! drives each handler through `declared → created → destroyed` (or
//! `orphaned` when an operation fails part way) and folds their state into
//! a single [`StateBlob`].

use crate::error::{CloudError, Result};
use crate::health::Health;
use crate::reporter::Reporter;
use crate::state::{Lifecycle, ResourceEntry, StateBlob};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Inputs available to a handler's create callback
pub struct ResourceContext<'a> {
    /// Name of the deployment (the formation name)
    pub deployment_name: &'a str,
    pub reporter: &'a dyn Reporter,
}

/// A single named resource managed by a provider
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Resource name, unique within a manager (e.g. "deployment")
    fn name(&self) -> &str;

    /// Create the resource and return its state
    async fn create(&self, ctx: &ResourceContext<'_>) -> Result<serde_json::Value>;

    /// Destroy the resource described by `state`
    async fn destroy(&self, state: &serde_json::Value, reporter: &dyn Reporter) -> Result<()>;

    /// Health contribution of this resource, if any
    async fn status(
        &self,
        state: &serde_json::Value,
        reporter: &dyn Reporter,
    ) -> Result<Option<Health>>;

    /// Minimal state rebuilt from the deployment name alone
    fn legacy_state(&self, deployment_name: &str) -> Option<serde_json::Value> {
        let _ = deployment_name;
        None
    }
}

/// Registry of declared resources and their state
pub struct ResourceManager {
    handlers: Vec<Box<dyn ResourceHandler>>,
    entries: BTreeMap<String, ResourceEntry>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Declare a resource
    pub fn with_resource(mut self, handler: impl ResourceHandler + 'static) -> Self {
        self.entries
            .insert(handler.name().to_string(), ResourceEntry::declared());
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn lifecycle(&self, name: &str) -> Option<Lifecycle> {
        self.entries.get(name).map(|e| e.lifecycle)
    }

    /// Typed state of a resource
    pub fn typed_state<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CloudError::ResourceNotDeclared(name.to_string()))?;
        serde_json::from_value(entry.state.clone()).map_err(|e| {
            CloudError::InvalidState(format!("resource '{}' has unreadable state: {}", name, e))
        })
    }

    /// Snapshot of every resource as a blob
    pub fn state(&self) -> StateBlob {
        StateBlob::V1 {
            resources: self.entries.clone(),
        }
    }

    /// Load state from a previous run
    ///
    /// Legacy blobs are rebuilt through each handler's
    /// [`ResourceHandler::legacy_state`].
    pub fn load_state(&mut self, blob: &StateBlob) -> Result<()> {
        match blob {
            StateBlob::Legacy { name } => {
                tracing::debug!("Reconstructing resource state from deployment name {}", name);
                self.reconstruct(name);
            }
            StateBlob::V1 { resources } => {
                for (name, entry) in resources {
                    if !self.entries.contains_key(name) {
                        tracing::warn!("State contains undeclared resource '{}', keeping it", name);
                    }
                    self.entries.insert(name.clone(), entry.clone());
                }
            }
        }
        Ok(())
    }

    /// Rebuild state from the deployment name when no blob is available
    pub fn reconstruct(&mut self, deployment_name: &str) {
        for handler in &self.handlers {
            if let Some(state) = handler.legacy_state(deployment_name) {
                self.entries
                    .insert(handler.name().to_string(), ResourceEntry::created(state));
            }
        }
    }

    /// Create every declared resource in declaration order
    ///
    /// On failure, resources created earlier in this call are marked
    /// orphaned and the error is returned.
    pub async fn create_all(&mut self, ctx: &ResourceContext<'_>) -> Result<()> {
        let mut created: Vec<String> = Vec::new();

        for handler in &self.handlers {
            let name = handler.name().to_string();
            match handler.create(ctx).await {
                Ok(state) => {
                    tracing::info!(resource = %name, "Resource created");
                    self.entries.insert(name.clone(), ResourceEntry::created(state));
                    created.push(name);
                }
                Err(e) => {
                    tracing::warn!(resource = %name, error = %e, "Resource creation failed");
                    for orphan in &created {
                        if let Some(entry) = self.entries.get_mut(orphan) {
                            entry.lifecycle = Lifecycle::Orphaned;
                        }
                    }
                    return Err(CloudError::ResourceFailed {
                        resource: name,
                        operation: "create",
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Destroy every created resource in reverse declaration order
    ///
    /// Resources that were never created or are already destroyed are
    /// skipped. All remaining handlers are attempted; the first error is
    /// returned and the failed resources are left orphaned.
    pub async fn destroy_all(&mut self, reporter: &dyn Reporter) -> Result<()> {
        let mut first_error: Option<CloudError> = None;

        for handler in self.handlers.iter().rev() {
            let name = handler.name().to_string();
            let Some(entry) = self.entries.get_mut(&name) else {
                continue;
            };
            if matches!(entry.lifecycle, Lifecycle::Declared | Lifecycle::Destroyed) {
                continue;
            }

            match handler.destroy(&entry.state, reporter).await {
                Ok(()) => {
                    tracing::info!(resource = %name, "Resource destroyed");
                    entry.lifecycle = Lifecycle::Destroyed;
                }
                Err(e) => {
                    tracing::warn!(resource = %name, error = %e, "Resource destroy failed");
                    entry.lifecycle = Lifecycle::Orphaned;
                    first_error.get_or_insert(CloudError::ResourceFailed {
                        resource: name,
                        operation: "destroy",
                        message: e.to_string(),
                    });
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Collect each resource's health contribution
    pub async fn status_all(&self, reporter: &dyn Reporter) -> Result<Vec<(String, Health)>> {
        let mut reports = Vec::new();

        for handler in &self.handlers {
            let state = self
                .entries
                .get(handler.name())
                .map(|e| e.state.clone())
                .unwrap_or_default();
            if let Some(health) = handler.status(&state, reporter).await? {
                reports.push((handler.name().to_string(), health));
            }
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NoopReporter;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct NamedState {
        name: String,
    }

    struct TestResource {
        name: &'static str,
        fail_create: bool,
        fail_destroy: bool,
        destroyed: Arc<AtomicUsize>,
    }

    impl TestResource {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                fail_create: false,
                fail_destroy: false,
                destroyed: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ResourceHandler for TestResource {
        fn name(&self) -> &str {
            self.name
        }

        async fn create(&self, ctx: &ResourceContext<'_>) -> Result<serde_json::Value> {
            if self.fail_create {
                return Err(CloudError::InvalidState("boom".to_string()));
            }
            Ok(serde_json::json!({ "name": ctx.deployment_name }))
        }

        async fn destroy(&self, _state: &serde_json::Value, _reporter: &dyn Reporter) -> Result<()> {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
            if self.fail_destroy {
                return Err(CloudError::InvalidState("boom".to_string()));
            }
            Ok(())
        }

        async fn status(
            &self,
            _state: &serde_json::Value,
            _reporter: &dyn Reporter,
        ) -> Result<Option<Health>> {
            Ok(None)
        }

        fn legacy_state(&self, deployment_name: &str) -> Option<serde_json::Value> {
            Some(serde_json::json!({ "name": deployment_name }))
        }
    }

    fn ctx<'a>(reporter: &'a dyn Reporter) -> ResourceContext<'a> {
        ResourceContext {
            deployment_name: "demoapp",
            reporter,
        }
    }

    #[tokio::test]
    async fn test_create_all_marks_created() {
        let mut manager = ResourceManager::new().with_resource(TestResource::new("deployment"));
        assert_eq!(manager.lifecycle("deployment"), Some(Lifecycle::Declared));

        manager.create_all(&ctx(&NoopReporter)).await.unwrap();

        assert_eq!(manager.lifecycle("deployment"), Some(Lifecycle::Created));
        let state: NamedState = manager.typed_state("deployment").unwrap();
        assert_eq!(state.name, "demoapp");
    }

    #[tokio::test]
    async fn test_create_failure_orphans_earlier_resources() {
        let mut failing = TestResource::new("second");
        failing.fail_create = true;
        let mut manager = ResourceManager::new()
            .with_resource(TestResource::new("first"))
            .with_resource(failing);

        let err = manager.create_all(&ctx(&NoopReporter)).await.unwrap_err();
        assert!(matches!(
            err,
            CloudError::ResourceFailed { ref resource, operation: "create", .. } if resource == "second"
        ));
        assert_eq!(manager.lifecycle("first"), Some(Lifecycle::Orphaned));
        assert_eq!(manager.lifecycle("second"), Some(Lifecycle::Declared));
    }

    #[tokio::test]
    async fn test_state_round_trip_through_blob() {
        let mut manager = ResourceManager::new().with_resource(TestResource::new("deployment"));
        manager.create_all(&ctx(&NoopReporter)).await.unwrap();
        let blob = manager.state();

        let json = blob.to_json().unwrap();
        let mut restored = ResourceManager::new().with_resource(TestResource::new("deployment"));
        restored.load_state(&StateBlob::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.state(), blob);
    }

    #[tokio::test]
    async fn test_legacy_blob_reconstructs_state() {
        let mut manager = ResourceManager::new().with_resource(TestResource::new("deployment"));
        manager.load_state(&StateBlob::legacy("oldapp")).unwrap();

        assert_eq!(manager.lifecycle("deployment"), Some(Lifecycle::Created));
        let state: NamedState = manager.typed_state("deployment").unwrap();
        assert_eq!(state.name, "oldapp");
    }

    #[tokio::test]
    async fn test_destroy_all_continues_after_failure() {
        let mut failing = TestResource::new("first");
        failing.fail_destroy = true;
        let second = TestResource::new("second");
        let second_count = second.destroyed.clone();

        let mut manager = ResourceManager::new()
            .with_resource(failing)
            .with_resource(second);
        manager.create_all(&ctx(&NoopReporter)).await.unwrap();

        let err = manager.destroy_all(&NoopReporter).await.unwrap_err();
        assert!(matches!(
            err,
            CloudError::ResourceFailed { ref resource, operation: "destroy", .. } if resource == "first"
        ));
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
        assert_eq!(manager.lifecycle("first"), Some(Lifecycle::Orphaned));
        assert_eq!(manager.lifecycle("second"), Some(Lifecycle::Destroyed));
    }

    #[tokio::test]
    async fn test_destroy_all_skips_destroyed() {
        let resource = TestResource::new("deployment");
        let count = resource.destroyed.clone();
        let mut manager = ResourceManager::new().with_resource(resource);
        manager.create_all(&ctx(&NoopReporter)).await.unwrap();

        manager.destroy_all(&NoopReporter).await.unwrap();
        manager.destroy_all(&NoopReporter).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(manager.lifecycle("deployment"), Some(Lifecycle::Destroyed));
    }

    #[tokio::test]
    async fn test_destroy_all_skips_never_created() {
        let resource = TestResource::new("deployment");
        let count = resource.destroyed.clone();
        let mut manager = ResourceManager::new().with_resource(resource);

        let mut resources = BTreeMap::new();
        resources.insert("deployment".to_string(), ResourceEntry::declared());
        manager
            .load_state(&StateBlob::V1 { resources })
            .unwrap();

        manager.destroy_all(&NoopReporter).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(manager.lifecycle("deployment"), Some(Lifecycle::Declared));
    }
}
