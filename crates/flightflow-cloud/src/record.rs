//! Deployment record

use crate::state::StateBlob;
use serde::{Deserialize, Serialize};

/// Output of a deploy, input to status and destroy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Formation name the deployment was created under
    pub name: String,

    /// Externally reachable URL, empty when it could not be discovered
    #[serde(default)]
    pub url: String,

    /// Whether the platform confirmed the create call
    #[serde(default)]
    pub deployed: bool,

    /// Resource state; `None` for records written before state tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<StateBlob>,
}

impl DeploymentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
            deployed: false,
            resource_state: None,
        }
    }

    /// Build a record that only knows the formation name
    pub fn legacy(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_without_state_fields() {
        let record: DeploymentRecord = serde_json::from_str(r#"{"name":"demoapp"}"#).unwrap();
        assert_eq!(record.name, "demoapp");
        assert!(record.url.is_empty());
        assert!(!record.deployed);
        assert!(record.resource_state.is_none());
    }

    #[test]
    fn test_record_omits_missing_state() {
        let json = serde_json::to_value(DeploymentRecord::legacy("demoapp")).unwrap();
        assert!(json.get("resource_state").is_none());
    }
}
