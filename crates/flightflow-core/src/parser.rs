//! KDLパーサー
//!
//! flight.kdl をパースして [`FlightConfig`] を生成します。
//! 値の検証は行わず、検証は [`DeployConfig::validate`] に任せます。
//!
//! [`DeployConfig::validate`]: crate::model::DeployConfig::validate

use crate::error::{FlowError, Result};
use crate::model::{DeployConfig, EndpointConfig, FlightConfig};
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパース
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<FlightConfig> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_kdl_string(&content)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str) -> Result<FlightConfig> {
    let doc: KdlDocument = content.parse()?;
    let mut config = FlightConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "deploy" => {
                config.deploy = parse_deploy(node)?;
            }
            "endpoints" => {
                config.endpoints = parse_endpoints(node);
            }
            "timeout" => {
                config.timeout_secs = Some(first_u32(node, "timeout")? as u64);
            }
            other => {
                tracing::debug!("Skipping unknown node: {}", other);
            }
        }
    }

    Ok(config)
}

/// deploy ノードをパース
fn parse_deploy(node: &KdlNode) -> Result<DeployConfig> {
    let mut deploy = DeployConfig::default();

    let Some(children) = node.children() else {
        return Ok(deploy);
    };

    for child in children.nodes() {
        match child.name().value() {
            "formation_name" | "formation-name" | "formation" => {
                deploy.formation_name = first_string(child).unwrap_or_default();
            }
            "flight_name" | "flight-name" | "flight" => {
                deploy.flight_name = first_string(child).unwrap_or_default();
            }
            "api_key" | "api-key" => {
                deploy.api_key = first_string(child).unwrap_or_default();
            }
            "minimum" | "min" => {
                deploy.minimum = first_u32(child, "minimum")?;
            }
            "maximum" | "max" => {
                deploy.maximum = first_u32(child, "maximum")?;
            }
            other => {
                tracing::debug!("Skipping unknown deploy field: {}", other);
            }
        }
    }

    Ok(deploy)
}

/// endpoints ノードをパース
fn parse_endpoints(node: &KdlNode) -> EndpointConfig {
    let mut endpoints = EndpointConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "identity" => endpoints.identity = first_string(child),
                "compute" => endpoints.compute = first_string(child),
                _ => {}
            }
        }
    }

    endpoints
}

fn first_string(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn first_u32(node: &KdlNode, field: &str) -> Result<u32> {
    let value = node
        .entries()
        .first()
        .and_then(|e| e.value().as_integer())
        .ok_or_else(|| FlowError::InvalidConfig(format!("{} requires an integer", field)))?;

    u32::try_from(value)
        .map_err(|_| FlowError::InvalidConfig(format!("{} is out of range: {}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deploy_block() {
        let kdl = r#"
            deploy {
                formation_name "demoapp"
                flight_name "web"
                api_key "abc123"
            }
        "#;

        let config = parse_kdl_string(kdl).unwrap();
        assert_eq!(config.deploy.formation_name, "demoapp");
        assert_eq!(config.deploy.flight_name, "web");
        assert_eq!(config.deploy.api_key, "abc123");
        assert_eq!(config.deploy.minimum, 1);
        assert_eq!(config.deploy.maximum, 1);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_kebab_case_and_replicas() {
        let kdl = r#"
            deploy {
                formation-name "demoapp"
                flight-name "web"
                minimum 2
                maximum 4
            }
            timeout 15
        "#;

        let config = parse_kdl_string(kdl).unwrap();
        assert_eq!(config.deploy.formation_name, "demoapp");
        assert_eq!(config.deploy.minimum, 2);
        assert_eq!(config.deploy.maximum, 4);
        assert!(config.deploy.api_key.is_empty());
        assert_eq!(config.timeout_secs, Some(15));
    }

    #[test]
    fn test_parse_endpoints() {
        let kdl = r#"
            endpoints {
                identity "http://localhost:9000"
                compute "http://localhost:9001"
            }
        "#;

        let config = parse_kdl_string(kdl).unwrap();
        assert_eq!(
            config.endpoints.identity.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(
            config.endpoints.compute.as_deref(),
            Some("http://localhost:9001")
        );
    }

    #[test]
    fn test_parse_negative_replicas_rejected() {
        let kdl = r#"
            deploy {
                minimum -1
            }
        "#;

        assert!(matches!(
            parse_kdl_string(kdl),
            Err(FlowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_invalid_kdl() {
        assert!(matches!(
            parse_kdl_string("deploy {"),
            Err(FlowError::KdlParse(_))
        ));
    }

    #[test]
    fn test_unknown_nodes_are_ignored() {
        let kdl = r#"
            project "something"
            deploy {
                formation_name "demoapp"
                region "eu"
            }
        "#;

        let config = parse_kdl_string(kdl).unwrap();
        assert_eq!(config.deploy.formation_name, "demoapp");
    }
}
