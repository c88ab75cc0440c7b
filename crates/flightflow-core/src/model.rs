//! デプロイ設定モデル
//!
//! flight.kdl から読み込まれる設定と、そこから組み立てる
//! フォーメーション / フライトの定義。

use crate::error::{FlowError, Result};
use crate::validate::{validate_flight_name, validate_formation_name};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// レプリカ数のデフォルト値
pub const DEFAULT_REPLICAS: u32 = 1;

/// flight.kdl 全体
#[derive(Debug, Clone, Default)]
pub struct FlightConfig {
    /// deploy ブロック
    pub deploy: DeployConfig,

    /// API エンドポイントの上書き
    pub endpoints: EndpointConfig,

    /// リクエスト毎のタイムアウト（秒）
    pub timeout_secs: Option<u64>,
}

impl FlightConfig {
    /// タイムアウトを Duration で取得
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// デプロイ設定
///
/// `api_key` は秘密情報のため、Debug 出力ではマスクされる。
#[derive(Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub formation_name: String,
    pub flight_name: String,
    pub api_key: String,
    pub minimum: u32,
    pub maximum: u32,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            formation_name: String::new(),
            flight_name: String::new(),
            api_key: String::new(),
            minimum: DEFAULT_REPLICAS,
            maximum: DEFAULT_REPLICAS,
        }
    }
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("formation_name", &self.formation_name)
            .field("flight_name", &self.flight_name)
            .field("api_key", &"<redacted>")
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .finish()
    }
}

impl DeployConfig {
    pub fn new(
        formation_name: impl Into<String>,
        flight_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            formation_name: formation_name.into(),
            flight_name: flight_name.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_replicas(mut self, minimum: u32, maximum: u32) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// 名前とレプリカ数を検証
    ///
    /// API キーは見ない。ネットワークを使う操作の前に
    /// [`DeployConfig::validate_credentials`] で確認する。
    pub fn validate(&self) -> Result<()> {
        validate_formation_name(&self.formation_name)?;
        validate_flight_name(&self.flight_name)?;

        if self.maximum == 0 {
            return Err(FlowError::InvalidConfig(
                "maximum must be at least 1".to_string(),
            ));
        }

        if self.minimum > self.maximum {
            return Err(FlowError::InvalidConfig(format!(
                "minimum ({}) must not exceed maximum ({})",
                self.minimum, self.maximum
            )));
        }

        Ok(())
    }

    /// API キーが設定されているか検証
    pub fn validate_credentials(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(FlowError::MissingField("api_key"));
        }
        Ok(())
    }

    /// イメージ参照からフライト定義を生成
    pub fn flight(&self, image: impl Into<String>) -> FlightSpec {
        FlightSpec {
            name: self.flight_name.clone(),
            image: image.into(),
            minimum: self.minimum,
            maximum: self.maximum,
        }
    }

    /// イメージ参照からフォーメーション定義を生成
    pub fn formation(&self, image: impl Into<String>) -> FormationSpec {
        FormationSpec {
            name: self.formation_name.clone(),
            flights: vec![self.flight(image)],
        }
    }
}

/// API エンドポイントの上書き設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    pub identity: Option<String>,
    pub compute: Option<String>,
}

/// フォーメーション内の1ワークロード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSpec {
    pub name: String,
    pub image: String,
    pub minimum: u32,
    pub maximum: u32,
}

/// フォーメーション定義
///
/// シリアライズ時は `{"flights": [...]}` のみを出力する。
/// 名前は URL パスに使われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSpec {
    #[serde(skip)]
    pub name: String,
    pub flights: Vec<FlightSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeployConfig {
        DeployConfig::new("demoapp", "web", "secret-key")
    }

    #[test]
    fn test_formation_payload() {
        let formation = sample().formation("registry.example/demoapp:latest");
        let json = serde_json::to_string(&formation).unwrap();
        assert_eq!(
            json,
            r#"{"flights":[{"name":"web","image":"registry.example/demoapp:latest","minimum":1,"maximum":1}]}"#
        );
        assert_eq!(formation.name, "demoapp");
    }

    #[test]
    fn test_custom_replicas() {
        let flight = sample().with_replicas(2, 5).flight("nginx:alpine");
        assert_eq!(flight.minimum, 2);
        assert_eq!(flight.maximum, 5);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_checks_flight_name() {
        let config = DeployConfig::new("demoapp", "web--1", "key");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("flight"));
    }

    #[test]
    fn test_validate_missing_api_key() {
        let config = DeployConfig::new("demoapp", "web", "  ");
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_credentials(),
            Err(FlowError::MissingField("api_key"))
        ));
        assert!(sample().validate_credentials().is_ok());
    }

    #[test]
    fn test_validate_replica_bounds() {
        assert!(sample().with_replicas(3, 2).validate().is_err());
        assert!(sample().with_replicas(0, 0).validate().is_err());
        assert!(sample().with_replicas(0, 1).validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", sample());
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
