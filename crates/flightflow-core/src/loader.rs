//! 設定ローダー
//!
//! ファイル発見 → KDLパース → 環境変数による補完 → 検証 を一括で行う。

use crate::discovery::find_config_file;
use crate::error::{FlowError, Result};
use crate::model::FlightConfig;
use crate::parser::parse_kdl_file;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// api_key が設定ファイルにない場合に参照する環境変数
pub const API_KEY_ENV: &str = "SEAPLANE_API_KEY";

/// 読み込み済みの設定
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// 読み込んだファイル
    pub path: PathBuf,
    pub config: FlightConfig,
}

/// 設定ファイルを探して読み込む
pub fn load_config() -> Result<LoadedConfig> {
    let path = find_config_file()?;
    load_config_from(path)
}

/// 指定したファイルから設定を読み込む
pub fn load_config_from(path: impl AsRef<Path>) -> Result<LoadedConfig> {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "Loading config");

    let mut config = parse_kdl_file(&path).map_err(|e| match e {
        FlowError::Io(io) => FlowError::ConfigFileError {
            path: path.clone(),
            message: io.to_string(),
        },
        other => other,
    })?;

    apply_env_overrides(&mut config);
    config.deploy.validate()?;

    info!(
        formation = %config.deploy.formation_name,
        flight = %config.deploy.flight_name,
        "Loaded deploy config"
    );

    Ok(LoadedConfig { path, config })
}

/// 環境変数で未設定の値を補完
fn apply_env_overrides(config: &mut FlightConfig) {
    if config.deploy.api_key.is_empty()
        && let Ok(key) = std::env::var(API_KEY_ENV)
    {
        debug!("Using api_key from {}", API_KEY_ENV);
        config.deploy.api_key = key;
    }
}
