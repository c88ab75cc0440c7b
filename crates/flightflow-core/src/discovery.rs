//! 設定ファイルの自動発見

use crate::error::{FlowError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "FLIGHT_CONFIG_PATH";

/// プロジェクトローカルの設定ディレクトリ名
pub const PROJECT_DIR: &str = ".flightflow";

const CANDIDATES: [&str; 4] = [
    "flight.local.kdl",
    ".flight.local.kdl",
    "flight.kdl",
    ".flight.kdl",
];

const GLOBAL_CONFIG: &str = "flight.kdl";

/// FlightFlowのグローバル設定ディレクトリ (~/.config/flightflow)
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(FlowError::ConfigDirNotFound)?
        .join("flightflow");

    Ok(config_dir)
}

/// 検索対象のパスを優先順に並べる
///
/// プロジェクト直下、`.flightflow/` の順に候補名を展開し、最後にグローバル設定を置く。
fn search_paths(project_root: &Path, global_dir: Option<&Path>) -> Vec<PathBuf> {
    let project_dirs = [project_root.to_path_buf(), project_root.join(PROJECT_DIR)];

    project_dirs
        .iter()
        .flat_map(|dir| CANDIDATES.iter().map(move |name| dir.join(name)))
        .chain(global_dir.map(|dir| dir.join(GLOBAL_CONFIG)))
        .collect()
}

/// flight.kdl を探す
///
/// `FLIGHT_CONFIG_PATH` が既存のファイルを指していればそれを使う。
/// それ以外は [`search_paths`] の順で最初に見つかったファイルを返す:
/// カレントディレクトリ、`./.flightflow/`、`~/.config/flightflow/flight.kdl`。
pub fn find_config_file() -> Result<PathBuf> {
    if let Some(config_path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            debug!(path = %path.display(), "Using config from {}", CONFIG_PATH_ENV);
            return Ok(path);
        }
        warn!(path = %path.display(), "{} does not point to a file, searching", CONFIG_PATH_ENV);
    }

    let current_dir = std::env::current_dir()?;
    let global_dir = get_config_dir().ok();

    search_paths(&current_dir, global_dir.as_deref())
        .into_iter()
        .find(|path| path.is_file())
        .ok_or(FlowError::ConfigFileNotFound)
}
