use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("{field}: {message}")]
    InvalidName {
        field: &'static str,
        message: String,
    },

    #[error("{0} が設定されていません")]
    MissingField(&'static str),

    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: flight.local.kdl, .flight.local.kdl, flight.kdl, .flight.kdl\n\
        - ./.flightflow/ ディレクトリ\n\
        - ~/.config/flightflow/flight.kdl\n\
        または FLIGHT_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("設定ファイルの読み込みに失敗しました: {path}\n理由: {message}")]
    ConfigFileError { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, FlowError>;
