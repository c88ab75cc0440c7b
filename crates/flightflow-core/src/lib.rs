//! FlightFlow Core
//!
//! flight.kdl の読み込みと検証、Seaplane に送るフォーメーション定義の組み立てを行います。

pub mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod validate;

pub use discovery::{CONFIG_PATH_ENV, PROJECT_DIR, find_config_file, get_config_dir};
pub use error::{FlowError, Result};
pub use loader::{API_KEY_ENV, LoadedConfig, load_config, load_config_from};
pub use model::{
    DEFAULT_REPLICAS, DeployConfig, EndpointConfig, FlightConfig, FlightSpec, FormationSpec,
};
pub use parser::{parse_kdl_file, parse_kdl_string};
pub use validate::{MAX_NAME_LEN, validate_flight_name, validate_formation_name};
