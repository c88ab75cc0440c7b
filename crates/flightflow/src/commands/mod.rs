pub mod deploy;
pub mod destroy;
pub mod status;
pub mod validate;

use colored::Colorize;
use flightflow_cloud_seaplane::PlatformOptions;
use flightflow_core::FlightConfig;
use std::future::Future;

/// コマンドラインから与えられたエンドポイントの上書き
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    pub identity: Option<String>,
    pub compute: Option<String>,
}

/// 設定ファイルとコマンドラインの上書きから接続オプションを組み立てる
pub fn platform_options(config: &FlightConfig, overrides: &EndpointOverrides) -> PlatformOptions {
    let mut options = PlatformOptions::from_config(config);
    if let Some(identity) = &overrides.identity {
        options.endpoints.identity = identity.clone();
    }
    if let Some(compute) = &overrides.compute {
        options.endpoints.compute = compute.clone();
    }
    options
}

/// Ctrl-C で中断できるように実行する
///
/// 中断された場合、実行中のリクエストは future ごと破棄される。
pub async fn run_cancellable<F, T>(operation: F) -> anyhow::Result<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        result = operation => Ok(result),
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            eprintln!("{}", "✗ Cancelled".red().bold());
            anyhow::bail!("operation cancelled by user")
        }
    }
}
