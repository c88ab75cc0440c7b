mod commands;
mod reporter;

use clap::{Parser, Subcommand};
use commands::EndpointOverrides;

#[derive(Parser)]
#[command(name = "flight")]
#[command(about = "コンテナイメージを Seaplane のフォーメーションとしてデプロイ", long_about = None)]
struct Cli {
    /// Identity API のベースURL（テスト用）
    #[arg(long, global = true, env = "SEAPLANE_IDENTITY_URL", hide = true)]
    identity_url: Option<String>,
    /// Compute API のベースURL（テスト用）
    #[arg(long, global = true, env = "SEAPLANE_COMPUTE_URL", hide = true)]
    compute_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// イメージをデプロイ
    Deploy {
        /// デプロイするコンテナイメージ
        #[arg(short, long)]
        image: String,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// フォーメーションを削除
    Destroy {
        /// フォーメーション名（省略時は設定ファイルの formation_name）
        #[arg(short, long)]
        formation: Option<String>,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// デプロイ状態を表示
    Status {
        /// フォーメーション名（省略時は設定ファイルの formation_name）
        #[arg(short, long)]
        formation: Option<String>,
    },
    /// 設定を検証し、送信されるフォーメーション定義を表示
    Validate {
        /// 表示に使うイメージ
        #[arg(short, long)]
        image: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ（RUST_LOG 未指定時は warn）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let overrides = EndpointOverrides {
        identity: cli.identity_url,
        compute: cli.compute_url,
    };

    match cli.command {
        Commands::Version => {
            println!("flightflow {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Validate { ref image } => {
            commands::validate::handle(image.as_deref(), &overrides);
            return Ok(());
        }
        _ => {}
    }

    let loaded = flightflow_core::load_config()?;
    let project_root = std::env::current_dir()?;
    let options = commands::platform_options(&loaded.config, &overrides);

    match cli.command {
        Commands::Deploy { image, yes } => {
            commands::deploy::handle(&loaded, options, &project_root, &image, yes).await?;
        }
        Commands::Destroy { formation, yes } => {
            commands::destroy::handle(&loaded, options, &project_root, formation, yes).await?;
        }
        Commands::Status { formation } => {
            commands::status::handle(&loaded, &project_root, formation).await?;
        }
        Commands::Validate { .. } => {
            unreachable!("Validate is handled before config loading");
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }

    Ok(())
}
