use super::run_cancellable;
use crate::reporter::TerminalReporter;
use colored::Colorize;
use flightflow_cloud::{LockOperation, StateManager};
use flightflow_cloud_seaplane::{PlatformOptions, SeaplanePlatform};
use flightflow_core::LoadedConfig;
use std::path::Path;

pub async fn handle(
    loaded: &LoadedConfig,
    options: PlatformOptions,
    project_root: &Path,
    image: &str,
    yes: bool,
) -> anyhow::Result<()> {
    let deploy = &loaded.config.deploy;

    println!("{}", "Deploying to Seaplane".blue().bold());
    println!("Config: {}", loaded.path.display().to_string().cyan());
    println!();
    println!("  Formation: {}", deploy.formation_name.cyan());
    println!("  Flight:    {}", deploy.flight_name.cyan());
    println!("  Image:     {}", image.cyan());
    println!("  Replicas:  {}..{}", deploy.minimum, deploy.maximum);
    println!("  Compute:   {}", options.endpoints.compute);

    // 確認（--yesが指定されていない場合）
    if !yes {
        println!();
        println!("Run again with --yes to deploy");
        return Ok(());
    }

    println!();
    let state = StateManager::new(project_root);
    let lock = state
        .acquire_lock(LockOperation::Deploy, &deploy.formation_name)
        .await?;

    let platform = SeaplanePlatform::new(deploy.clone(), options)?;
    let reporter = TerminalReporter;
    let record = run_cancellable(platform.deploy(image, &reporter)).await??;

    if !record.deployed {
        lock.release().await?;
        anyhow::bail!("formation {} was not deployed", record.name);
    }

    // 成功したデプロイのみ記録する
    let mut file = state.load().await?;
    file.set_record(record.clone());
    state.save(&file).await?;
    lock.release().await?;

    println!();
    println!("{}", "✓ Deployment complete".green().bold());
    if record.has_url() {
        println!("  URL: {}", record.url.cyan());
    }

    Ok(())
}
