use super::run_cancellable;
use crate::reporter::TerminalReporter;
use colored::Colorize;
use flightflow_cloud::{DeploymentRecord, LockOperation, StateManager};
use flightflow_cloud_seaplane::{PlatformOptions, SeaplanePlatform};
use flightflow_core::LoadedConfig;
use std::path::Path;

pub async fn handle(
    loaded: &LoadedConfig,
    options: PlatformOptions,
    project_root: &Path,
    formation: Option<String>,
    yes: bool,
) -> anyhow::Result<()> {
    let deploy = &loaded.config.deploy;
    let formation = formation.unwrap_or_else(|| deploy.formation_name.clone());

    let state = StateManager::new(project_root);
    let record = match state.load().await?.get_record(&formation) {
        Some(record) => record.clone(),
        None => {
            // 記録がない場合はフォーメーション名だけで削除する
            tracing::info!(%formation, "No stored record, using formation name");
            DeploymentRecord::legacy(&formation)
        }
    };

    println!("{}", "Removing formation from Seaplane".blue().bold());
    println!("  Formation: {}", formation.cyan());
    if record.has_url() {
        println!("  URL:       {}", record.url);
    }

    if !yes {
        println!();
        println!(
            "{}",
            "Warning: the formation and all of its flights will be deleted.".yellow()
        );
        println!("Run again with --yes to destroy");
        return Ok(());
    }

    println!();
    let lock = state
        .acquire_lock(LockOperation::Destroy, &record.name)
        .await?;
    let platform = SeaplanePlatform::new(deploy.clone(), options)?;
    let reporter = TerminalReporter;

    // 失敗した場合は記録を残して再実行できるようにする
    let report = run_cancellable(platform.destroy(&record, &reporter)).await??;

    let mut file = state.load().await?;
    if file.remove_record(&record.name).is_some() {
        state.save(&file).await?;
    }
    lock.release().await?;

    println!();
    println!("{} {}", "✓".green().bold(), report.message);

    Ok(())
}
