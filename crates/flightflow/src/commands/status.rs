use crate::reporter::{TerminalReporter, health_label};
use colored::Colorize;
use flightflow_cloud::StateManager;
use flightflow_cloud_seaplane::SeaplanePlatform;
use flightflow_core::LoadedConfig;
use std::path::Path;

pub async fn handle(
    loaded: &LoadedConfig,
    project_root: &Path,
    formation: Option<String>,
) -> anyhow::Result<()> {
    let deploy = &loaded.config.deploy;
    let formation = formation.unwrap_or_else(|| deploy.formation_name.clone());

    let state = StateManager::new(project_root);
    let file = state.load().await?;
    let record = file
        .get_record(&formation)
        .ok_or_else(|| anyhow::anyhow!("No deployment recorded for formation {}", formation))?;

    // ローカルの記録だけで判定するため API キーは不要
    let report = SeaplanePlatform::status(record, &TerminalReporter).await?;

    println!("Formation: {}", record.name.cyan());
    println!("Health:    {}", health_label(report.health));
    println!("Message:   {}", report.message);
    if record.has_url() {
        println!("URL:       {}", record.url.cyan());
    }
    println!(
        "Checked:   {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}
