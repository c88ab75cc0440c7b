//! ターミナル向けの進捗表示

use colored::Colorize;
use flightflow_cloud::{Health, Reporter, StepStatus};

/// 進捗を標準出力に色付きで表示する
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn update(&self, message: &str) {
        println!("{}", format!("{}...", message).blue());
    }

    fn step(&self, status: StepStatus, message: &str) {
        match status {
            StepStatus::Ok => println!("  {} {}", "✓".green(), message),
            StepStatus::Warning => println!("  {} {}", "⚠".yellow(), message.yellow()),
            StepStatus::Error => eprintln!("  {} {}", "✗".red(), message.red()),
        }
    }

    fn health(&self, health: Health) {
        tracing::info!(%health, "Deployment health changed");
    }
}

/// ヘルス状態の表示用ラベル
pub fn health_label(health: Health) -> String {
    let label = health.to_string();
    match health {
        Health::Alive | Health::Ready => label.green().bold().to_string(),
        Health::Down => label.yellow().bold().to_string(),
        Health::Error => label.red().bold().to_string(),
        Health::Unknown => label.dimmed().to_string(),
    }
}
