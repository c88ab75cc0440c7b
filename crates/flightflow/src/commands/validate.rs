use super::{EndpointOverrides, platform_options};
use colored::Colorize;

/// イメージ未指定時に表示するプレースホルダー
const IMAGE_PLACEHOLDER: &str = "<image>";

pub fn handle(image: Option<&str>, overrides: &EndpointOverrides) {
    println!("{}", "Validating config...".blue());

    let loaded = match flightflow_core::load_config().and_then(|loaded| {
        loaded.config.deploy.validate_credentials()?;
        Ok(loaded)
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Invalid config".red().bold());
            eprintln!("  {}", e);
            eprintln!();
            eprintln!("Run in a directory containing flight.kdl or set FLIGHT_CONFIG_PATH");
            std::process::exit(1);
        }
    };

    let deploy = &loaded.config.deploy;
    let options = platform_options(&loaded.config, overrides);
    let formation = deploy.formation(image.unwrap_or(IMAGE_PLACEHOLDER));

    println!("Config: {}", loaded.path.display().to_string().cyan());
    println!("{}", "✓ Config is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  Formation: {}", deploy.formation_name.cyan());
    println!("  Flight:    {}", deploy.flight_name.cyan());
    println!("  Replicas:  {}..{}", deploy.minimum, deploy.maximum);
    println!("  Identity:  {}", options.endpoints.identity);
    println!("  Compute:   {}", options.endpoints.compute);
    if let Some(timeout) = options.timeout {
        println!("  Timeout:   {}s", timeout.as_secs());
    }

    println!();
    println!("Formation payload:");
    match serde_json::to_string_pretty(&formation) {
        Ok(payload) => println!("{}", payload),
        Err(e) => eprintln!("  {} {}", "⚠".yellow(), e),
    }
}
