//! Check command implementation.
//!
//! Resolves the configuration exactly as `dev` would, without binding or
//! watching anything, and reports the result.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use tandem_config::EffectiveConfig;

/// Execute the check command.
///
/// # Errors
///
/// Returns the first configuration error the resolver reports.
pub fn execute(args: CheckArgs) -> Result<()> {
    let root = utils::project_root(&args.config)?;
    if !args.json {
        ui::info(&format!("Checking configuration in {}", root.display()));
    }

    let config = utils::load_config(&root, &args.config)?;
    let effective = utils::resolve_config(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    for line in summary(&effective) {
        ui::info(&line);
    }
    ui::success("Configuration is valid!");
    Ok(())
}

/// Human-readable lines describing an effective configuration.
fn summary(config: &EffectiveConfig) -> Vec<String> {
    let binding = &config.binding;
    let mut lines = vec![format!(
        "Server: {} ({})",
        binding.address(),
        if binding.strict { "strict" } else { "fallback allowed" }
    )];

    let candidates = binding.candidate_ports();
    if !candidates.is_empty() {
        let ports: Vec<String> = candidates.iter().map(u16::to_string).collect();
        lines.push(format!("Fallback ports: {}", ports.join(", ")));
    }

    if config.watch.is_empty() {
        lines.push("Watch exclusions: none".to_string());
    } else {
        let patterns: Vec<&str> = config.watch.patterns().map(|p| p.as_str()).collect();
        lines.push(format!("Watch exclusions: {}", patterns.join(", ")));
    }

    if !config.plugins.is_empty() {
        lines.push(format!("Plugins: {}", config.plugins.names().join(", ")));
    }

    for companion in &config.companions {
        lines.push(format!(
            "Companion build `{}` at {} (excluded from watching)",
            companion.name,
            companion.dir.display()
        ));
    }

    lines
}
