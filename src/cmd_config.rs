//! `stylesheet` and `check-config` subcommand handlers.

use autolabel_config::{Config, ConfigValidator, ValidationResult};
use autolabel_core::stylesheet::overlay_css;

/// Print the overlay CSS for the active configuration.
pub(crate) fn print_stylesheet(config: &Config) -> anyhow::Result<()> {
    print!("{}", overlay_css(&config.overlay));
    Ok(())
}

/// Validate the configuration, printing every error and warning.
pub(crate) fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config);
    println!("{}", describe(&result));

    if !result.is_valid() {
        anyhow::bail!("configuration has {} error(s)", result.errors.len());
    }
    Ok(())
}

fn describe(result: &ValidationResult) -> String {
    let mut lines = vec![];
    for error in &result.errors {
        lines.push(format!("error:   {}: {}", error.path, error.message));
    }
    for warning in &result.warnings {
        lines.push(format!("warning: {}: {}", warning.path, warning.message));
    }
    if lines.is_empty() {
        lines.push("Configuration OK".to_string());
    }
    lines.join("\n")
}
