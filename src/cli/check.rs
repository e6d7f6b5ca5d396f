//! Configuration check.

use std::path::Path;

use crate::adapter::messenger::build_messengers;
use crate::cli::diagnostic::{config_report, report};
use crate::cli::output;
use crate::config::Config;
use crate::error::ConfigError;

/// Validate configuration at `path` and build its messengers without
/// sending anything.
///
/// # Errors
///
/// Returns a diagnostic if the file cannot be read, parsed or validated, or
/// if no messenger can be built.
pub fn execute(path: &Path) -> miette::Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(|e| report(ConfigError::ReadFile(e).into()))?;
    let mut config = Config::parse(&content).map_err(|e| config_report(path, &content, e))?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate().map_err(report)?;

    output::section("Events");
    let events = &config.events;
    output::field("trade_execution", output::toggle(events.trade_execution));
    output::field("order_filled", output::toggle(events.order_filled));
    output::field("position_change", output::toggle(events.position_change));
    output::field("pnl_update", output::toggle(events.pnl_update));
    output::field("stop_loss", output::toggle(events.stop_loss));
    output::field("take_profit", output::toggle(events.take_profit));
    output::field("system_errors", output::toggle(events.system_errors));
    output::field("strategy_errors", output::toggle(events.strategy_errors));
    output::field("profit_threshold", format!("{}%", events.profit_threshold));

    output::section("Messengers");
    let messengers = build_messengers(&config).map_err(report)?;
    for messenger in &messengers {
        output::success(&format!("{} ready", messenger.name()));
    }

    println!();
    output::success("Configuration is valid");
    Ok(())
}
