//! Configuration file scaffolding.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Write a default configuration to `path`.
///
/// Refuses to replace an existing file unless `force` is set.
#[allow(clippy::result_large_err)]
pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: format!("{} already exists; pass --force to overwrite", path.display()),
        }
        .into());
    }

    Config::write_default(path)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::success(&format!("Wrote {}", path.display()));
    output::note("Enable [element] or [telegram] and fill in credentials, or export");
    output::note("ELEMENT_ACCESS_TOKEN / TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.");
    Ok(())
}
