//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are rendered against the file contents with a
//! label on the offending span. Every other error gets a one-line help hint
//! where one is useful.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tradebell::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// Any other command failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tradebell::command))]
pub struct CommandDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl From<&Error> for CommandDiagnostic {
    fn from(err: &Error) -> Self {
        Self {
            message: err.to_string(),
            help: help_for(err).map(str::to_string),
        }
    }
}

fn help_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Config(ConfigError::ReadFile(_)) => {
            Some("run `tradebell init` to create a configuration file")
        }
        Error::Config(ConfigError::NoMessengerEnabled) => Some(
            "enable [element] or [telegram], set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID, or pass --dry-run",
        ),
        Error::Config(ConfigError::MissingField { .. }) => {
            Some("credentials can also come from environment variables or a .env file")
        }
        Error::DeliveryFailed { .. } => Some("check the warnings above for each messenger"),
        _ => None,
    }
}

/// Convert a crate error into a renderable report.
#[must_use]
pub fn report(err: Error) -> Report {
    Report::new(CommandDiagnostic::from(&err))
}

/// Render a configuration load error against the file it came from.
///
/// Parse errors get a labelled span; anything else falls back to
/// [`report`].
#[must_use]
pub fn config_report(path: &Path, content: &str, err: Error) -> Report {
    let Error::Config(ConfigError::Parse(parse)) = &err else {
        return report(err);
    };

    let span = parse
        .span()
        .map(|range| SourceSpan::from((range.start, range.end - range.start)));

    Report::new(ConfigDiagnostic {
        message: format!("invalid configuration: {}", parse.message()),
        src: NamedSource::new(path.display().to_string(), content.to_string()),
        span,
        help: Some("see `tradebell init` for a complete example".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_error_carries_span() {
        let content = "[events]\nprofit_threshold = \"high\"\n";
        let err = Config::parse(content).unwrap_err();
        let report = config_report(Path::new("config.toml"), content, err);

        let diagnostic = report.downcast_ref::<ConfigDiagnostic>().unwrap();
        assert!(diagnostic.span.is_some());
        assert!(diagnostic.message.starts_with("invalid configuration"));
    }

    #[test]
    fn test_missing_messenger_has_help() {
        let diagnostic = CommandDiagnostic::from(&Error::from(ConfigError::NoMessengerEnabled));
        assert!(diagnostic.help.unwrap().contains("--dry-run"));
    }
}
