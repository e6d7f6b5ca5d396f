//! One-off message delivery.

use std::sync::Arc;

use chrono::Local;
use futures_util::future::join_all;

use crate::adapter::messenger::{build_messengers, LogMessenger};
use crate::app::stamp;
use crate::cli::{load_config, output, SendArgs};
use crate::error::{Error, Result};
use crate::port::SharedMessenger;

/// Send `args.text` to every configured messenger and report each result.
///
/// Unlike the service, this waits for every delivery.
pub async fn execute(args: &SendArgs) -> Result<()> {
    let config = load_config(&args.config.path(), args.dry_run)?;
    config.init_logging();

    let messengers: Vec<SharedMessenger> = if args.dry_run {
        vec![Arc::new(LogMessenger::new())]
    } else {
        build_messengers(&config)?
    };

    let text = stamp(&args.text, Local::now());
    let results = join_all(
        messengers
            .iter()
            .map(|messenger| messenger.send_message(&text)),
    )
    .await;

    let mut failed = 0;
    for (messenger, result) in messengers.iter().zip(results) {
        match result {
            Ok(()) => output::success(&format!("Sent via {}", messenger.name())),
            Err(e) => {
                failed += 1;
                output::error(&format!("{}: {e}", messenger.name()));
            }
        }
    }

    if failed > 0 {
        return Err(Error::DeliveryFailed {
            failed,
            total: messengers.len(),
        });
    }
    Ok(())
}
