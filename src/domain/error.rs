//! Errors raised while decoding event payloads.

use thiserror::Error;

/// The payload does not have the shape a handler expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Neither a field map nor the expected typed record.
    #[error("cannot extract {expected} from data")]
    Malformed {
        /// Name of the record the handler asked for.
        expected: &'static str,
    },
}
