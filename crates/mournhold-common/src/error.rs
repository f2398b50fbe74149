//! Error types for mournhold-common.

use thiserror::Error;

/// Common error type for Mournhold operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A read needed more bytes than the source has left.
    #[error("unexpected end of stream at offset {position}: needed {needed} bytes but only {available} available")]
    UnexpectedEndOfStream {
        needed: usize,
        available: usize,
        position: usize,
    },

    /// A value could not be laid over the bytes read for it.
    #[error("cannot decode {type_name} from {len} bytes")]
    InvalidLayout { type_name: &'static str, len: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
