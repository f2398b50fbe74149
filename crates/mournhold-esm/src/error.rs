//! Error types for ESM loading.

use mournhold_common::Tag;
use thiserror::Error;

use crate::{GridCoord, RecordKind};

/// Errors that abort loading an ESM file.
///
/// Every variant is fatal: no partially loaded container is returned.
/// Recoverable conditions are reported as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (reading past the end of the stream).
    #[error("{0}")]
    Common(#[from] mournhold_common::Error),

    /// The stream ended inside a record header.
    #[error("truncated file: {remaining} trailing bytes at offset {offset} are too short for a record header")]
    TruncatedFile { offset: usize, remaining: usize },

    /// A record header declared a negative payload size.
    #[error("{tag} record at offset {offset} declares invalid size {size}")]
    InvalidRecordSize { tag: Tag, offset: usize, size: i32 },

    /// A sub-record header declared a negative payload size.
    #[error("{subrecord} sub-record of {record} at offset {offset} declares invalid size {size}")]
    InvalidSubRecordSize {
        record: Tag,
        subrecord: Tag,
        offset: usize,
        size: i32,
    },

    /// A record decoder did not consume exactly its declared payload.
    #[error("failed reading {tag} record at offset {offset}: declared {expected} bytes, consumed {actual}")]
    RecordSizeMismatch {
        tag: Tag,
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// A field decoder left bytes of its sub-record unread.
    #[error("{subrecord} sub-record of {record} at offset {offset}: declared {expected} bytes, consumed {actual}")]
    SubRecordSizeMismatch {
        record: Tag,
        subrecord: Tag,
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// A field decoder failed on its sub-record's bytes.
    #[error("failed decoding {subrecord} sub-record of {record} at offset {offset}: {source}")]
    InvalidField {
        record: Tag,
        subrecord: Tag,
        offset: usize,
        #[source]
        source: mournhold_common::Error,
    },

    /// An identifier was defined twice in one file (strict mode only).
    #[error("duplicate identifier {id:?} ({kind}) at offset {offset}, first defined at offset {first_offset}")]
    DuplicateIdentifier {
        id: String,
        kind: RecordKind,
        offset: usize,
        first_offset: usize,
    },

    /// A grid coordinate was occupied twice in one file (strict mode only).
    #[error("duplicate {kind} at {coord}, offset {offset}, first defined at offset {first_offset}")]
    DuplicateCoordinate {
        coord: GridCoord,
        kind: RecordKind,
        offset: usize,
        first_offset: usize,
    },
}

/// Result type for ESM operations.
pub type Result<T> = std::result::Result<T, Error>;
