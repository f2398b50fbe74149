//! Non-fatal conditions found while loading.

use std::fmt;

use mournhold_common::Tag;

use crate::{GridCoord, RecordKind};

/// A recoverable condition found while loading or indexing.
///
/// Diagnostics never stop a load. The bytes involved were skipped using
/// their declared size, so the rest of the stream stays aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A record tag with no registered decoder; its payload was skipped.
    UnrecognizedRecordTag { tag: Tag, offset: usize, size: usize },

    /// A sub-record tag the enclosing record kind does not understand.
    UnrecognizedSubRecordTag {
        record: Tag,
        subrecord: Tag,
        offset: usize,
        size: usize,
    },

    /// An identifier defined a second time within one file. The first
    /// definition stays indexed.
    DuplicateIdentifier {
        id: String,
        kind: RecordKind,
        offset: usize,
        first_offset: usize,
    },

    /// A grid coordinate occupied a second time within one file. The first
    /// record stays indexed.
    DuplicateCoordinate {
        coord: GridCoord,
        kind: RecordKind,
        offset: usize,
        first_offset: usize,
    },
}

impl Diagnostic {
    /// Stream offset the diagnostic refers to.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnrecognizedRecordTag { offset, .. }
            | Self::UnrecognizedSubRecordTag { offset, .. }
            | Self::DuplicateIdentifier { offset, .. }
            | Self::DuplicateCoordinate { offset, .. } => *offset,
        }
    }

    /// Check if this is a duplicate-key diagnostic.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIdentifier { .. } | Self::DuplicateCoordinate { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedRecordTag { tag, offset, size } => {
                write!(f, "unsupported record type {} at offset {} ({} bytes skipped)", tag, offset, size)
            }
            Self::UnrecognizedSubRecordTag {
                record,
                subrecord,
                offset,
                size,
            } => write!(
                f,
                "unsupported sub-record {} in {} at offset {} ({} bytes skipped)",
                subrecord, record, offset, size
            ),
            Self::DuplicateIdentifier {
                id,
                kind,
                offset,
                first_offset,
            } => write!(
                f,
                "duplicate identifier {:?} ({}) at offset {}, keeping the one at offset {}",
                id, kind, offset, first_offset
            ),
            Self::DuplicateCoordinate {
                coord,
                kind,
                offset,
                first_offset,
            } => write!(
                f,
                "duplicate {} at {} (offset {}), keeping the one at offset {}",
                kind, coord, offset, first_offset
            ),
        }
    }
}
