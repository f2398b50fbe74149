//! Record and sub-record headers.

use mournhold_common::Tag;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// The fixed 16-byte header in front of every record.
///
/// The tag is not validated here; unrecognized tags are resolved by the
/// record factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RecordHeader {
    /// Record type code.
    pub tag: Tag,
    /// Payload size in bytes, excluding this header.
    pub data_size: i32,
    /// Unused word.
    pub header1: u32,
    /// Record flags, see [`RecordFlags`].
    pub flags: u32,
}

impl RecordHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 16;

    /// Create a header.
    pub fn new(tag: Tag, data_size: i32, flags: RecordFlags) -> Self {
        Self {
            tag,
            data_size,
            header1: 0,
            flags: flags.bits(),
        }
    }

    /// Get the record flags.
    pub fn flags(&self) -> RecordFlags {
        RecordFlags(self.flags)
    }

    /// Get the declared payload size, rejecting negative values.
    pub fn payload_size(&self, offset: usize) -> Result<usize> {
        let size = self.data_size;
        usize::try_from(size).map_err(|_| Error::InvalidRecordSize {
            tag: self.tag,
            offset,
            size,
        })
    }
}

/// Record header flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RecordFlags(pub u32);

impl RecordFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// The record is marked deleted.
    pub const DELETED: Self = Self(0x0020);
    /// References to the record stay loaded.
    pub const PERSISTENT: Self = Self(0x0400);
    /// References start disabled.
    pub const INITIALLY_DISABLED: Self = Self(0x0800);
    /// The record is blocked from being changed by later files.
    pub const BLOCKED: Self = Self(0x2000);

    /// Get the raw bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Check if every bit of `other` is set.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for RecordFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The 8-byte header in front of every sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct SubRecordHeader {
    /// Sub-record type code.
    pub tag: Tag,
    /// Payload size in bytes, excluding this header.
    pub data_size: i32,
}

impl SubRecordHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    /// Get the declared payload size, rejecting negative values.
    pub fn payload_size(&self, record: Tag, offset: usize) -> Result<usize> {
        let size = self.data_size;
        usize::try_from(size).map_err(|_| Error::InvalidSubRecordSize {
            record,
            subrecord: self.tag,
            offset,
            size,
        })
    }
}
