//! `TES3` file header record.

use mournhold_common::BinaryReader;

use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// The `HEDR` sub-record.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Format version, 1.2 or 1.3 for shipped content.
    pub version: f32,
    /// 0 plugin, 1 master, 32 save game.
    pub file_type: u32,
    pub author: String,
    pub description: String,
    /// Number of records following the header.
    pub record_count: u32,
}

impl FileHeader {
    /// Encoded size of `HEDR`.
    pub const SIZE: usize = 300;

    fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        Ok(Self {
            version: s.read_f32()?,
            file_type: s.read_u32()?,
            author: s.read_fixed_string(32)?,
            description: s.read_fixed_string(256)?,
            record_count: s.read_u32()?,
        })
    }

    /// Check if this is a master (`.esm`) file.
    pub fn is_master(&self) -> bool {
        self.file_type == 1
    }
}

/// A `MAST` dependency and the size recorded for it in `DATA`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Master {
    pub name: String,
    pub size: u64,
}

/// `TES3`: the first record of every file.
#[derive(Debug, Clone, Default)]
pub struct Tes3Record {
    pub header: Option<FileHeader>,
    pub masters: Vec<Master>,
}

impl RecordBody for Tes3Record {
    const KIND: RecordKind = RecordKind::Tes3;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"HEDR", |r, s| {
            r.header = Some(FileHeader::read(s)?);
            Ok(())
        }),
        Field::new(b"MAST", |r, s| {
            r.masters.push(Master {
                name: s.read_zstring(),
                size: 0,
            });
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            let size = s.read_u64()?;
            if let Some(master) = r.masters.last_mut() {
                master.size = size;
            }
            Ok(())
        }),
    ];

    record_data!(Tes3);
}
