//! Compiled scripts.

use mournhold_common::{text, BinaryReader};

use super::read_name;
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `SCHD`: script name and local variable counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptHeader {
    pub name: String,
    pub short_count: u32,
    pub long_count: u32,
    pub float_count: u32,
    /// Size of the compiled bytecode in `SCDT`.
    pub data_size: u32,
    /// Size of the local variable names in `SCVR`.
    pub local_var_size: u32,
}

impl ScriptHeader {
    /// Encoded size of `SCHD`.
    pub const SIZE: usize = 52;

    fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        Ok(Self {
            name: s.read_fixed_string(32)?,
            short_count: s.read_u32()?,
            long_count: s.read_u32()?,
            float_count: s.read_u32()?,
            data_size: s.read_u32()?,
            local_var_size: s.read_u32()?,
        })
    }
}

/// `SCPT`: a script with its source and bytecode.
///
/// The identifier comes from the `SCHD` header rather than a `NAME`
/// sub-record.
#[derive(Debug, Clone, Default)]
pub struct ScriptRecord {
    pub header: Option<ScriptHeader>,
    /// Local variable names, shorts then longs then floats.
    pub variables: Vec<String>,
    /// Compiled bytecode.
    pub bytecode: Vec<u8>,
    pub source: Option<String>,
}

impl RecordBody for ScriptRecord {
    const KIND: RecordKind = RecordKind::Script;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"SCHD", |r, s| {
            r.header = Some(ScriptHeader::read(s)?);
            Ok(())
        }),
        Field::new(b"SCVR", |r, s| {
            r.variables = s
                .read_remaining()
                .split(|&b| b == 0)
                .filter(|name| !name.is_empty())
                .map(text::decode)
                .collect();
            Ok(())
        }),
        Field::new(b"SCDT", |r, s| {
            r.bytecode = s.read_remaining().to_vec();
            Ok(())
        }),
        Field::new(b"SCTX", |r, s| {
            r.source = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Script);

    fn id(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.name.as_str())
    }
}
