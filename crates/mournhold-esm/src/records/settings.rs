//! Game settings and global variables.

use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// The typed value of a game setting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GameSettingValue {
    /// No value sub-record was present.
    #[default]
    None,
    /// `STRV`
    String(String),
    /// `INTV`
    Integer(i32),
    /// `FLTV`
    Float(f32),
}

/// `GMST`: an engine tunable.
#[derive(Debug, Clone, Default)]
pub struct GameSettingRecord {
    pub id: String,
    pub value: GameSettingValue,
}

impl RecordBody for GameSettingRecord {
    const KIND: RecordKind = RecordKind::GameSetting;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"STRV", |r, s| {
            r.value = GameSettingValue::String(s.read_zstring());
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            r.value = GameSettingValue::Integer(s.read_i32()?);
            Ok(())
        }),
        Field::new(b"FLTV", |r, s| {
            r.value = GameSettingValue::Float(s.read_f32()?);
            Ok(())
        }),
    ];

    record_data!(GameSetting);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `GLOB`: a script-visible global variable.
#[derive(Debug, Clone, Default)]
pub struct GlobalRecord {
    pub id: String,
    /// `s`hort, `l`ong or `f`loat.
    pub value_type: u8,
    /// Globals are always stored as floats regardless of their type.
    pub value: f32,
}

impl RecordBody for GlobalRecord {
    const KIND: RecordKind = RecordKind::Global;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.value_type = s.read_u8()?;
            Ok(())
        }),
        Field::new(b"FLTV", |r, s| {
            r.value = s.read_f32()?;
            Ok(())
        }),
    ];

    record_data!(Global);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
