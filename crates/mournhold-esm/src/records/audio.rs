//! Sounds and sound generators.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::read_name;
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `SOUN` `DATA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct SoundData {
    pub volume: u8,
    pub min_range: u8,
    pub max_range: u8,
}

/// `SOUN`: a sound file with playback range.
#[derive(Debug, Clone, Default)]
pub struct SoundRecord {
    pub id: String,
    pub file: Option<String>,
    pub data: Option<SoundData>,
}

impl RecordBody for SoundRecord {
    const KIND: RecordKind = RecordKind::Sound;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.file = read_name(s);
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
    ];

    record_data!(Sound);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `SNDG`: binds a sound to a creature event (footstep, moan, roar...).
#[derive(Debug, Clone, Default)]
pub struct SoundGeneratorRecord {
    pub id: String,
    /// Event type, 0 left foot through 7 land.
    pub kind: i32,
    pub creature: Option<String>,
    pub sound: Option<String>,
}

impl RecordBody for SoundGeneratorRecord {
    const KIND: RecordKind = RecordKind::SoundGenerator;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.kind = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            r.creature = read_name(s);
            Ok(())
        }),
        Field::new(b"SNAM", |r, s| {
            r.sound = read_name(s);
            Ok(())
        }),
    ];

    record_data!(SoundGenerator);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
