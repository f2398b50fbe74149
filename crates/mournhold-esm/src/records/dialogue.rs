//! Dialogue topics and their responses.
//!
//! `INFO` records belong to the `DIAL` record immediately before them in the
//! stream; neither is indexed by identifier.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::read_name;
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// What a dialogue topic is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueKind {
    #[default]
    Topic,
    Voice,
    Greeting,
    Persuasion,
    Journal,
    Unknown(u8),
}

impl From<u8> for DialogueKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Topic,
            1 => Self::Voice,
            2 => Self::Greeting,
            3 => Self::Persuasion,
            4 => Self::Journal,
            other => Self::Unknown(other),
        }
    }
}

/// `DIAL`
#[derive(Debug, Clone, Default)]
pub struct DialogueRecord {
    pub name: String,
    pub kind: DialogueKind,
}

impl RecordBody for DialogueRecord {
    const KIND: RecordKind = RecordKind::Dialogue;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.name = s.read_zstring();
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            // 1 byte, or 4 in some plugins
            r.kind = DialogueKind::from(s.read_u8()?);
            s.read_remaining();
            Ok(())
        }),
    ];

    record_data!(Dialogue);
}

/// `INFO` `DATA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DialogueInfoData {
    pub unknown1: i32,
    /// Minimum disposition, or the journal index for journal entries.
    pub disposition: i32,
    /// Required speaker rank.
    pub rank: i8,
    /// -1 any, 0 male, 1 female.
    pub gender: i8,
    pub player_rank: i8,
    pub unknown2: i8,
}

/// The comparison value of a response condition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InfoConditionValue {
    #[default]
    None,
    Integer(i32),
    Float(f32),
}

/// An `SCVR` filter with the value that follows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoCondition {
    /// Encoded slot, function, comparison and variable name.
    pub function: String,
    pub value: InfoConditionValue,
}

/// `INFO`: one response to a dialogue topic.
#[derive(Debug, Clone, Default)]
pub struct DialogueInfoRecord {
    pub info_id: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub data: Option<DialogueInfoData>,
    pub actor: Option<String>,
    pub race: Option<String>,
    pub class: Option<String>,
    pub faction: Option<String>,
    pub cell: Option<String>,
    pub player_faction: Option<String>,
    pub sound: Option<String>,
    pub response: Option<String>,
    pub conditions: Vec<InfoCondition>,
    pub result_script: Option<String>,
    pub quest_name: bool,
    pub quest_finished: bool,
    pub quest_restart: bool,
}

impl DialogueInfoRecord {
    fn set_condition_value(&mut self, value: InfoConditionValue) {
        if let Some(condition) = self.conditions.last_mut() {
            condition.value = value;
        }
    }
}

impl RecordBody for DialogueInfoRecord {
    const KIND: RecordKind = RecordKind::DialogueInfo;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"INAM", |r, s| {
            r.info_id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"PNAM", |r, s| {
            r.previous = read_name(s);
            Ok(())
        }),
        Field::new(b"NNAM", |r, s| {
            r.next = read_name(s);
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ONAM", |r, s| {
            r.actor = read_name(s);
            Ok(())
        }),
        Field::new(b"RNAM", |r, s| {
            r.race = read_name(s);
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            r.class = read_name(s);
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.faction = read_name(s);
            Ok(())
        }),
        Field::new(b"ANAM", |r, s| {
            r.cell = read_name(s);
            Ok(())
        }),
        Field::new(b"DNAM", |r, s| {
            r.player_faction = read_name(s);
            Ok(())
        }),
        Field::new(b"SNAM", |r, s| {
            r.sound = read_name(s);
            Ok(())
        }),
        Field::new(b"NAME", |r, s| {
            r.response = read_name(s);
            Ok(())
        }),
        Field::new(b"SCVR", |r, s| {
            r.conditions.push(InfoCondition {
                function: s.read_zstring(),
                value: InfoConditionValue::None,
            });
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            let value = s.read_i32()?;
            r.set_condition_value(InfoConditionValue::Integer(value));
            Ok(())
        }),
        Field::new(b"FLTV", |r, s| {
            let value = s.read_f32()?;
            r.set_condition_value(InfoConditionValue::Float(value));
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            r.result_script = read_name(s);
            Ok(())
        }),
        Field::new(b"QSTN", |r, s| {
            r.quest_name = s.read_u8()? != 0;
            Ok(())
        }),
        Field::new(b"QSTF", |r, s| {
            r.quest_finished = s.read_u8()? != 0;
            Ok(())
        }),
        Field::new(b"QSTR", |r, s| {
            r.quest_restart = s.read_u8()? != 0;
            Ok(())
        }),
    ];

    record_data!(DialogueInfo);
}
