//! Character creation data: classes, factions, races, skills, birthsigns and
//! body parts.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::read_name;
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `CLAS` `CLDT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ClassData {
    pub attributes: [i32; 2],
    /// 0 combat, 1 magic, 2 stealth.
    pub specialization: i32,
    /// Minor and major skill pairs.
    pub skills: [[i32; 2]; 5],
    /// 1 playable.
    pub flags: i32,
    /// Services offered by members of the class.
    pub auto_calc: i32,
}

/// `CLAS`
#[derive(Debug, Clone, Default)]
pub struct ClassRecord {
    pub id: String,
    pub name: Option<String>,
    pub data: Option<ClassData>,
    pub description: Option<String>,
}

impl ClassRecord {
    /// Check if the class can be chosen by the player.
    pub fn is_playable(&self) -> bool {
        self.data.map(|d| d.flags & 1 != 0).unwrap_or(false)
    }
}

impl RecordBody for ClassRecord {
    const KIND: RecordKind = RecordKind::Class;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"CLDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"DESC", |r, s| {
            r.description = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Class);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Requirements for one faction rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct FactionRank {
    pub attributes: [i32; 2],
    pub primary_skill: i32,
    pub favored_skill: i32,
    pub reputation: i32,
}

/// `FACT` `FADT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct FactionData {
    pub attributes: [i32; 2],
    pub ranks: [FactionRank; 10],
    /// Favored skills; unused slots hold -1.
    pub skills: [i32; 7],
    /// 1 hidden from player.
    pub flags: i32,
}

/// A faction's standing toward another faction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactionReaction {
    pub faction: String,
    pub reaction: i32,
}

/// `FACT`
#[derive(Debug, Clone, Default)]
pub struct FactionRecord {
    pub id: String,
    pub name: Option<String>,
    pub rank_names: Vec<String>,
    pub data: Option<FactionData>,
    pub reactions: Vec<FactionReaction>,
}

impl RecordBody for FactionRecord {
    const KIND: RecordKind = RecordKind::Faction;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"RNAM", |r, s| {
            r.rank_names.push(s.read_zstring());
            Ok(())
        }),
        Field::new(b"FADT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ANAM", |r, s| {
            r.reactions.push(FactionReaction {
                faction: s.read_zstring(),
                reaction: 0,
            });
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            let reaction = s.read_i32()?;
            if let Some(last) = r.reactions.last_mut() {
                last.reaction = reaction;
            }
            Ok(())
        }),
    ];

    record_data!(Faction);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `RACE` `RADT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RaceData {
    /// Skill and bonus pairs; unused slots hold skill -1.
    pub skill_bonuses: [[i32; 2]; 7],
    /// Male and female base value per attribute.
    pub attributes: [[i32; 2]; 8],
    pub height: [f32; 2],
    pub weight: [f32; 2],
    /// 1 playable, 2 beast race.
    pub flags: i32,
}

/// `RACE`
#[derive(Debug, Clone, Default)]
pub struct RaceRecord {
    pub id: String,
    pub name: Option<String>,
    pub data: Option<RaceData>,
    /// Racial spells and powers.
    pub spells: Vec<String>,
    pub description: Option<String>,
}

impl RaceRecord {
    /// Check if the race uses beast body parts.
    pub fn is_beast(&self) -> bool {
        self.data.map(|d| d.flags & 2 != 0).unwrap_or(false)
    }
}

impl RecordBody for RaceRecord {
    const KIND: RecordKind = RecordKind::Race;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"RADT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"NPCS", |r, s| {
            r.spells.push(s.read_zstring());
            Ok(())
        }),
        Field::new(b"DESC", |r, s| {
            r.description = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Race);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `SKIL` `SKDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct SkillData {
    pub attribute: i32,
    pub specialization: i32,
    /// Experience gained per use action.
    pub use_values: [f32; 4],
}

/// `SKIL`: skills are identified by their fixed index, not a name.
#[derive(Debug, Clone, Default)]
pub struct SkillRecord {
    pub index: i32,
    pub data: Option<SkillData>,
    pub description: Option<String>,
}

impl RecordBody for SkillRecord {
    const KIND: RecordKind = RecordKind::Skill;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"INDX", |r, s| {
            r.index = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"SKDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"DESC", |r, s| {
            r.description = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Skill);
}

/// `BSGN`
#[derive(Debug, Clone, Default)]
pub struct BirthsignRecord {
    pub id: String,
    pub name: Option<String>,
    pub texture: Option<String>,
    pub description: Option<String>,
    pub spells: Vec<String>,
}

impl RecordBody for BirthsignRecord {
    const KIND: RecordKind = RecordKind::Birthsign;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"TNAM", |r, s| {
            r.texture = read_name(s);
            Ok(())
        }),
        Field::new(b"DESC", |r, s| {
            r.description = read_name(s);
            Ok(())
        }),
        Field::new(b"NPCS", |r, s| {
            r.spells.push(s.read_zstring());
            Ok(())
        }),
    ];

    record_data!(Birthsign);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `BODY` `BYDT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BodyPartData {
    /// Mesh slot: head, hair, neck, chest...
    pub part: u8,
    pub vampire: u8,
    /// 1 female, 2 not playable.
    pub flags: u8,
    /// 0 skin, 1 clothing, 2 armor.
    pub part_type: u8,
}

/// `BODY`
#[derive(Debug, Clone, Default)]
pub struct BodyPartRecord {
    pub id: String,
    pub model: Option<String>,
    /// Race the part belongs to.
    pub race: Option<String>,
    pub data: Option<BodyPartData>,
}

impl RecordBody for BodyPartRecord {
    const KIND: RecordKind = RecordKind::BodyPart;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"MODL", |r, s| {
            r.model = read_name(s);
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.race = read_name(s);
            Ok(())
        }),
        Field::new(b"BYDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
    ];

    record_data!(BodyPart);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
