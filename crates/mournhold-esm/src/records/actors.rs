//! Creatures, NPCs and leveled lists.

use mournhold_common::{BinaryReader, Error, Tag};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{read_name, AiData, AiWander, InventoryItem, TravelDestination};
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// An AI package not modelled field by field (`AI_T`, `AI_F`, `AI_E`, `AI_A`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPackage {
    pub tag: Tag,
    pub data: Vec<u8>,
    /// Cell named by a following `CNDT`, for escort and follow packages.
    pub cell: Option<String>,
}

impl AiPackage {
    fn read(tag: &[u8; 4], s: &mut BinaryReader<'_>) -> Self {
        Self {
            tag: Tag::new(tag),
            data: s.read_remaining().to_vec(),
            cell: None,
        }
    }
}

/// `CREA` `NPDT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CreatureData {
    /// 0 creature, 1 daedra, 2 undead, 3 humanoid.
    pub creature_type: i32,
    pub level: i32,
    pub attributes: [i32; 8],
    pub health: i32,
    pub magicka: i32,
    pub fatigue: i32,
    pub soul: i32,
    pub combat: i32,
    pub magic: i32,
    pub stealth: i32,
    /// Minimum and maximum damage of each attack.
    pub attacks: [[i32; 2]; 3],
    pub gold: i32,
}

/// `CREA`
#[derive(Debug, Clone, Default)]
pub struct CreatureRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<CreatureData>,
    pub flags: i32,
    pub script: Option<String>,
    pub inventory: Vec<InventoryItem>,
    pub spells: Vec<String>,
    pub ai: Option<AiData>,
    pub wander: Option<AiWander>,
    pub ai_packages: Vec<AiPackage>,
    pub scale: Option<f32>,
}

impl RecordBody for CreatureRecord {
    const KIND: RecordKind = RecordKind::Creature;
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
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"NPDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"FLAG", |r, s| {
            r.flags = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
        Field::new(b"NPCO", |r, s| {
            r.inventory.push(InventoryItem::read(s)?);
            Ok(())
        }),
        Field::new(b"NPCS", |r, s| {
            r.spells.push(s.read_zstring());
            Ok(())
        }),
        Field::new(b"AIDT", |r, s| {
            r.ai = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"AI_W", |r, s| {
            r.wander = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"AI_T", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_T", s));
            Ok(())
        }),
        Field::new(b"AI_F", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_F", s));
            Ok(())
        }),
        Field::new(b"AI_E", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_E", s));
            Ok(())
        }),
        Field::new(b"AI_A", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_A", s));
            Ok(())
        }),
        Field::new(b"CNDT", |r, s| {
            let cell = read_name(s);
            if let Some(package) = r.ai_packages.last_mut() {
                package.cell = cell;
            }
            Ok(())
        }),
        Field::new(b"XSCL", |r, s| {
            r.scale = Some(s.read_f32()?);
            Ok(())
        }),
    ];

    record_data!(Creature);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `NPC_` `FLAG` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NpcFlags(pub i32);

impl NpcFlags {
    pub const FEMALE: Self = Self(0x01);
    pub const ESSENTIAL: Self = Self(0x02);
    pub const RESPAWN: Self = Self(0x04);
    pub const AUTOCALC: Self = Self(0x10);

    /// Check if every bit of `other` is set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// The 52-byte `NPDT` of an NPC with explicit stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct NpcStats {
    pub level: i16,
    pub attributes: [u8; 8],
    pub skills: [u8; 27],
    pub unknown1: u8,
    pub health: u16,
    pub magicka: u16,
    pub fatigue: u16,
    pub disposition: u8,
    pub reputation: u8,
    pub rank: u8,
    pub unknown2: u8,
    pub gold: i32,
}

/// The 12-byte `NPDT` of an NPC whose stats the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct NpcStatsAutoCalc {
    pub level: i16,
    pub disposition: u8,
    pub reputation: u8,
    pub rank: u8,
    pub unknown: [u8; 3],
    pub gold: i32,
}

/// `NPC_` `NPDT`, in either of its two sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcData {
    Full(NpcStats),
    AutoCalc(NpcStatsAutoCalc),
}

impl NpcData {
    fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        match s.remaining() {
            52 => Ok(Self::Full(s.read_struct()?)),
            12 => Ok(Self::AutoCalc(s.read_struct()?)),
            len => Err(Error::InvalidLayout {
                type_name: "NpcData",
                len,
            }),
        }
    }

    /// Get the NPC's level.
    pub fn level(&self) -> i16 {
        match self {
            Self::Full(stats) => stats.level,
            Self::AutoCalc(stats) => stats.level,
        }
    }

    /// Get the NPC's carried gold.
    pub fn gold(&self) -> i32 {
        match self {
            Self::Full(stats) => stats.gold,
            Self::AutoCalc(stats) => stats.gold,
        }
    }
}

/// `NPC_`: a non-player character.
#[derive(Debug, Clone, Default)]
pub struct NpcRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub race: Option<String>,
    pub class: Option<String>,
    pub faction: Option<String>,
    /// Body part used as the head.
    pub head_model: Option<String>,
    /// Body part used as the hair.
    pub hair_model: Option<String>,
    pub script: Option<String>,
    pub data: Option<NpcData>,
    pub flags: NpcFlags,
    pub inventory: Vec<InventoryItem>,
    pub spells: Vec<String>,
    pub ai: Option<AiData>,
    pub wander: Option<AiWander>,
    pub ai_packages: Vec<AiPackage>,
    /// Travel service destinations.
    pub destinations: Vec<TravelDestination>,
    pub scale: Option<f32>,
}

impl NpcRecord {
    /// Check if the NPC is female.
    pub fn is_female(&self) -> bool {
        self.flags.contains(NpcFlags::FEMALE)
    }

    /// Check if killing the NPC breaks the main quest.
    pub fn is_essential(&self) -> bool {
        self.flags.contains(NpcFlags::ESSENTIAL)
    }
}

impl RecordBody for NpcRecord {
    const KIND: RecordKind = RecordKind::Npc;
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
            r.name = read_name(s);
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
        Field::new(b"ANAM", |r, s| {
            r.faction = read_name(s);
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            r.head_model = read_name(s);
            Ok(())
        }),
        Field::new(b"KNAM", |r, s| {
            r.hair_model = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
        Field::new(b"NPDT", |r, s| {
            r.data = Some(NpcData::read(s)?);
            Ok(())
        }),
        Field::new(b"FLAG", |r, s| {
            r.flags = NpcFlags(s.read_i32()?);
            Ok(())
        }),
        Field::new(b"NPCO", |r, s| {
            r.inventory.push(InventoryItem::read(s)?);
            Ok(())
        }),
        Field::new(b"NPCS", |r, s| {
            r.spells.push(s.read_zstring());
            Ok(())
        }),
        Field::new(b"AIDT", |r, s| {
            r.ai = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"AI_W", |r, s| {
            r.wander = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"AI_T", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_T", s));
            Ok(())
        }),
        Field::new(b"AI_F", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_F", s));
            Ok(())
        }),
        Field::new(b"AI_E", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_E", s));
            Ok(())
        }),
        Field::new(b"AI_A", |r, s| {
            r.ai_packages.push(AiPackage::read(b"AI_A", s));
            Ok(())
        }),
        Field::new(b"CNDT", |r, s| {
            let cell = read_name(s);
            if let Some(package) = r.ai_packages.last_mut() {
                package.cell = cell;
            }
            Ok(())
        }),
        Field::new(b"DODT", |r, s| {
            r.destinations.push(TravelDestination {
                placement: s.read_struct()?,
                cell: None,
            });
            Ok(())
        }),
        Field::new(b"DNAM", |r, s| {
            let cell = read_name(s);
            if let Some(destination) = r.destinations.last_mut() {
                destination.cell = cell;
            }
            Ok(())
        }),
        Field::new(b"XSCL", |r, s| {
            r.scale = Some(s.read_f32()?);
            Ok(())
        }),
    ];

    record_data!(Npc);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// One leveled list entry: an object and the minimum player level for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeveledEntry {
    pub id: String,
    pub level: i16,
}

/// `LEVI`: a leveled item list.
#[derive(Debug, Clone, Default)]
pub struct LeveledItemRecord {
    pub id: String,
    /// 1 calculate from all levels up to the player's, 2 for each item.
    pub flags: i32,
    /// Percent chance that nothing is produced.
    pub chance_none: u8,
    /// Entry count as declared by `INDX`.
    pub declared_count: i32,
    pub entries: Vec<LeveledEntry>,
}

impl RecordBody for LeveledItemRecord {
    const KIND: RecordKind = RecordKind::LeveledItem;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.flags = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"NNAM", |r, s| {
            r.chance_none = s.read_u8()?;
            Ok(())
        }),
        Field::new(b"INDX", |r, s| {
            r.declared_count = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"INAM", |r, s| {
            r.entries.push(LeveledEntry {
                id: s.read_zstring(),
                level: 0,
            });
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            let level = s.read_i16()?;
            if let Some(entry) = r.entries.last_mut() {
                entry.level = level;
            }
            Ok(())
        }),
    ];

    record_data!(LeveledItem);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `LEVC`: a leveled creature list.
#[derive(Debug, Clone, Default)]
pub struct LeveledCreatureRecord {
    pub id: String,
    pub flags: i32,
    pub chance_none: u8,
    pub declared_count: i32,
    pub entries: Vec<LeveledEntry>,
}

impl RecordBody for LeveledCreatureRecord {
    const KIND: RecordKind = RecordKind::LeveledCreature;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.flags = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"NNAM", |r, s| {
            r.chance_none = s.read_u8()?;
            Ok(())
        }),
        Field::new(b"INDX", |r, s| {
            r.declared_count = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            r.entries.push(LeveledEntry {
                id: s.read_zstring(),
                level: 0,
            });
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            let level = s.read_i16()?;
            if let Some(entry) = r.entries.last_mut() {
                entry.level = level;
            }
            Ok(())
        }),
    ];

    record_data!(LeveledCreature);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
