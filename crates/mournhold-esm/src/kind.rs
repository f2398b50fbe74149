//! Record kinds and the tag registry.
//!
//! The registry maps each four-character record tag to its kind, a display
//! name, and the decoder for its payload. Tags not in the registry are
//! recognized as unsupported and skipped by the loader.

use std::fmt;

use mournhold_common::Tag;

use crate::field::{decode_record, field_tags, DecodeFn};
use crate::records::*;

/// Every record kind the loader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RecordKind {
    /// `TES3` file header.
    Tes3,
    /// `GMST` game setting.
    GameSetting,
    /// `GLOB` global variable.
    Global,
    /// `CLAS` character class.
    Class,
    /// `FACT` faction.
    Faction,
    /// `RACE` playable or creature race.
    Race,
    /// `SOUN` sound.
    Sound,
    /// `SKIL` skill.
    Skill,
    /// `MGEF` magic effect.
    MagicEffect,
    /// `SCPT` script.
    Script,
    /// `REGN` region.
    Region,
    /// `BSGN` birthsign.
    Birthsign,
    /// `LTEX` land texture.
    LandTexture,
    /// `STAT` static object.
    Static,
    /// `DOOR` door.
    Door,
    /// `MISC` miscellaneous item.
    MiscItem,
    /// `WEAP` weapon.
    Weapon,
    /// `CONT` container.
    Container,
    /// `SPEL` spell.
    Spell,
    /// `CREA` creature.
    Creature,
    /// `BODY` body part.
    BodyPart,
    /// `LIGH` light.
    Light,
    /// `ENCH` enchantment.
    Enchantment,
    /// `NPC_` non-player character.
    Npc,
    /// `ARMO` armor.
    Armor,
    /// `CLOT` clothing.
    Clothing,
    /// `REPA` repair tool.
    RepairTool,
    /// `ACTI` activator.
    Activator,
    /// `APPA` alchemy apparatus.
    Apparatus,
    /// `LOCK` lockpick.
    Lockpick,
    /// `PROB` probe.
    Probe,
    /// `INGR` ingredient.
    Ingredient,
    /// `BOOK` book or scroll.
    Book,
    /// `ALCH` potion.
    Potion,
    /// `LEVI` leveled item list.
    LeveledItem,
    /// `LEVC` leveled creature list.
    LeveledCreature,
    /// `CELL` interior or exterior cell.
    Cell,
    /// `LAND` landscape.
    Land,
    /// `PGRD` path grid.
    PathGrid,
    /// `SNDG` sound generator.
    SoundGenerator,
    /// `DIAL` dialogue topic.
    Dialogue,
    /// `INFO` dialogue response.
    DialogueInfo,
}

/// A registry entry.
pub(crate) struct Registration {
    pub kind: RecordKind,
    pub tag: Tag,
    pub name: &'static str,
    pub decode: DecodeFn,
    pub subrecord_tags: fn() -> Vec<Tag>,
}

impl Registration {
    const fn of<R: crate::field::RecordBody>(kind: RecordKind, tag: &[u8; 4], name: &'static str) -> Self {
        Self {
            kind,
            tag: Tag::new(tag),
            name,
            decode: decode_record::<R>,
            subrecord_tags: field_tags::<R>,
        }
    }
}

/// Registry in `RecordKind` discriminant order.
static REGISTRY: [Registration; RecordKind::COUNT] = [
    Registration::of::<Tes3Record>(RecordKind::Tes3, b"TES3", "File Header"),
    Registration::of::<GameSettingRecord>(RecordKind::GameSetting, b"GMST", "Game Setting"),
    Registration::of::<GlobalRecord>(RecordKind::Global, b"GLOB", "Global Variable"),
    Registration::of::<ClassRecord>(RecordKind::Class, b"CLAS", "Class"),
    Registration::of::<FactionRecord>(RecordKind::Faction, b"FACT", "Faction"),
    Registration::of::<RaceRecord>(RecordKind::Race, b"RACE", "Race"),
    Registration::of::<SoundRecord>(RecordKind::Sound, b"SOUN", "Sound"),
    Registration::of::<SkillRecord>(RecordKind::Skill, b"SKIL", "Skill"),
    Registration::of::<MagicEffectRecord>(RecordKind::MagicEffect, b"MGEF", "Magic Effect"),
    Registration::of::<ScriptRecord>(RecordKind::Script, b"SCPT", "Script"),
    Registration::of::<RegionRecord>(RecordKind::Region, b"REGN", "Region"),
    Registration::of::<BirthsignRecord>(RecordKind::Birthsign, b"BSGN", "Birthsign"),
    Registration::of::<LandTextureRecord>(RecordKind::LandTexture, b"LTEX", "Land Texture"),
    Registration::of::<StaticRecord>(RecordKind::Static, b"STAT", "Static"),
    Registration::of::<DoorRecord>(RecordKind::Door, b"DOOR", "Door"),
    Registration::of::<MiscItemRecord>(RecordKind::MiscItem, b"MISC", "Misc Item"),
    Registration::of::<WeaponRecord>(RecordKind::Weapon, b"WEAP", "Weapon"),
    Registration::of::<ContainerRecord>(RecordKind::Container, b"CONT", "Container"),
    Registration::of::<SpellRecord>(RecordKind::Spell, b"SPEL", "Spell"),
    Registration::of::<CreatureRecord>(RecordKind::Creature, b"CREA", "Creature"),
    Registration::of::<BodyPartRecord>(RecordKind::BodyPart, b"BODY", "Body Part"),
    Registration::of::<LightRecord>(RecordKind::Light, b"LIGH", "Light"),
    Registration::of::<EnchantmentRecord>(RecordKind::Enchantment, b"ENCH", "Enchantment"),
    Registration::of::<NpcRecord>(RecordKind::Npc, b"NPC_", "NPC"),
    Registration::of::<ArmorRecord>(RecordKind::Armor, b"ARMO", "Armor"),
    Registration::of::<ClothingRecord>(RecordKind::Clothing, b"CLOT", "Clothing"),
    Registration::of::<RepairToolRecord>(RecordKind::RepairTool, b"REPA", "Repair Tool"),
    Registration::of::<ActivatorRecord>(RecordKind::Activator, b"ACTI", "Activator"),
    Registration::of::<ApparatusRecord>(RecordKind::Apparatus, b"APPA", "Apparatus"),
    Registration::of::<LockpickRecord>(RecordKind::Lockpick, b"LOCK", "Lockpick"),
    Registration::of::<ProbeRecord>(RecordKind::Probe, b"PROB", "Probe"),
    Registration::of::<IngredientRecord>(RecordKind::Ingredient, b"INGR", "Ingredient"),
    Registration::of::<BookRecord>(RecordKind::Book, b"BOOK", "Book"),
    Registration::of::<PotionRecord>(RecordKind::Potion, b"ALCH", "Potion"),
    Registration::of::<LeveledItemRecord>(RecordKind::LeveledItem, b"LEVI", "Leveled Item"),
    Registration::of::<LeveledCreatureRecord>(RecordKind::LeveledCreature, b"LEVC", "Leveled Creature"),
    Registration::of::<CellRecord>(RecordKind::Cell, b"CELL", "Cell"),
    Registration::of::<LandRecord>(RecordKind::Land, b"LAND", "Land"),
    Registration::of::<PathGridRecord>(RecordKind::PathGrid, b"PGRD", "Path Grid"),
    Registration::of::<SoundGeneratorRecord>(RecordKind::SoundGenerator, b"SNDG", "Sound Generator"),
    Registration::of::<DialogueRecord>(RecordKind::Dialogue, b"DIAL", "Dialogue Topic"),
    Registration::of::<DialogueInfoRecord>(RecordKind::DialogueInfo, b"INFO", "Dialogue Response"),
];

impl RecordKind {
    /// Number of record kinds.
    pub const COUNT: usize = 42;

    /// Every record kind, in registry order.
    pub const ALL: [RecordKind; Self::COUNT] = [
        Self::Tes3,
        Self::GameSetting,
        Self::Global,
        Self::Class,
        Self::Faction,
        Self::Race,
        Self::Sound,
        Self::Skill,
        Self::MagicEffect,
        Self::Script,
        Self::Region,
        Self::Birthsign,
        Self::LandTexture,
        Self::Static,
        Self::Door,
        Self::MiscItem,
        Self::Weapon,
        Self::Container,
        Self::Spell,
        Self::Creature,
        Self::BodyPart,
        Self::Light,
        Self::Enchantment,
        Self::Npc,
        Self::Armor,
        Self::Clothing,
        Self::RepairTool,
        Self::Activator,
        Self::Apparatus,
        Self::Lockpick,
        Self::Probe,
        Self::Ingredient,
        Self::Book,
        Self::Potion,
        Self::LeveledItem,
        Self::LeveledCreature,
        Self::Cell,
        Self::Land,
        Self::PathGrid,
        Self::SoundGenerator,
        Self::Dialogue,
        Self::DialogueInfo,
    ];

    /// Resolve a record tag to its kind.
    ///
    /// Returns `None` for tags with no registered decoder.
    pub fn from_tag(tag: Tag) -> Option<Self> {
        REGISTRY.iter().find(|r| r.tag == tag).map(|r| r.kind)
    }

    #[inline]
    fn registration(self) -> &'static Registration {
        &REGISTRY[self as usize]
    }

    /// Get the record tag for this kind.
    pub fn tag(self) -> Tag {
        self.registration().tag
    }

    /// Get a human-readable name.
    pub fn name(self) -> &'static str {
        self.registration().name
    }

    /// Get the sub-record tags this kind decodes, in table order.
    pub fn subrecord_tags(self) -> Vec<Tag> {
        (self.registration().subrecord_tags)()
    }

    /// Check if records of this kind are indexed by grid coordinate.
    pub fn is_grid_indexed(self) -> bool {
        matches!(self, Self::Cell | Self::Land)
    }

    pub(crate) fn decoder(self) -> DecodeFn {
        self.registration().decode
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
