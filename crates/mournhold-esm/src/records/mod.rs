//! Record bodies, one per record kind.
//!
//! Each body lists its sub-records in a [`Field`](crate::Field) table. Fixed
//! binary sub-records are read straight into `#[repr(C, packed)]` structs;
//! strings are decoded from Windows-1252 into owned `String`s.

use mournhold_common::BinaryReader;
use zerocopy::FromBytes;

/// Implement the `RecordData` conversions of a `RecordBody`.
macro_rules! record_data {
    ($variant:ident) => {
        fn into_data(self) -> $crate::RecordData {
            $crate::RecordData::$variant(self)
        }

        fn from_data(data: &$crate::RecordData) -> Option<&Self> {
            match data {
                $crate::RecordData::$variant(body) => Some(body),
                _ => None,
            }
        }
    };
}

mod actors;
mod audio;
mod character;
mod common;
mod dialogue;
mod file;
mod items;
mod magic;
mod objects;
mod script;
mod settings;
mod world;

pub use actors::{
    AiPackage, CreatureData, CreatureRecord, LeveledCreatureRecord, LeveledEntry,
    LeveledItemRecord, NpcData, NpcFlags, NpcRecord, NpcStats, NpcStatsAutoCalc,
};
pub use audio::{SoundData, SoundGeneratorRecord, SoundRecord};
pub use character::{
    BirthsignRecord, BodyPartData, BodyPartRecord, ClassData, ClassRecord, FactionData,
    FactionRank, FactionReaction, FactionRecord, RaceData, RaceRecord, SkillData, SkillRecord,
};
pub use common::{
    AiData, AiWander, BodyPartSlot, Effect, InventoryItem, Placement, TravelDestination,
};
pub use dialogue::{
    DialogueInfoData, DialogueInfoRecord, DialogueKind, DialogueRecord, InfoCondition,
    InfoConditionValue,
};
pub use file::{FileHeader, Master, Tes3Record};
pub use items::{
    ApparatusData, ApparatusRecord, ArmorData, ArmorRecord, BookData, BookRecord, ClothingData,
    ClothingRecord, IngredientData, IngredientRecord, LightData, LightRecord, LockpickRecord,
    MiscItemData, MiscItemRecord, PotionData, PotionRecord, ProbeRecord, RepairToolData,
    RepairToolRecord, ToolData, WeaponData, WeaponRecord,
};
pub use magic::{
    EnchantmentData, EnchantmentRecord, MagicEffectData, MagicEffectRecord, SpellData, SpellRecord,
};
pub use objects::{ActivatorRecord, ContainerRecord, DoorRecord, StaticRecord};
pub use script::{ScriptHeader, ScriptRecord};
pub use settings::{GameSettingRecord, GameSettingValue, GlobalRecord};
pub use world::{
    AmbientLight, CellData, CellFlags, CellRecord, CellReference, Heightmap, LandRecord,
    LandTextureRecord, PathGridData, PathGridPoint, PathGridRecord, RegionRecord, RegionSound,
    WeatherChances, LAND_SIZE,
};

/// Read fixed-size elements until the sub-record is exhausted.
pub(crate) fn read_array<T: FromBytes>(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Vec<T>> {
    let mut items = Vec::with_capacity(s.remaining() / std::mem::size_of::<T>().max(1));
    while !s.is_empty() {
        items.push(s.read_struct()?);
    }
    Ok(items)
}

/// Read a string sub-record into an optional field.
#[inline]
pub(crate) fn read_name(s: &mut BinaryReader<'_>) -> Option<String> {
    Some(s.read_zstring())
}
