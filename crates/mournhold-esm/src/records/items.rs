//! Inventory items.
//!
//! Every item kind shares the `NAME`/`MODL`/`FNAM`/`ITEX`/`SCRI` sub-records
//! and carries one fixed-layout stats sub-record of its own.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{read_name, BodyPartSlot, Effect};
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `MISC` `MCDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct MiscItemData {
    pub weight: f32,
    pub value: i32,
    pub unknown: i32,
}

/// `WEAP` `WPDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct WeaponData {
    pub weight: f32,
    pub value: i32,
    pub weapon_type: i16,
    pub health: i16,
    pub speed: f32,
    pub reach: f32,
    pub enchant_points: i16,
    /// Minimum and maximum damage per attack type.
    pub chop: [u8; 2],
    pub slash: [u8; 2],
    pub thrust: [u8; 2],
    pub flags: i32,
}

/// `ARMO` `AODT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ArmorData {
    pub armor_type: i32,
    pub weight: f32,
    pub value: i32,
    pub health: i32,
    pub enchant_points: i32,
    pub rating: i32,
}

/// `CLOT` `CTDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ClothingData {
    pub clothing_type: i32,
    pub weight: f32,
    pub value: i16,
    pub enchant_points: i16,
}

/// `REPA` `RIDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RepairToolData {
    pub weight: f32,
    pub value: i32,
    pub uses: i32,
    pub quality: f32,
}

/// `APPA` `AADT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ApparatusData {
    /// 0 mortar and pestle, 1 alembic, 2 calcinator, 3 retort.
    pub apparatus_type: i32,
    pub quality: f32,
    pub weight: f32,
    pub value: i32,
}

/// `LOCK` `LKDT` and `PROB` `PBDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ToolData {
    pub weight: f32,
    pub value: i32,
    pub quality: f32,
    pub uses: i32,
}

/// `INGR` `IRDT`. Unused effect slots hold -1.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct IngredientData {
    pub weight: f32,
    pub value: i32,
    pub effects: [i32; 4],
    pub skills: [i32; 4],
    pub attributes: [i32; 4],
}

/// `BOOK` `BKDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BookData {
    pub weight: f32,
    pub value: i32,
    pub scroll: i32,
    /// Skill taught on first read, or -1.
    pub skill: i32,
    pub enchant_points: i32,
}

/// `ALCH` `ALDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct PotionData {
    pub weight: f32,
    pub value: i32,
    pub auto_calc: i32,
}

/// `LIGH` `LHDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct LightData {
    pub weight: f32,
    pub value: i32,
    /// Burn time in seconds; -1 burns forever.
    pub time: i32,
    pub radius: i32,
    /// RGBA.
    pub color: [u8; 4],
    pub flags: i32,
}

/// `MISC`
#[derive(Debug, Clone, Default)]
pub struct MiscItemRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<MiscItemData>,
    pub icon: Option<String>,
    pub enchantment: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for MiscItemRecord {
    const KIND: RecordKind = RecordKind::MiscItem;
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
        Field::new(b"MCDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.enchantment = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(MiscItem);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `WEAP`
#[derive(Debug, Clone, Default)]
pub struct WeaponRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<WeaponData>,
    pub icon: Option<String>,
    pub enchantment: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for WeaponRecord {
    const KIND: RecordKind = RecordKind::Weapon;
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
        Field::new(b"WPDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.enchantment = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Weapon);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `ARMO`
#[derive(Debug, Clone, Default)]
pub struct ArmorRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<ArmorData>,
    pub icon: Option<String>,
    /// Body parts covered when worn.
    pub parts: Vec<BodyPartSlot>,
    pub enchantment: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for ArmorRecord {
    const KIND: RecordKind = RecordKind::Armor;
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
        Field::new(b"AODT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"INDX", |r, s| {
            r.parts.push(BodyPartSlot {
                index: s.read_u8()?,
                ..Default::default()
            });
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            if let Some(slot) = r.parts.last_mut() {
                slot.male = read_name(s);
            } else {
                s.read_remaining();
            }
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            if let Some(slot) = r.parts.last_mut() {
                slot.female = read_name(s);
            } else {
                s.read_remaining();
            }
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.enchantment = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Armor);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `CLOT`
#[derive(Debug, Clone, Default)]
pub struct ClothingRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<ClothingData>,
    pub icon: Option<String>,
    pub parts: Vec<BodyPartSlot>,
    pub enchantment: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for ClothingRecord {
    const KIND: RecordKind = RecordKind::Clothing;
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
        Field::new(b"CTDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"INDX", |r, s| {
            r.parts.push(BodyPartSlot {
                index: s.read_u8()?,
                ..Default::default()
            });
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            if let Some(slot) = r.parts.last_mut() {
                slot.male = read_name(s);
            } else {
                s.read_remaining();
            }
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            if let Some(slot) = r.parts.last_mut() {
                slot.female = read_name(s);
            } else {
                s.read_remaining();
            }
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.enchantment = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Clothing);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `REPA`: repair hammers and prongs.
#[derive(Debug, Clone, Default)]
pub struct RepairToolRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<RepairToolData>,
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for RepairToolRecord {
    const KIND: RecordKind = RecordKind::RepairTool;
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
        Field::new(b"RIDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(RepairTool);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `APPA`: alchemy apparatus.
#[derive(Debug, Clone, Default)]
pub struct ApparatusRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<ApparatusData>,
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for ApparatusRecord {
    const KIND: RecordKind = RecordKind::Apparatus;
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
        Field::new(b"AADT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Apparatus);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `LOCK`
#[derive(Debug, Clone, Default)]
pub struct LockpickRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<ToolData>,
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for LockpickRecord {
    const KIND: RecordKind = RecordKind::Lockpick;
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
        Field::new(b"LKDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Lockpick);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `PROB`
#[derive(Debug, Clone, Default)]
pub struct ProbeRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<ToolData>,
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for ProbeRecord {
    const KIND: RecordKind = RecordKind::Probe;
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
        Field::new(b"PBDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Probe);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `INGR`
#[derive(Debug, Clone, Default)]
pub struct IngredientRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<IngredientData>,
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for IngredientRecord {
    const KIND: RecordKind = RecordKind::Ingredient;
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
        Field::new(b"IRDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Ingredient);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `BOOK`: books and scrolls, with their page text.
#[derive(Debug, Clone, Default)]
pub struct BookRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<BookData>,
    pub icon: Option<String>,
    pub enchantment: Option<String>,
    /// HTML-ish page markup.
    pub text: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for BookRecord {
    const KIND: RecordKind = RecordKind::Book;
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
        Field::new(b"BKDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.enchantment = read_name(s);
            Ok(())
        }),
        Field::new(b"TEXT", |r, s| {
            r.text = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Book);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `ALCH`
#[derive(Debug, Clone, Default)]
pub struct PotionRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<PotionData>,
    pub effects: Vec<Effect>,
    /// Icon path, stored under `TEXT` for this kind.
    pub icon: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for PotionRecord {
    const KIND: RecordKind = RecordKind::Potion;
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
        Field::new(b"ALDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.effects.push(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"TEXT", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Potion);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `LIGH`: light sources, carried or fixed.
#[derive(Debug, Clone, Default)]
pub struct LightRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub data: Option<LightData>,
    pub icon: Option<String>,
    pub sound: Option<String>,
    pub script: Option<String>,
}

impl LightRecord {
    /// `LHDT` flag: can be picked up.
    pub const CAN_CARRY: i32 = 0x0002;
}

impl RecordBody for LightRecord {
    const KIND: RecordKind = RecordKind::Light;
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
        Field::new(b"LHDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"SNAM", |r, s| {
            r.sound = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Light);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<MiscItemData>(), 12);
        assert_eq!(std::mem::size_of::<WeaponData>(), 32);
        assert_eq!(std::mem::size_of::<ArmorData>(), 24);
        assert_eq!(std::mem::size_of::<ClothingData>(), 12);
        assert_eq!(std::mem::size_of::<RepairToolData>(), 16);
        assert_eq!(std::mem::size_of::<ApparatusData>(), 16);
        assert_eq!(std::mem::size_of::<ToolData>(), 16);
        assert_eq!(std::mem::size_of::<IngredientData>(), 56);
        assert_eq!(std::mem::size_of::<BookData>(), 20);
        assert_eq!(std::mem::size_of::<PotionData>(), 12);
        assert_eq!(std::mem::size_of::<LightData>(), 24);
    }
}
