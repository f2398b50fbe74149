//! Magic effects, spells and enchantments.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{read_name, Effect};
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `MGEF` `MEDT`.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct MagicEffectData {
    pub school: i32,
    pub base_cost: f32,
    pub flags: i32,
    /// RGB.
    pub color: [i32; 3],
    pub speed: f32,
    pub size: f32,
    pub size_cap: f32,
}

/// `MGEF`: a magic effect, identified by its fixed index.
#[derive(Debug, Clone, Default)]
pub struct MagicEffectRecord {
    pub index: i32,
    pub data: Option<MagicEffectData>,
    pub icon: Option<String>,
    pub particle_texture: Option<String>,
    pub casting_visual: Option<String>,
    pub bolt_visual: Option<String>,
    pub hit_visual: Option<String>,
    pub area_visual: Option<String>,
    pub cast_sound: Option<String>,
    pub bolt_sound: Option<String>,
    pub hit_sound: Option<String>,
    pub area_sound: Option<String>,
    pub description: Option<String>,
}

impl RecordBody for MagicEffectRecord {
    const KIND: RecordKind = RecordKind::MagicEffect;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"INDX", |r, s| {
            r.index = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"MEDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ITEX", |r, s| {
            r.icon = read_name(s);
            Ok(())
        }),
        Field::new(b"PTEX", |r, s| {
            r.particle_texture = read_name(s);
            Ok(())
        }),
        Field::new(b"CVFX", |r, s| {
            r.casting_visual = read_name(s);
            Ok(())
        }),
        Field::new(b"BVFX", |r, s| {
            r.bolt_visual = read_name(s);
            Ok(())
        }),
        Field::new(b"HVFX", |r, s| {
            r.hit_visual = read_name(s);
            Ok(())
        }),
        Field::new(b"AVFX", |r, s| {
            r.area_visual = read_name(s);
            Ok(())
        }),
        Field::new(b"CSND", |r, s| {
            r.cast_sound = read_name(s);
            Ok(())
        }),
        Field::new(b"BSND", |r, s| {
            r.bolt_sound = read_name(s);
            Ok(())
        }),
        Field::new(b"HSND", |r, s| {
            r.hit_sound = read_name(s);
            Ok(())
        }),
        Field::new(b"ASND", |r, s| {
            r.area_sound = read_name(s);
            Ok(())
        }),
        Field::new(b"DESC", |r, s| {
            r.description = read_name(s);
            Ok(())
        }),
    ];

    record_data!(MagicEffect);
}

/// `SPEL` `SPDT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct SpellData {
    /// 0 spell, 1 ability, 2 blight, 3 disease, 4 curse, 5 power.
    pub spell_type: i32,
    pub cost: i32,
    pub flags: i32,
}

/// `SPEL`
#[derive(Debug, Clone, Default)]
pub struct SpellRecord {
    pub id: String,
    pub name: Option<String>,
    pub data: Option<SpellData>,
    pub effects: Vec<Effect>,
}

impl RecordBody for SpellRecord {
    const KIND: RecordKind = RecordKind::Spell;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"SPDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.effects.push(s.read_struct()?);
            Ok(())
        }),
    ];

    record_data!(Spell);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `ENCH` `ENDT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EnchantmentData {
    /// 0 cast once, 1 on strike, 2 when used, 3 constant effect.
    pub enchant_type: i32,
    pub cost: i32,
    pub charge: i32,
    pub auto_calc: i32,
}

/// `ENCH`
#[derive(Debug, Clone, Default)]
pub struct EnchantmentRecord {
    pub id: String,
    pub data: Option<EnchantmentData>,
    pub effects: Vec<Effect>,
}

impl RecordBody for EnchantmentRecord {
    const KIND: RecordKind = RecordKind::Enchantment;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"ENDT", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"ENAM", |r, s| {
            r.effects.push(s.read_struct()?);
            Ok(())
        }),
    ];

    record_data!(Enchantment);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
