//! Byte-level builders for synthetic ESM buffers.

#![allow(dead_code)]

use mournhold_esm::{RecordFlags, RecordKind};

/// Builds one record: a 16-byte header followed by sub-records.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    tag: [u8; 4],
    flags: RecordFlags,
    payload: Vec<u8>,
}

impl RecordBuilder {
    pub fn new(tag: &[u8; 4]) -> Self {
        Self {
            tag: *tag,
            flags: RecordFlags::NONE,
            payload: Vec::new(),
        }
    }

    pub fn flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Append a sub-record with its 8-byte header.
    pub fn sub(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.payload.extend_from_slice(tag);
        self.payload
            .extend_from_slice(&(data.len() as i32).to_le_bytes());
        self.payload.extend_from_slice(data);
        self
    }

    /// Append a NUL-terminated string sub-record.
    pub fn string(self, tag: &[u8; 4], value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.sub(tag, &data)
    }

    pub fn i32(self, tag: &[u8; 4], value: i32) -> Self {
        self.sub(tag, &value.to_le_bytes())
    }

    pub fn u32(self, tag: &[u8; 4], value: u32) -> Self {
        self.sub(tag, &value.to_le_bytes())
    }

    pub fn f32(self, tag: &[u8; 4], value: f32) -> Self {
        self.sub(tag, &value.to_le_bytes())
    }

    /// Append bytes to the payload without a sub-record header.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.payload.extend_from_slice(bytes);
        self
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Encode with the true payload size.
    pub fn build(&self) -> Vec<u8> {
        self.build_with_size(self.payload.len() as i32)
    }

    /// Encode with an arbitrary declared payload size.
    pub fn build_with_size(&self, size: i32) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.payload.len());
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.flags.bits().to_le_bytes());
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Concatenate encoded records into a file buffer.
pub fn file(records: &[RecordBuilder]) -> Vec<u8> {
    records.iter().flat_map(RecordBuilder::build).collect()
}

/// Fixed-size string buffer, NUL padded.
pub fn fixed(value: &str, size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    data[..value.len()].copy_from_slice(value.as_bytes());
    data
}

/// A `TES3` header record.
pub fn tes3(author: &str, description: &str, masters: &[(&str, u64)]) -> RecordBuilder {
    let mut hedr = Vec::with_capacity(300);
    hedr.extend_from_slice(&1.3f32.to_le_bytes());
    hedr.extend_from_slice(&1u32.to_le_bytes());
    hedr.extend_from_slice(&fixed(author, 32));
    hedr.extend_from_slice(&fixed(description, 256));
    hedr.extend_from_slice(&0u32.to_le_bytes());

    let mut record = RecordBuilder::new(b"TES3").sub(b"HEDR", &hedr);
    for (name, size) in masters {
        record = record.string(b"MAST", name).sub(b"DATA", &size.to_le_bytes());
    }
    record
}

/// A record with only a `NAME` identifier.
pub fn named(tag: &[u8; 4], id: &str) -> RecordBuilder {
    RecordBuilder::new(tag).string(b"NAME", id)
}

fn cell_data(flags: u32, x: i32, y: i32) -> Vec<u8> {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&flags.to_le_bytes());
    data.extend_from_slice(&x.to_le_bytes());
    data.extend_from_slice(&y.to_le_bytes());
    data
}

/// An exterior `CELL` at a grid position.
pub fn exterior_cell(name: &str, x: i32, y: i32) -> RecordBuilder {
    RecordBuilder::new(b"CELL")
        .string(b"NAME", name)
        .sub(b"DATA", &cell_data(0, x, y))
}

/// An interior `CELL`; the grid words are present but meaningless.
pub fn interior_cell(name: &str, x: i32, y: i32) -> RecordBuilder {
    RecordBuilder::new(b"CELL")
        .string(b"NAME", name)
        .sub(b"DATA", &cell_data(0x01, x, y))
}

/// A `LAND` record at a grid position.
pub fn land(x: i32, y: i32) -> RecordBuilder {
    let mut intv = Vec::with_capacity(8);
    intv.extend_from_slice(&x.to_le_bytes());
    intv.extend_from_slice(&y.to_le_bytes());
    RecordBuilder::new(b"LAND")
        .sub(b"INTV", &intv)
        .u32(b"DATA", 0)
}

/// A `WEAP` record with a value in its `WPDT`.
pub fn weapon(id: &str, value: i32) -> RecordBuilder {
    let mut wpdt = vec![0u8; 32];
    wpdt[..4].copy_from_slice(&1.5f32.to_le_bytes());
    wpdt[4..8].copy_from_slice(&value.to_le_bytes());
    named(b"WEAP", id)
        .string(b"MODL", "w\\w_dagger_iron.nif")
        .string(b"FNAM", "Iron Dagger")
        .sub(b"WPDT", &wpdt)
}

/// Concatenate little-endian fields into one sub-record payload.
pub fn le(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// One `ENAM` magic effect.
pub fn effect(effect_id: i16, magnitude: i32) -> Vec<u8> {
    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&effect_id.to_le_bytes());
    data.extend_from_slice(&[0xFF, 0xFF]);
    for value in [0i32, 0, 30, magnitude, magnitude] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data
}

/// A populated record of `kind`. Identifiers are unique across kinds, and
/// every sample ends with a sub-record that carries data.
pub fn sample(kind: RecordKind) -> RecordBuilder {
    match kind {
        RecordKind::Tes3 => tes3("Bethesda", "Sample plugin", &[("Morrowind.esm", 1234)]),
        RecordKind::GameSetting => named(b"GMST", "iSampleSetting").i32(b"INTV", 42),
        RecordKind::Global => named(b"GLOB", "SampleGlobal")
            .sub(b"FNAM", b"s")
            .f32(b"FLTV", 3.0),
        RecordKind::Class => {
            let mut cldt = vec![0u8; 60];
            cldt[8..12].copy_from_slice(&2i32.to_le_bytes());
            named(b"CLAS", "sample_class")
                .string(b"FNAM", "Sample Class")
                .sub(b"CLDT", &cldt)
                .string(b"DESC", "Fights with samples.")
        }
        RecordKind::Faction => named(b"FACT", "sample_faction")
            .string(b"FNAM", "Sample Faction")
            .string(b"RNAM", "Novice")
            .string(b"RNAM", "Master")
            .sub(b"FADT", &[0u8; 240])
            .string(b"ANAM", "other_faction")
            .i32(b"INTV", -2),
        RecordKind::Race => {
            let mut radt = vec![0u8; 140];
            radt[136..].copy_from_slice(&2i32.to_le_bytes());
            named(b"RACE", "sample_race")
                .string(b"FNAM", "Sample Race")
                .sub(b"RADT", &radt)
                .string(b"NPCS", "sample_spell")
                .string(b"DESC", "Scaled.")
        }
        RecordKind::Sound => named(b"SOUN", "sample_sound")
            .string(b"FNAM", "Fx\\sample.wav")
            .sub(b"DATA", &[200, 0, 255]),
        RecordKind::Skill => RecordBuilder::new(b"SKIL")
            .i32(b"INDX", 8)
            .sub(
                b"SKDT",
                &le(&[
                    &3i32.to_le_bytes(),
                    &2i32.to_le_bytes(),
                    &[0u8; 16],
                ]),
            )
            .string(b"DESC", "Running and swimming."),
        RecordKind::MagicEffect => {
            let mut medt = vec![0u8; 36];
            medt[..4].copy_from_slice(&1i32.to_le_bytes());
            medt[4..8].copy_from_slice(&5.0f32.to_le_bytes());
            RecordBuilder::new(b"MGEF")
                .i32(b"INDX", 14)
                .sub(b"MEDT", &medt)
                .string(b"ITEX", "s\\tx_s_fire_damage.dds")
                .string(b"DESC", "Burns the target.")
        }
        RecordKind::Script => {
            let mut schd = fixed("SampleScript", 32);
            for value in [1u32, 0, 1, 4, 12] {
                schd.extend_from_slice(&value.to_le_bytes());
            }
            RecordBuilder::new(b"SCPT")
                .sub(b"SCHD", &schd)
                .sub(b"SCVR", b"state\0timer\0")
                .sub(b"SCDT", &[1, 2, 3, 4])
                .string(b"SCTX", "begin SampleScript\nend")
        }
        RecordKind::Region => {
            let mut snam = fixed("wind", 32);
            snam.push(25);
            named(b"REGN", "sample_region")
                .string(b"FNAM", "Sample Region")
                .sub(b"WEAT", &[60, 20, 10, 10, 0, 0, 0, 0, 0, 0])
                .string(b"BNAM", "ex_sample_sleep")
                .sub(b"CNAM", &[34, 56, 78, 0])
                .sub(b"SNAM", &snam)
        }
        RecordKind::Birthsign => named(b"BSGN", "sample_sign")
            .string(b"FNAM", "The Sample")
            .string(b"TNAM", "birthsigns\\sample.tga")
            .string(b"DESC", "Born under the sample.")
            .string(b"NPCS", "sample_power"),
        RecordKind::LandTexture => named(b"LTEX", "sample_texture")
            .i32(b"INTV", 3)
            .string(b"DATA", "tx_sample.tga"),
        RecordKind::Static => named(b"STAT", "sample_static").string(b"MODL", "x\\sample.nif"),
        RecordKind::Door => named(b"DOOR", "sample_door")
            .string(b"FNAM", "Sample Door")
            .string(b"MODL", "d\\sample.nif")
            .string(b"SNAM", "Door Open")
            .string(b"ANAM", "Door Close"),
        RecordKind::MiscItem => named(b"MISC", "sample_misc")
            .string(b"MODL", "m\\sample.nif")
            .string(b"FNAM", "Sample Misc")
            .sub(
                b"MCDT",
                &le(&[&0.5f32.to_le_bytes(), &7i32.to_le_bytes(), &[0u8; 4]]),
            )
            .string(b"ITEX", "m\\sample.dds"),
        RecordKind::Weapon => weapon("sample_weapon", 25),
        RecordKind::Container => {
            let mut npco = 2i32.to_le_bytes().to_vec();
            npco.extend_from_slice(&fixed("sample_misc", 32));
            named(b"CONT", "sample_container")
                .string(b"MODL", "o\\sample.nif")
                .string(b"FNAM", "Sample Chest")
                .f32(b"CNDT", 150.0)
                .i32(b"FLAG", 8)
                .sub(b"NPCO", &npco)
        }
        RecordKind::Spell => named(b"SPEL", "sample_spell")
            .string(b"FNAM", "Sample Spell")
            .sub(
                b"SPDT",
                &le(&[&0i32.to_le_bytes(), &9i32.to_le_bytes(), &1i32.to_le_bytes()]),
            )
            .sub(b"ENAM", &effect(14, 10)),
        RecordKind::Creature => {
            let mut npdt = vec![0u8; 96];
            npdt[4..8].copy_from_slice(&5i32.to_le_bytes());
            named(b"CREA", "sample_creature")
                .string(b"MODL", "r\\sample.nif")
                .string(b"FNAM", "Sample Creature")
                .sub(b"NPDT", &npdt)
                .i32(b"FLAG", 0x48)
                .f32(b"XSCL", 1.5)
        }
        RecordKind::BodyPart => named(b"BODY", "sample_part")
            .string(b"MODL", "b\\sample.nif")
            .string(b"FNAM", "Dark Elf")
            .sub(b"BYDT", &[1, 0, 0, 0]),
        RecordKind::Light => named(b"LIGH", "sample_light")
            .string(b"MODL", "l\\sample.nif")
            .sub(
                b"LHDT",
                &le(&[
                    &1.0f32.to_le_bytes(),
                    &4i32.to_le_bytes(),
                    &300i32.to_le_bytes(),
                    &128i32.to_le_bytes(),
                    &[255, 200, 100, 0],
                    &0i32.to_le_bytes(),
                ]),
            )
            .string(b"SNAM", "Fire"),
        RecordKind::Enchantment => named(b"ENCH", "sample_enchantment")
            .sub(
                b"ENDT",
                &le(&[
                    &2i32.to_le_bytes(),
                    &10i32.to_le_bytes(),
                    &100i32.to_le_bytes(),
                    &0i32.to_le_bytes(),
                ]),
            )
            .sub(b"ENAM", &effect(14, 5)),
        RecordKind::Npc => {
            let mut npdt = vec![0u8; 12];
            npdt[..2].copy_from_slice(&7i16.to_le_bytes());
            named(b"NPC_", "sample_npc")
                .string(b"FNAM", "Sample Npc")
                .string(b"RNAM", "Dark Elf")
                .string(b"CNAM", "Guard")
                .sub(b"NPDT", &npdt)
                .i32(b"FLAG", 0x18)
        }
        RecordKind::Armor => {
            let mut aodt = vec![0u8; 24];
            aodt[8..12].copy_from_slice(&30i32.to_le_bytes());
            named(b"ARMO", "sample_armor")
                .string(b"MODL", "a\\sample.nif")
                .sub(b"AODT", &aodt)
                .sub(b"INDX", &[7])
                .string(b"BNAM", "sample_part")
        }
        RecordKind::Clothing => named(b"CLOT", "sample_clothing")
            .string(b"MODL", "c\\sample.nif")
            .sub(
                b"CTDT",
                &le(&[
                    &8i32.to_le_bytes(),
                    &1.0f32.to_le_bytes(),
                    &5i16.to_le_bytes(),
                    &10i16.to_le_bytes(),
                ]),
            ),
        RecordKind::RepairTool => named(b"REPA", "sample_hammer").sub(
            b"RIDT",
            &le(&[
                &2.0f32.to_le_bytes(),
                &12i32.to_le_bytes(),
                &10i32.to_le_bytes(),
                &1.0f32.to_le_bytes(),
            ]),
        ),
        RecordKind::Activator => named(b"ACTI", "sample_activator")
            .string(b"MODL", "x\\sample_sign.nif")
            .string(b"FNAM", "Sample Sign")
            .string(b"SCRI", "SampleScript"),
        RecordKind::Apparatus => named(b"APPA", "sample_mortar").sub(
            b"AADT",
            &le(&[
                &1i32.to_le_bytes(),
                &0.5f32.to_le_bytes(),
                &2.0f32.to_le_bytes(),
                &20i32.to_le_bytes(),
            ]),
        ),
        RecordKind::Lockpick => named(b"LOCK", "sample_lockpick").sub(
            b"LKDT",
            &le(&[
                &0.25f32.to_le_bytes(),
                &15i32.to_le_bytes(),
                &1.25f32.to_le_bytes(),
                &25i32.to_le_bytes(),
            ]),
        ),
        RecordKind::Probe => named(b"PROB", "sample_probe").sub(
            b"PBDT",
            &le(&[
                &0.25f32.to_le_bytes(),
                &15i32.to_le_bytes(),
                &1.25f32.to_le_bytes(),
                &30i32.to_le_bytes(),
            ]),
        ),
        RecordKind::Ingredient => {
            let mut irdt = le(&[&0.5f32.to_le_bytes(), &1i32.to_le_bytes()]);
            irdt.extend_from_slice(&14i32.to_le_bytes());
            for _ in 0..11 {
                irdt.extend_from_slice(&(-1i32).to_le_bytes());
            }
            named(b"INGR", "sample_ingredient")
                .string(b"FNAM", "Sample Root")
                .sub(b"IRDT", &irdt)
        }
        RecordKind::Book => named(b"BOOK", "sample_book")
            .string(b"FNAM", "Sample Book")
            .sub(
                b"BKDT",
                &le(&[
                    &1.0f32.to_le_bytes(),
                    &50i32.to_le_bytes(),
                    &0i32.to_le_bytes(),
                    &8i32.to_le_bytes(),
                    &100i32.to_le_bytes(),
                ]),
            )
            .string(b"TEXT", "<DIV ALIGN=\"CENTER\">Sample"),
        RecordKind::Potion => named(b"ALCH", "sample_potion")
            .sub(
                b"ALDT",
                &le(&[&1.0f32.to_le_bytes(), &35i32.to_le_bytes(), &0i32.to_le_bytes()]),
            )
            .sub(b"ENAM", &effect(75, 10))
            .string(b"TEXT", "m\\tx_potion_sample.tga"),
        RecordKind::LeveledItem => named(b"LEVI", "sample_leveled_item")
            .i32(b"DATA", 1)
            .sub(b"NNAM", &[10])
            .i32(b"INDX", 1)
            .string(b"INAM", "sample_weapon")
            .sub(b"INTV", &3i16.to_le_bytes()),
        RecordKind::LeveledCreature => named(b"LEVC", "sample_leveled_creature")
            .i32(b"DATA", 0)
            .sub(b"NNAM", &[0])
            .i32(b"INDX", 1)
            .string(b"CNAM", "sample_creature")
            .sub(b"INTV", &2i16.to_le_bytes()),
        RecordKind::Cell => exterior_cell("Sample Cell", 9, 9)
            .string(b"RGNN", "sample_region")
            .u32(b"FRMR", 1)
            .string(b"NAME", "sample_static")
            .sub(b"DATA", &[0u8; 24]),
        RecordKind::Land => land(9, 9).sub(b"VTEX", &[0u8; 512]),
        RecordKind::PathGrid => {
            let data = le(&[
                &9i32.to_le_bytes(),
                &9i32.to_le_bytes(),
                &1024u16.to_le_bytes(),
                &1u16.to_le_bytes(),
            ]);
            RecordBuilder::new(b"PGRD")
                .sub(b"DATA", &data)
                .string(b"NAME", "Sample Cell")
                .sub(b"PGRP", &[0u8; 16])
        }
        RecordKind::SoundGenerator => named(b"SNDG", "sample_sound_generator")
            .i32(b"DATA", 3)
            .string(b"CNAM", "sample_creature")
            .string(b"SNAM", "sample_sound"),
        RecordKind::Dialogue => RecordBuilder::new(b"DIAL")
            .string(b"NAME", "sample topic")
            .sub(b"DATA", &[0]),
        RecordKind::DialogueInfo => RecordBuilder::new(b"INFO")
            .string(b"INAM", "1234567890")
            .string(b"PNAM", "")
            .string(b"NNAM", "")
            .sub(b"DATA", &[0u8; 12])
            .string(b"ONAM", "sample_npc")
            .string(b"NAME", "Hello, sample."),
    }
}
