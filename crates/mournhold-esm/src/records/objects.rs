//! Placeable world objects without item stats.

use super::{read_name, InventoryItem};
use crate::field::{Field, RecordBody};
use crate::RecordKind;

/// `STAT`: a static mesh.
#[derive(Debug, Clone, Default)]
pub struct StaticRecord {
    pub id: String,
    pub model: Option<String>,
}

impl RecordBody for StaticRecord {
    const KIND: RecordKind = RecordKind::Static;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"MODL", |r, s| {
            r.model = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Static);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `DOOR`
#[derive(Debug, Clone, Default)]
pub struct DoorRecord {
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub script: Option<String>,
    pub open_sound: Option<String>,
    pub close_sound: Option<String>,
}

impl RecordBody for DoorRecord {
    const KIND: RecordKind = RecordKind::Door;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"MODL", |r, s| {
            r.model = read_name(s);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
        Field::new(b"SNAM", |r, s| {
            r.open_sound = read_name(s);
            Ok(())
        }),
        Field::new(b"ANAM", |r, s| {
            r.close_sound = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Door);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `CONT`: a container and its starting inventory.
#[derive(Debug, Clone, Default)]
pub struct ContainerRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    /// Carrying capacity.
    pub weight: f32,
    /// 1 organic, 2 respawns, 8 default.
    pub flags: i32,
    pub inventory: Vec<InventoryItem>,
    pub script: Option<String>,
}

impl RecordBody for ContainerRecord {
    const KIND: RecordKind = RecordKind::Container;
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
        Field::new(b"CNDT", |r, s| {
            r.weight = s.read_f32()?;
            Ok(())
        }),
        Field::new(b"FLAG", |r, s| {
            r.flags = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"NPCO", |r, s| {
            r.inventory.push(InventoryItem::read(s)?);
            Ok(())
        }),
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Container);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `ACTI`: a scripted object the player can activate.
#[derive(Debug, Clone, Default)]
pub struct ActivatorRecord {
    pub id: String,
    pub model: Option<String>,
    pub name: Option<String>,
    pub script: Option<String>,
}

impl RecordBody for ActivatorRecord {
    const KIND: RecordKind = RecordKind::Activator;
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
        Field::new(b"SCRI", |r, s| {
            r.script = read_name(s);
            Ok(())
        }),
    ];

    record_data!(Activator);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
