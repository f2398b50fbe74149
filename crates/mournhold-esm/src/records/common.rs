//! Sub-record shapes shared by several record kinds.

use mournhold_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// An `NPCO` inventory entry: a count and a 32-byte item identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// Stack size. Negative counts mark restocking merchant items.
    pub count: i32,
    pub item_id: String,
}

impl InventoryItem {
    /// Encoded size of an `NPCO` sub-record.
    pub const SIZE: usize = 36;

    pub(crate) fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        Ok(Self {
            count: s.read_i32()?,
            item_id: s.read_fixed_string(32)?,
        })
    }
}

/// One `ENAM` magic effect of a spell, enchantment or potion.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct Effect {
    pub effect_id: i16,
    /// Affected skill, or -1.
    pub skill: i8,
    /// Affected attribute, or -1.
    pub attribute: i8,
    /// 0 self, 1 touch, 2 target.
    pub range: i32,
    pub area: i32,
    pub duration: i32,
    pub magnitude_min: i32,
    pub magnitude_max: i32,
}

/// A position and rotation in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct Placement {
    pub position: [f32; 3],
    /// Rotation in radians about each axis.
    pub rotation: [f32; 3],
}

/// `AI_W` wander package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct AiWander {
    pub distance: i16,
    pub duration: i16,
    pub time_of_day: u8,
    pub idles: [u8; 8],
    pub reset: u8,
}

/// `AIDT` AI settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct AiData {
    pub hello: u8,
    pub unknown1: u8,
    pub fight: u8,
    pub flee: u8,
    pub alarm: u8,
    pub unknown2: [u8; 3],
    /// Bit set of services offered and item types bartered.
    pub services: i32,
}

/// An `INDX` body-part slot with its male (`BNAM`) and female (`CNAM`) parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPartSlot {
    pub index: u8,
    pub male: Option<String>,
    pub female: Option<String>,
}

/// A `DODT` travel destination, optionally with an interior cell name (`DNAM`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelDestination {
    pub placement: Placement,
    pub cell: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<Effect>(), 24);
        assert_eq!(std::mem::size_of::<Placement>(), 24);
        assert_eq!(std::mem::size_of::<AiWander>(), 14);
        assert_eq!(std::mem::size_of::<AiData>(), 12);
    }

    #[test]
    fn test_inventory_item() {
        let mut data = vec![0u8; InventoryItem::SIZE];
        data[..4].copy_from_slice(&(-5i32).to_le_bytes());
        data[4..16].copy_from_slice(b"iron dagger\0");

        let mut reader = BinaryReader::new(&data);
        let item = InventoryItem::read(&mut reader).unwrap();
        assert_eq!(item.count, -5);
        assert_eq!(item.item_id, "iron dagger");
        assert!(reader.is_empty());
    }
}
