//! Cells, landscape, path grids, regions and land textures.

use mournhold_common::{BinaryReader, Error};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{read_array, read_name, Placement};
use crate::field::{Field, RecordBody};
use crate::{GridCoord, RecordKind};

/// `CELL` `DATA` flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellFlags(pub u32);

impl CellFlags {
    pub const INTERIOR: Self = Self(0x01);
    pub const HAS_WATER: Self = Self(0x02);
    pub const ILLEGAL_SLEEP: Self = Self(0x04);
    pub const BEHAVE_LIKE_EXTERIOR: Self = Self(0x80);

    /// Check if every bit of `other` is set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// `CELL` `DATA`: flags and grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CellData {
    pub flags: u32,
    /// Grid position; meaningless for interiors.
    pub grid_x: i32,
    pub grid_y: i32,
}

impl CellData {
    /// Get the flag bits.
    pub fn flags(&self) -> CellFlags {
        CellFlags(self.flags)
    }
}

/// `CELL` `AMBI`: interior lighting.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct AmbientLight {
    /// RGBA colors.
    pub ambient: [u8; 4],
    pub sunlight: [u8; 4],
    pub fog: [u8; 4],
    pub fog_density: f32,
}

/// An object placed in a cell, introduced by `FRMR`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellReference {
    /// Reference index unique within the cell's source file.
    pub index: u32,
    /// Identifier of the placed object.
    pub object_id: String,
    pub scale: Option<f32>,
    pub placement: Placement,
    /// Door teleport target.
    pub destination: Option<Placement>,
    pub destination_cell: Option<String>,
    pub lock_level: Option<i32>,
    pub key: Option<String>,
    pub trap: Option<String>,
    pub blocked: Option<u8>,
    pub owner: Option<String>,
    pub global_variable: Option<String>,
    pub faction: Option<String>,
    pub faction_rank: Option<i32>,
    /// Remaining health or uses.
    pub health: Option<i32>,
    pub gold_value: Option<i32>,
    pub soul: Option<String>,
    pub charge: Option<f32>,
    pub deleted: bool,
    /// Set by a preceding `MVRF`/`CNDT` pair: the reference lives in another
    /// exterior cell.
    pub moved_to: Option<GridCoord>,
}

/// `CELL`: an interior or exterior cell and the references placed in it.
///
/// Sub-records before the first `FRMR` describe the cell; everything after it
/// belongs to the most recent reference. `NAME`, `DATA`, `INTV` and `DELE`
/// therefore mean different things depending on position.
#[derive(Debug, Clone, Default)]
pub struct CellRecord {
    /// Cell name; empty or the region name for most exteriors.
    pub name: String,
    pub data: Option<CellData>,
    pub region: Option<String>,
    /// `NAM0`: number of references, as saved by the editor.
    pub reference_count: Option<u32>,
    /// `NAM5`: map color.
    pub map_color: Option<i32>,
    pub water_height: Option<f32>,
    pub ambient: Option<AmbientLight>,
    pub references: Vec<CellReference>,
    pub deleted: bool,
    pending_move: Option<GridCoord>,
}

impl CellRecord {
    /// Check if this is an interior cell.
    pub fn is_interior(&self) -> bool {
        self.data
            .map(|d| d.flags().contains(CellFlags::INTERIOR))
            .unwrap_or(false)
    }

    /// Get the grid coordinate of an exterior cell; `None` for interiors and
    /// cells without `DATA`.
    pub fn grid(&self) -> Option<GridCoord> {
        match self.data {
            Some(data) if !data.flags().contains(CellFlags::INTERIOR) => {
                Some(GridCoord::new(data.grid_x, data.grid_y))
            }
            _ => None,
        }
    }

    fn reference(&mut self) -> Option<&mut CellReference> {
        self.references.last_mut()
    }
}

impl RecordBody for CellRecord {
    const KIND: RecordKind = RecordKind::Cell;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            match r.reference() {
                Some(reference) => reference.object_id = s.read_zstring(),
                None => r.name = s.read_zstring(),
            }
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            match r.reference() {
                Some(reference) => reference.placement = s.read_struct()?,
                None => r.data = Some(s.read_struct()?),
            }
            Ok(())
        }),
        Field::new(b"RGNN", |r, s| {
            r.region = read_name(s);
            Ok(())
        }),
        Field::new(b"NAM0", |r, s| {
            r.reference_count = Some(s.read_u32()?);
            Ok(())
        }),
        Field::new(b"NAM5", |r, s| {
            r.map_color = Some(s.read_i32()?);
            Ok(())
        }),
        Field::new(b"WHGT", |r, s| {
            r.water_height = Some(s.read_f32()?);
            Ok(())
        }),
        Field::new(b"AMBI", |r, s| {
            r.ambient = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"MVRF", |r, s| {
            s.read_u32()?;
            r.pending_move = None;
            Ok(())
        }),
        Field::new(b"CNDT", |r, s| {
            r.pending_move = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"FRMR", |r, s| {
            let index = s.read_u32()?;
            let moved_to = r.pending_move.take();
            r.references.push(CellReference {
                index,
                moved_to,
                ..Default::default()
            });
            Ok(())
        }),
        Field::new(b"XSCL", |r, s| {
            let scale = s.read_f32()?;
            if let Some(reference) = r.reference() {
                reference.scale = Some(scale);
            }
            Ok(())
        }),
        Field::new(b"DODT", |r, s| {
            let destination = s.read_struct()?;
            if let Some(reference) = r.reference() {
                reference.destination = Some(destination);
            }
            Ok(())
        }),
        Field::new(b"DNAM", |r, s| {
            let cell = read_name(s);
            if let Some(reference) = r.reference() {
                reference.destination_cell = cell;
            }
            Ok(())
        }),
        Field::new(b"FLTV", |r, s| {
            let level = s.read_i32()?;
            if let Some(reference) = r.reference() {
                reference.lock_level = Some(level);
            }
            Ok(())
        }),
        Field::new(b"KNAM", |r, s| {
            let key = read_name(s);
            if let Some(reference) = r.reference() {
                reference.key = key;
            }
            Ok(())
        }),
        Field::new(b"TNAM", |r, s| {
            let trap = read_name(s);
            if let Some(reference) = r.reference() {
                reference.trap = trap;
            }
            Ok(())
        }),
        Field::new(b"UNAM", |r, s| {
            let blocked = s.read_u8()?;
            if let Some(reference) = r.reference() {
                reference.blocked = Some(blocked);
            }
            Ok(())
        }),
        Field::new(b"ANAM", |r, s| {
            let owner = read_name(s);
            if let Some(reference) = r.reference() {
                reference.owner = owner;
            }
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            let global = read_name(s);
            if let Some(reference) = r.reference() {
                reference.global_variable = global;
            }
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            let faction = read_name(s);
            if let Some(reference) = r.reference() {
                reference.faction = faction;
            }
            Ok(())
        }),
        Field::new(b"INDX", |r, s| {
            let rank = s.read_i32()?;
            if let Some(reference) = r.reference() {
                reference.faction_rank = Some(rank);
            }
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            match r.reference() {
                Some(reference) => reference.health = Some(s.read_i32()?),
                // Older files store the water height as an integer.
                None => r.water_height = Some(s.read_i32()? as f32),
            }
            Ok(())
        }),
        Field::new(b"NAM9", |r, s| {
            let value = s.read_i32()?;
            if let Some(reference) = r.reference() {
                reference.gold_value = Some(value);
            }
            Ok(())
        }),
        Field::new(b"XSOL", |r, s| {
            let soul = read_name(s);
            if let Some(reference) = r.reference() {
                reference.soul = soul;
            }
            Ok(())
        }),
        Field::new(b"XCHG", |r, s| {
            let charge = s.read_f32()?;
            if let Some(reference) = r.reference() {
                reference.charge = Some(charge);
            }
            Ok(())
        }),
        Field::new(b"DELE", |r, s| {
            s.read_remaining();
            match r.reference() {
                Some(reference) => reference.deleted = true,
                None => r.deleted = true,
            }
            Ok(())
        }),
    ];

    record_data!(Cell);

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// Number of height samples along one side of a landscape cell.
pub const LAND_SIZE: usize = 65;

/// `LAND` `VHGT`: a delta-encoded height field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heightmap {
    pub offset: f32,
    /// Row-major deltas, `LAND_SIZE` squared. The first delta of each row is
    /// relative to the first sample of the row above; the others are relative
    /// to their left neighbor.
    pub deltas: Vec<i8>,
}

impl Heightmap {
    /// Scale from stored units to world units.
    pub const HEIGHT_SCALE: f32 = 8.0;

    fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        let offset = s.read_f32()?;
        let deltas = s
            .read_bytes(LAND_SIZE * LAND_SIZE)?
            .iter()
            .map(|&b| b as i8)
            .collect();
        // trailing alignment bytes
        s.read_remaining();
        Ok(Self { offset, deltas })
    }

    /// Reconstruct absolute heights in world units, row-major.
    pub fn heights(&self) -> Vec<f32> {
        let mut heights = Vec::with_capacity(self.deltas.len());
        let mut row_start = self.offset;
        for row in self.deltas.chunks(LAND_SIZE) {
            let mut height = row_start;
            for (column, &delta) in row.iter().enumerate() {
                height += f32::from(delta);
                if column == 0 {
                    row_start = height;
                }
                heights.push(height * Self::HEIGHT_SCALE);
            }
        }
        heights
    }
}

/// `LAND`: terrain for one exterior cell.
#[derive(Debug, Clone, Default)]
pub struct LandRecord {
    pub coord: Option<GridCoord>,
    /// Bit set of the data blocks present.
    pub data_flags: u32,
    /// Raw vertex normals, three signed bytes per vertex.
    pub normals: Vec<u8>,
    pub heights: Option<Heightmap>,
    /// Raw low-resolution map heights.
    pub world_map: Vec<u8>,
    /// Raw vertex colors, three bytes per vertex.
    pub colors: Vec<u8>,
    /// 16 by 16 land texture indices; 0 is the default texture.
    pub textures: Vec<u16>,
}

impl LandRecord {
    /// Get the grid coordinate the landscape belongs to.
    pub fn grid(&self) -> Option<GridCoord> {
        self.coord
    }
}

impl RecordBody for LandRecord {
    const KIND: RecordKind = RecordKind::Land;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"INTV", |r, s| {
            r.coord = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.data_flags = s.read_u32()?;
            Ok(())
        }),
        Field::new(b"VNML", |r, s| {
            r.normals = s.read_remaining().to_vec();
            Ok(())
        }),
        Field::new(b"VHGT", |r, s| {
            r.heights = Some(Heightmap::read(s)?);
            Ok(())
        }),
        Field::new(b"WNAM", |r, s| {
            r.world_map = s.read_remaining().to_vec();
            Ok(())
        }),
        Field::new(b"VCLR", |r, s| {
            r.colors = s.read_remaining().to_vec();
            Ok(())
        }),
        Field::new(b"VTEX", |r, s| {
            r.textures = read_array(s)?;
            Ok(())
        }),
    ];

    record_data!(Land);
}

/// `PGRD` `DATA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct PathGridData {
    pub grid_x: i32,
    pub grid_y: i32,
    pub granularity: u16,
    pub point_count: u16,
}

/// A `PGRP` path node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct PathGridPoint {
    pub position: [i32; 3],
    pub auto_generated: u8,
    pub connection_count: u8,
    pub unknown: [u8; 2],
}

/// `PGRD`: AI path nodes for a cell.
#[derive(Debug, Clone, Default)]
pub struct PathGridRecord {
    pub data: Option<PathGridData>,
    /// Name of the cell the grid belongs to.
    pub cell: String,
    pub points: Vec<PathGridPoint>,
    /// Flattened edge targets; each point owns `connection_count` of them in
    /// point order.
    pub connections: Vec<u32>,
}

impl RecordBody for PathGridRecord {
    const KIND: RecordKind = RecordKind::PathGrid;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"DATA", |r, s| {
            r.data = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"NAME", |r, s| {
            r.cell = s.read_zstring();
            Ok(())
        }),
        Field::new(b"PGRP", |r, s| {
            r.points = read_array(s)?;
            Ok(())
        }),
        Field::new(b"PGRC", |r, s| {
            r.connections = read_array(s)?;
            Ok(())
        }),
    ];

    record_data!(PathGrid);
}

/// `REGN` `WEAT`: weather chances in percent.
///
/// Files from before Bloodmoon omit the snow and blizzard entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherChances {
    pub clear: u8,
    pub cloudy: u8,
    pub foggy: u8,
    pub overcast: u8,
    pub rain: u8,
    pub thunder: u8,
    pub ash: u8,
    pub blight: u8,
    pub snow: u8,
    pub blizzard: u8,
}

impl WeatherChances {
    fn read(s: &mut BinaryReader<'_>) -> mournhold_common::Result<Self> {
        let bytes = s.read_remaining();
        if bytes.len() != 8 && bytes.len() != 10 {
            return Err(Error::InvalidLayout {
                type_name: "WeatherChances",
                len: bytes.len(),
            });
        }
        let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
        Ok(Self {
            clear: at(0),
            cloudy: at(1),
            foggy: at(2),
            overcast: at(3),
            rain: at(4),
            thunder: at(5),
            ash: at(6),
            blight: at(7),
            snow: at(8),
            blizzard: at(9),
        })
    }
}

/// A `SNAM` ambient sound entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSound {
    pub sound: String,
    pub chance: u8,
}

/// `REGN`
#[derive(Debug, Clone, Default)]
pub struct RegionRecord {
    pub id: String,
    pub name: Option<String>,
    pub weather: Option<WeatherChances>,
    /// Leveled creature list used when sleeping outdoors.
    pub sleep_creature: Option<String>,
    /// Map color, RGBA.
    pub map_color: Option<[u8; 4]>,
    pub sounds: Vec<RegionSound>,
}

impl RecordBody for RegionRecord {
    const KIND: RecordKind = RecordKind::Region;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"FNAM", |r, s| {
            r.name = read_name(s);
            Ok(())
        }),
        Field::new(b"WEAT", |r, s| {
            r.weather = Some(WeatherChances::read(s)?);
            Ok(())
        }),
        Field::new(b"BNAM", |r, s| {
            r.sleep_creature = read_name(s);
            Ok(())
        }),
        Field::new(b"CNAM", |r, s| {
            r.map_color = Some(s.read_struct()?);
            Ok(())
        }),
        Field::new(b"SNAM", |r, s| {
            r.sounds.push(RegionSound {
                sound: s.read_fixed_string(32)?,
                chance: s.read_u8()?,
            });
            Ok(())
        }),
    ];

    record_data!(Region);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// `LTEX`
#[derive(Debug, Clone, Default)]
pub struct LandTextureRecord {
    pub id: String,
    /// Index referenced by `LAND` `VTEX`, minus one.
    pub index: i32,
    pub texture: Option<String>,
}

impl RecordBody for LandTextureRecord {
    const KIND: RecordKind = RecordKind::LandTexture;
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"NAME", |r, s| {
            r.id = s.read_zstring();
            Ok(())
        }),
        Field::new(b"INTV", |r, s| {
            r.index = s.read_i32()?;
            Ok(())
        }),
        Field::new(b"DATA", |r, s| {
            r.texture = read_name(s);
            Ok(())
        }),
    ];

    record_data!(LandTexture);

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_cell(fields: &[(&[u8; 4], Vec<u8>)]) -> CellRecord {
        let mut cell = CellRecord::default();
        for (tag, bytes) in fields {
            let field = CellRecord::FIELDS
                .iter()
                .find(|f| f.tag == *tag)
                .unwrap();
            let mut reader = BinaryReader::new(bytes);
            (field.decode)(&mut cell, &mut reader).unwrap();
            assert!(reader.is_empty(), "{:?} left bytes", field.tag);
        }
        cell
    }

    fn cell_data(flags: u32, x: i32, y: i32) -> Vec<u8> {
        CellData {
            flags,
            grid_x: x,
            grid_y: y,
        }
        .as_bytes()
        .to_vec()
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<CellData>(), 12);
        assert_eq!(std::mem::size_of::<AmbientLight>(), 16);
        assert_eq!(std::mem::size_of::<PathGridData>(), 12);
        assert_eq!(std::mem::size_of::<PathGridPoint>(), 16);
    }

    #[test]
    fn test_exterior_cell_grid() {
        let cell = decode_cell(&[
            (b"NAME", b"\0".to_vec()),
            (b"DATA", cell_data(0, 3, -1)),
        ]);
        assert!(!cell.is_interior());
        assert_eq!(cell.grid(), Some(GridCoord::new(3, -1)));
    }

    #[test]
    fn test_interior_cell_has_no_grid() {
        let cell = decode_cell(&[
            (b"NAME", b"Balmora, Caius Cosades' House\0".to_vec()),
            (b"DATA", cell_data(CellFlags::INTERIOR.0, 3, -1)),
        ]);
        assert!(cell.is_interior());
        assert_eq!(cell.grid(), None);
        assert_eq!(cell.name, "Balmora, Caius Cosades' House");
    }

    #[test]
    fn test_fields_after_frmr_belong_to_reference() {
        let placement = Placement {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 1.5],
        };
        let cell = decode_cell(&[
            (b"NAME", b"Seyda Neen\0".to_vec()),
            (b"DATA", cell_data(0, -2, -9)),
            (b"INTV", 5i32.to_le_bytes().to_vec()),
            (b"FRMR", 1u32.to_le_bytes().to_vec()),
            (b"NAME", b"fargoth\0".to_vec()),
            (b"DATA", placement.as_bytes().to_vec()),
            (b"INTV", 40i32.to_le_bytes().to_vec()),
            (b"FRMR", 2u32.to_le_bytes().to_vec()),
            (b"NAME", b"ex_common_door\0".to_vec()),
            (b"DNAM", b"Arrille's Tradehouse\0".to_vec()),
            (b"DELE", 0u32.to_le_bytes().to_vec()),
        ]);

        assert_eq!(cell.name, "Seyda Neen");
        assert_eq!(cell.grid(), Some(GridCoord::new(-2, -9)));
        assert_eq!(cell.water_height, Some(5.0));
        assert!(!cell.deleted);
        assert_eq!(cell.references.len(), 2);

        let fargoth = &cell.references[0];
        assert_eq!(fargoth.index, 1);
        assert_eq!(fargoth.object_id, "fargoth");
        assert_eq!(fargoth.placement, placement);
        assert_eq!(fargoth.health, Some(40));

        let door = &cell.references[1];
        assert_eq!(door.destination_cell.as_deref(), Some("Arrille's Tradehouse"));
        assert!(door.deleted);
    }

    #[test]
    fn test_moved_reference() {
        let cell = decode_cell(&[
            (b"MVRF", 7u32.to_le_bytes().to_vec()),
            (b"CNDT", GridCoord::new(4, 5).as_bytes().to_vec()),
            (b"FRMR", 7u32.to_le_bytes().to_vec()),
        ]);
        assert_eq!(cell.references[0].moved_to, Some(GridCoord::new(4, 5)));
    }

    #[test]
    fn test_heightmap_reconstruction() {
        let mut deltas = vec![0i8; LAND_SIZE * LAND_SIZE];
        deltas[0] = 2;
        deltas[1] = 1;
        deltas[LAND_SIZE] = -1;
        let map = Heightmap {
            offset: 10.0,
            deltas,
        };

        let heights = map.heights();
        assert_eq!(heights.len(), LAND_SIZE * LAND_SIZE);
        assert_eq!(heights[0], 12.0 * Heightmap::HEIGHT_SCALE);
        assert_eq!(heights[1], 13.0 * Heightmap::HEIGHT_SCALE);
        assert_eq!(heights[2], 13.0 * Heightmap::HEIGHT_SCALE);
        assert_eq!(heights[LAND_SIZE], 11.0 * Heightmap::HEIGHT_SCALE);
    }

    #[test]
    fn test_weather_chances_accepts_both_lengths() {
        let mut reader = BinaryReader::new(&[10, 20, 30, 40, 0, 0, 0, 0]);
        let weather = WeatherChances::read(&mut reader).unwrap();
        assert_eq!(weather.foggy, 30);
        assert_eq!(weather.snow, 0);

        let mut reader = BinaryReader::new(&[0, 0, 0, 0, 0, 0, 0, 0, 60, 40]);
        let weather = WeatherChances::read(&mut reader).unwrap();
        assert_eq!(weather.blizzard, 40);

        let mut reader = BinaryReader::new(&[0; 9]);
        assert!(WeatherChances::read(&mut reader).is_err());
    }
}
