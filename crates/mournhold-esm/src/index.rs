//! Lookup indices built over the flat record list.
//!
//! Indices store positions into the container's record list rather than
//! references, so merging only has to shift the incoming positions.

use std::hash::BuildHasherDefault;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;
use tracing::warn;

use crate::record::{Record, RecordData};
use crate::{Diagnostic, Error, GridCoord, LoadOptions, RecordKind, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Normalize an identifier for lookup. Identifiers are case-insensitive.
pub(crate) fn normalize_id(id: &str) -> String {
    id.to_ascii_lowercase()
}

/// Record positions grouped by kind, identifier, and grid coordinate.
#[derive(Debug, Clone, Default)]
pub(crate) struct Index {
    pub by_kind: FxHashMap<RecordKind, Vec<usize>>,
    pub by_id: FxHashMap<String, usize>,
    pub exterior_cells: FxHashMap<GridCoord, usize>,
    pub lands: FxHashMap<GridCoord, usize>,
}

impl Index {
    /// Build the indices in one pass over `records`, skipping placeholders.
    ///
    /// Within one file the first definition of a key wins. Later duplicates
    /// are reported, or rejected in strict mode.
    pub fn build(
        records: &[Option<Record>],
        options: &LoadOptions,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self> {
        let mut index = Self::default();

        for (position, record) in records.iter().enumerate() {
            let Some(record) = record else {
                continue;
            };

            index.by_kind.entry(record.kind()).or_default().push(position);

            if let Some(id) = record.id() {
                match index.by_id.entry(normalize_id(id)) {
                    Entry::Vacant(slot) => {
                        slot.insert(position);
                    }
                    Entry::Occupied(slot) => {
                        let first = &records[*slot.get()];
                        let first_offset = first.as_ref().map_or(0, Record::offset);
                        report_duplicate(
                            options,
                            diagnostics,
                            DuplicateKey::Id(id.to_string()),
                            record,
                            first_offset,
                        )?;
                    }
                }
            }

            let grid_slot = match record.data() {
                RecordData::Cell(cell) => cell.grid().map(|coord| (coord, &mut index.exterior_cells)),
                RecordData::Land(land) => land.grid().map(|coord| (coord, &mut index.lands)),
                _ => None,
            };

            if let Some((coord, map)) = grid_slot {
                match map.entry(coord) {
                    Entry::Vacant(slot) => {
                        slot.insert(position);
                    }
                    Entry::Occupied(slot) => {
                        let first = &records[*slot.get()];
                        let first_offset = first.as_ref().map_or(0, Record::offset);
                        report_duplicate(
                            options,
                            diagnostics,
                            DuplicateKey::Coord(coord),
                            record,
                            first_offset,
                        )?;
                    }
                }
            }
        }

        Ok(index)
    }

    /// Fold another container's index into this one.
    ///
    /// `base` is the position of the other container's first record in the
    /// merged list. Entries from `other` replace existing entries on key
    /// collision; per-kind lists are concatenated.
    pub fn absorb(&mut self, other: Index, base: usize) {
        for (kind, positions) in other.by_kind {
            self.by_kind
                .entry(kind)
                .or_default()
                .extend(positions.into_iter().map(|p| p + base));
        }
        for (id, position) in other.by_id {
            self.by_id.insert(id, position + base);
        }
        for (coord, position) in other.exterior_cells {
            self.exterior_cells.insert(coord, position + base);
        }
        for (coord, position) in other.lands {
            self.lands.insert(coord, position + base);
        }
    }
}

/// The key that was defined twice.
enum DuplicateKey {
    Id(String),
    Coord(GridCoord),
}

fn report_duplicate(
    options: &LoadOptions,
    diagnostics: &mut Vec<Diagnostic>,
    key: DuplicateKey,
    record: &Record,
    first_offset: usize,
) -> Result<()> {
    let kind = record.kind();
    let offset = record.offset();

    let diagnostic = match (options.is_strict(), key) {
        (true, DuplicateKey::Id(id)) => {
            return Err(Error::DuplicateIdentifier {
                id,
                kind,
                offset,
                first_offset,
            })
        }
        (true, DuplicateKey::Coord(coord)) => {
            return Err(Error::DuplicateCoordinate {
                coord,
                kind,
                offset,
                first_offset,
            })
        }
        (false, DuplicateKey::Id(id)) => Diagnostic::DuplicateIdentifier {
            id,
            kind,
            offset,
            first_offset,
        },
        (false, DuplicateKey::Coord(coord)) => Diagnostic::DuplicateCoordinate {
            coord,
            kind,
            offset,
            first_offset,
        },
    };

    warn!(source = options.name(), "{}", diagnostic);
    diagnostics.push(diagnostic);
    Ok(())
}
