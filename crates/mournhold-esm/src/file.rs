//! The loaded ESM container.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, info};

use crate::field::RecordBody;
use crate::index::{normalize_id, Index};
use crate::loader::Loader;
use crate::record::Record;
use crate::records::{CellRecord, LandRecord, Tes3Record};
use crate::{Diagnostic, GridCoord, LoadOptions, RecordKind, Result};

/// A fully loaded and indexed ESM/ESP file, or several merged in load order.
///
/// Built once from a byte source and immutable afterwards except for
/// [`merge`](Self::merge). Records are kept in stream order; slots for record
/// types without a decoder hold `None`.
///
/// # Example
///
/// ```no_run
/// use mournhold_esm::{EsmFile, GridCoord, RecordKind};
///
/// let mut esm = EsmFile::open("Morrowind.esm")?;
/// esm.merge(EsmFile::open("Tribunal.esm")?);
///
/// println!("{} NPCs", esm.records_of_kind(RecordKind::Npc).count());
/// if let Some(cell) = esm.exterior_cell(GridCoord::new(-3, -2)) {
///     println!("Balmora: {} references", cell.references.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EsmFile {
    records: Vec<Option<Record>>,
    index: Index,
    diagnostics: Vec<Diagnostic>,
    sources: Vec<String>,
}

impl EsmFile {
    /// Load a file from disk with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::open_with(path, &LoadOptions::new().source_name(path.display().to_string()))
    }

    /// Load a file from disk.
    ///
    /// The file is memory-mapped for the duration of the load only.
    pub fn open_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Self::parse_with(&[], options);
        }

        // SAFETY: the mapping is read-only and dropped before this returns;
        // decoded records own their data.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse_with(&mmap, options)
    }

    /// Load from an in-memory buffer with default options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &LoadOptions::new())
    }

    /// Load from an in-memory buffer.
    pub fn parse_with(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let stream = Loader::new(data, options).run()?;
        let mut diagnostics = stream.diagnostics;
        let index = Index::build(&stream.records, options, &mut diagnostics)?;

        info!(
            source = options.name(),
            records = stream.records.len(),
            objects = index.by_id.len(),
            exterior_cells = index.exterior_cells.len(),
            diagnostics = diagnostics.len(),
            "loaded"
        );

        Ok(Self {
            records: stream.records,
            index,
            diagnostics,
            sources: vec![options.name().to_string()],
        })
    }

    /// Open every file of a load order and merge them, later files winning.
    pub fn load_order<I, P>(paths: I, options: &LoadOptions) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut merged: Option<Self> = None;
        for path in paths {
            let path = path.as_ref();
            let file_options = options.clone().source_name(path.display().to_string());
            let file = Self::open_with(path, &file_options)?;
            match merged.as_mut() {
                Some(base) => base.merge(file),
                None => merged = Some(file),
            }
        }
        Ok(merged.unwrap_or_else(Self::empty))
    }

    /// Create an empty container.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            index: Index::default(),
            diagnostics: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Fold a later-loaded container into this one.
    ///
    /// Records of `other` are appended after this container's records. On any
    /// identifier or coordinate defined by both, `other` wins; everything else
    /// from both stays reachable.
    pub fn merge(&mut self, other: EsmFile) {
        let base = self.records.len();
        debug!(
            base = self.sources.join(", "),
            other = other.sources.join(", "),
            records = other.records.len(),
            "merging"
        );

        self.records.extend(other.records);
        self.index.absorb(other.index, base);
        self.diagnostics.extend(other.diagnostics);
        self.sources.extend(other.sources);
    }

    /// Get every record slot in stream (and load) order.
    #[inline]
    pub fn records(&self) -> &[Option<Record>] {
        &self.records
    }

    /// Get the number of record slots, placeholders included.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records were read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count the slots left empty for unsupported record types.
    pub fn placeholder_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_none()).count()
    }

    /// Get the names of the sources merged into this container, in load order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Get the non-fatal diagnostics collected while loading.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn at(&self, position: usize) -> Option<&Record> {
        self.records.get(position).and_then(Option::as_ref)
    }

    /// Get the record kinds present, with their record counts.
    pub fn kinds(&self) -> Vec<(RecordKind, usize)> {
        let mut kinds: Vec<_> = self
            .index
            .by_kind
            .iter()
            .map(|(kind, positions)| (*kind, positions.len()))
            .collect();
        kinds.sort();
        kinds
    }

    /// Iterate over the records of one kind, in load order.
    pub fn records_of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &Record> + '_ {
        self.index
            .by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(move |&p| self.at(p))
    }

    /// Iterate over the typed bodies of one kind, in load order.
    ///
    /// ```no_run
    /// use mournhold_esm::{EsmFile, records::WeaponRecord};
    ///
    /// let esm = EsmFile::open("Morrowind.esm")?;
    /// for weapon in esm.records_of::<WeaponRecord>() {
    ///     println!("{}", weapon.id);
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records_of<T: RecordBody>(&self) -> impl Iterator<Item = &T> + '_ {
        self.records_of_kind(T::KIND).filter_map(Record::get::<T>)
    }

    /// Look up a record by game-object identifier.
    ///
    /// Lookup is ASCII case-insensitive: `"Fargoth"` and `"fargoth"` name the
    /// same object. This differs from a case-sensitive dictionary keyed by the
    /// raw string. Two records in one file whose identifiers differ only in
    /// case are therefore duplicates; the first one is kept and the second is
    /// reported as [`Diagnostic::DuplicateIdentifier`], or rejected in strict
    /// mode.
    pub fn object_by_id(&self, id: &str) -> Option<&Record> {
        self.index
            .by_id
            .get(&normalize_id(id))
            .and_then(|&p| self.at(p))
    }

    /// Iterate over every identifier-indexed record.
    pub fn objects(&self) -> impl Iterator<Item = &Record> + '_ {
        self.index.by_id.values().filter_map(move |&p| self.at(p))
    }

    /// Get the number of identifier-indexed records.
    pub fn object_count(&self) -> usize {
        self.index.by_id.len()
    }

    /// Get the exterior cell at a grid coordinate.
    pub fn exterior_cell(&self, coord: GridCoord) -> Option<&CellRecord> {
        self.index
            .exterior_cells
            .get(&coord)
            .and_then(|&p| self.at(p))
            .and_then(Record::get::<CellRecord>)
    }

    /// Iterate over every exterior cell with its coordinate.
    pub fn exterior_cells(&self) -> impl Iterator<Item = (GridCoord, &CellRecord)> + '_ {
        self.index.exterior_cells.iter().filter_map(move |(coord, &p)| {
            self.at(p)
                .and_then(Record::get::<CellRecord>)
                .map(|cell| (*coord, cell))
        })
    }

    /// Get the landscape at a grid coordinate.
    pub fn land(&self, coord: GridCoord) -> Option<&LandRecord> {
        self.index
            .lands
            .get(&coord)
            .and_then(|&p| self.at(p))
            .and_then(Record::get::<LandRecord>)
    }

    /// Iterate over every landscape record with its coordinate.
    pub fn lands(&self) -> impl Iterator<Item = (GridCoord, &LandRecord)> + '_ {
        self.index.lands.iter().filter_map(move |(coord, &p)| {
            self.at(p)
                .and_then(Record::get::<LandRecord>)
                .map(|land| (*coord, land))
        })
    }

    /// Get the file header of the first source.
    pub fn header(&self) -> Option<&Tes3Record> {
        self.records_of::<Tes3Record>().next()
    }
}

impl Default for EsmFile {
    fn default() -> Self {
        Self::empty()
    }
}
