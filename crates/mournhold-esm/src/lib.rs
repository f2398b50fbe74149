//! Loader for TES3 (Morrowind) ESM/ESP game data files.
//!
//! An ESM file is a flat sequence of tagged records. Each record is a 16-byte
//! header (four-character tag, payload size, an unused word, flags) followed
//! by a payload made of tagged sub-records. This crate reads the sequence,
//! decodes every record type it knows into a typed body, skips the ones it
//! doesn't, and indexes the result by kind, object identifier and exterior
//! grid coordinate.
//!
//! # Quick Start
//!
//! ```no_run
//! use mournhold_esm::{EsmFile, GridCoord, records::NpcRecord};
//!
//! let esm = EsmFile::open("Morrowind.esm")?;
//!
//! if let Some(header) = esm.header().and_then(|h| h.header.as_ref()) {
//!     println!("{} ({} records)", header.description, header.record_count);
//! }
//!
//! for npc in esm.records_of::<NpcRecord>().take(5) {
//!     println!("{} the {}", npc.id, npc.race.as_deref().unwrap_or("?"));
//! }
//!
//! let seyda_neen = esm.exterior_cell(GridCoord::new(-2, -9));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Load Order
//!
//! Plugins override masters. [`EsmFile::merge`] folds a later file into an
//! earlier one: on every identifier or coordinate both define, the later file
//! wins.
//!
//! ```no_run
//! use mournhold_esm::{EsmFile, LoadOptions};
//!
//! let esm = EsmFile::load_order(
//!     ["Morrowind.esm", "Tribunal.esm", "Bloodmoon.esm"],
//!     &LoadOptions::new(),
//! )?;
//! let fargoth = esm.object_by_id("Fargoth");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Errors and Diagnostics
//!
//! Structural problems (a truncated header, a payload that does not decode to
//! exactly its declared size) abort the load with an [`Error`]. Unknown record
//! and sub-record tags and duplicate identifiers are reported as
//! [`Diagnostic`]s on the loaded container and logged through `tracing`.

mod diagnostic;
mod error;
mod field;
mod file;
mod grid;
mod header;
mod index;
mod kind;
mod loader;
mod options;
mod record;

pub mod records;

pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use field::{Field, FieldDecoder, RecordBody};
pub use file::EsmFile;
pub use grid::GridCoord;
pub use header::{RecordFlags, RecordHeader, SubRecordHeader};
pub use kind::RecordKind;
pub use options::LoadOptions;
pub use record::{Record, RecordData};
