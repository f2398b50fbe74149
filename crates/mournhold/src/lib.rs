//! Mournhold - TES3 (Morrowind) game data loading library.
//!
//! This crate provides a unified interface to the Mournhold crates.
//!
//! # Crates
//!
//! - [`mournhold_common`] - Common utilities (binary reading, tags, Windows-1252 text)
//! - [`mournhold_esm`] - ESM/ESP record decoding, indexing and load order merging
//!
//! # Example
//!
//! ```no_run
//! use mournhold::prelude::*;
//!
//! let esm = EsmFile::load_order(["Morrowind.esm", "Tribunal.esm"], &LoadOptions::new())?;
//!
//! for (kind, count) in esm.kinds() {
//!     println!("{}: {}", kind, count);
//! }
//!
//! if let Some(cell) = esm.exterior_cell(GridCoord::new(-2, -9)) {
//!     println!("{} has {} references", cell.name, cell.references.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use mournhold_common as common;
pub use mournhold_esm as esm;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mournhold_common::{BinaryReader, Tag};
    pub use mournhold_esm::{
        Diagnostic, EsmFile, GridCoord, LoadOptions, Record, RecordBody, RecordData, RecordKind,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_loads_a_buffer() {
        let esm = EsmFile::parse(&[]).unwrap();
        assert!(esm.is_empty());
        assert_eq!(RecordKind::from_tag(Tag::new(b"NPC_")), Some(RecordKind::Npc));
    }
}
