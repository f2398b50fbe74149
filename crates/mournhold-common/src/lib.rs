//! Common utilities for Mournhold.
//!
//! This crate provides the foundational types shared by the Mournhold crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian cursor over a byte slice
//! - [`Tag`] - The four-character codes naming records and sub-records
//! - [`text`] - Windows-1252 decoding for the strings stored in game data files

mod error;
mod reader;
mod tag;

pub mod text;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use tag::Tag;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
