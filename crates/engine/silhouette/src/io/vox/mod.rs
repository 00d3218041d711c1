//! MagicaVoxel `.vox` loading
//!
//! # File Format
//!
//! ```text
//! [Header: 8 bytes]
//!   Magic: 'VOX '
//!   Version: u32 (little-endian)
//!
//! [Chunk]
//!   Id: 4 bytes
//!   Content size: u32
//!   Children size: u32
//!   Content: <content size> bytes
//!   Children: <children size> bytes of nested chunks
//! ```
//!
//! The chunk layout is checked up front (`MAIN` present, `SIZE` present, no
//! `PACK`, every chunk inside the file) so each failure gets its own error.
//! Model contents are then decoded with `dot_vox`.

mod loader;
mod reader;

pub use loader::VoxLoader;
pub use reader::{Chunk, ChunkReader, Chunks, OutOfBounds};

use glam::UVec3;
use thiserror::Error;

pub const MAGIC: [u8; 4] = *b"VOX ";
pub const HEADER_LEN: usize = 8;
pub const CHUNK_HEADER_LEN: usize = 12;

pub const MAIN: [u8; 4] = *b"MAIN";
pub const PACK: [u8; 4] = *b"PACK";
pub const SIZE: [u8; 4] = *b"SIZE";
pub const XYZI: [u8; 4] = *b"XYZI";
pub const RGBA: [u8; 4] = *b"RGBA";

/// Largest extent accepted on any axis. `XYZI` coordinates are single bytes.
pub const MAX_DIMENSION: u32 = 256;

/// Errors returned while locating or decoding a `.vox` file
#[derive(Debug, Error)]
pub enum VoxError {
    #[error("Vox file '{name}.vox' does not exist.")]
    NotFound { name: String },

    #[error("Vox file '{name}.vox' has an invalid header.")]
    InvalidHeader { name: String },

    #[error("Vox file '{name}.vox' does not contain a MAIN chunk.")]
    MissingMain { name: String },

    #[error(
        "Vox file '{name}.vox' contains a PACK chunk, multiple models are not currently supported."
    )]
    MultipleModels { name: String },

    #[error("Vox file '{name}.vox' does not contain a SIZE chunk.")]
    MissingSize { name: String },

    #[error(
        "Vox file '{name}.vox' declares size {size}, each axis must be at most 256."
    )]
    InvalidSize { name: String, size: UVec3 },

    #[error("Vox file '{name}.vox' is truncated: {detail}.")]
    Truncated { name: String, detail: String },

    #[error("Vox file '{name}.vox' could not be decoded: {detail}.")]
    Decode { name: String, detail: String },

    #[error("Failed to read vox file '{name}.vox': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl VoxError {
    /// Model name the error refers to
    pub fn model_name(&self) -> &str {
        match self {
            VoxError::NotFound { name }
            | VoxError::InvalidHeader { name }
            | VoxError::MissingMain { name }
            | VoxError::MultipleModels { name }
            | VoxError::MissingSize { name }
            | VoxError::InvalidSize { name, .. }
            | VoxError::Truncated { name, .. }
            | VoxError::Decode { name, .. }
            | VoxError::Io { name, .. } => name,
        }
    }
}
