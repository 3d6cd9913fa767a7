//! Rendering module for converting chunks to output formats.

mod json;
mod result;

pub use json::{to_json, ChunkRecord, JsonFormat};
pub use result::ChunkStats;
