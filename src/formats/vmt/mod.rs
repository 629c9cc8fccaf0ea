//! VMT material descriptor handling
//!
//! Reading is tolerant: a source VMT is mined for the handful of directives
//! the converter cares about and everything else is dropped. Writing is a
//! full replacement - the output block is always the same destination shader
//! shape, never a merge with the source descriptor.

mod reader;
mod writer;

pub use writer::{DEST_SHADER, render_descriptor};

/// Parsed view of a source material descriptor.
///
/// Only the texture directives relevant to path resolution are retained.
/// Unrecognized directives are ignored and never round-tripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmtDescriptor {
    /// Shader name from the descriptor header, if one was present.
    pub shader: Option<String>,
    /// `$basetexture` value, separators normalized to forward slashes.
    pub base_texture: Option<String>,
    /// `$bumpmap` value, separators normalized to forward slashes.
    pub normal_map: Option<String>,
    /// Non-fatal parse diagnostics (malformed directive lines, etc.).
    pub warnings: Vec<String>,
}

impl VmtDescriptor {
    /// Parse descriptor text. Never fails; problems land in `warnings`.
    pub fn parse(text: &str) -> Self {
        reader::parse(text)
    }
}
