//! Destination VMT rendering
//!
//! Momentum Mod expects plain `VertexLitGeneric` materials. The source
//! descriptor's shader and rendering directives are dropped wholesale and
//! replaced with a fixed block; only the resolved texture paths vary.

use std::fmt::Write as _;

use crate::materials::ResolvedTextures;

/// Shader emitted for every rewritten material.
pub const DEST_SHADER: &str = "VertexLitGeneric";

/// Render the replacement descriptor for a set of resolved texture paths.
///
/// The `$bumpmap` directive is only emitted when a normal map was resolved.
/// Output is deterministic: identical input yields byte-identical text.
pub fn render_descriptor(textures: &ResolvedTextures) -> String {
    let mut out = String::new();
    out.push_str(DEST_SHADER);
    out.push_str("\n{\n");
    let _ = writeln!(out, "\t\"$basetexture\" \"{}\"", textures.base_texture);
    if let Some(normal) = &textures.normal_map {
        let _ = writeln!(out, "\t\"$bumpmap\" \"{normal}\"");
    }
    out.push_str("\t\"$phong\" \"1\"\n");
    out.push_str("\t\"$phongboost\" \"1\"\n");
    out.push_str("\t\"$phongexponent\" \"20\"\n");
    out.push_str("\t\"$phongfresnelranges\" \"[1 1 1]\"\n");
    out.push_str("}\n");
    out
}
