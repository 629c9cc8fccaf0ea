//! Texture path resolution
//!
//! Given a material name referenced by decompiled geometry, deduce the
//! destination texture paths. CS:GO skin archives follow several naming
//! conventions at once (shared base textures for `_left`/`_right` variants,
//! `_color` suffixed albedos, placeholder `black` references), so resolution
//! walks an ordered fallback chain, probing the destination tree for files
//! that actually exist. Probes are existence checks only; texture contents
//! are never read.

use std::path::{Path, PathBuf};

/// Destination-convention knobs for the resolver.
///
/// Kept as explicit configuration so the fallback rules can be retargeted
/// without touching resolution logic.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Path prefix marking a reference as already destination-correct.
    pub root_prefix: String,
    /// Extension of texture files probed on disk.
    pub texture_extension: String,
    /// Search directory always added to collected `$cdmaterials` lists.
    pub default_search_dir: String,
    /// Base-color value treated as "no usable reference" in source VMTs.
    pub placeholder_base: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_prefix: "models/".to_string(),
            texture_extension: "vtf".to_string(),
            default_search_dir: "models/weapons/".to_string(),
            placeholder_base: "black".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Whether a VMT reference already uses the destination path convention.
    fn is_destination_path(&self, reference: &str) -> bool {
        reference.starts_with(self.root_prefix.as_str()) && reference.contains('/')
    }
}

/// Where a material's own textures live.
///
/// `folder` is the absolute on-disk directory holding sibling texture files;
/// `relative` is that same directory expressed relative to the destination
/// material root, forward slashes only.
#[derive(Debug, Clone)]
pub struct MaterialLocation {
    folder: PathBuf,
    relative: String,
}

impl MaterialLocation {
    pub fn new(folder: impl Into<PathBuf>, relative: impl Into<String>) -> Self {
        let relative = relative
            .into()
            .replace('\\', "/")
            .trim_end_matches('/')
            .to_string();
        Self {
            folder: folder.into(),
            relative,
        }
    }

    /// The absolute directory probed for sibling textures.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The material folder relative to the destination root.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Does a sibling texture `<stem>.<ext>` exist in the material folder?
    fn sibling_exists(&self, stem: &str, config: &ResolverConfig) -> bool {
        self.folder
            .join(format!("{stem}.{}", config.texture_extension))
            .is_file()
    }

    /// Destination material root on disk, recovered by peeling `relative`
    /// off the end of `folder`. `None` when the two disagree.
    fn material_root(&self) -> Option<PathBuf> {
        let mut root = self.folder.as_path();
        for component in Path::new(&self.relative).components().rev() {
            if root.file_name()? != component.as_os_str() {
                return None;
            }
            root = root.parent()?;
        }
        Some(root.to_path_buf())
    }

    /// Does a destination-convention reference point at a real texture file?
    fn destination_exists(&self, reference: &str, config: &ResolverConfig) -> bool {
        self.material_root().is_some_and(|root| {
            root.join(format!("{reference}.{}", config.texture_extension))
                .is_file()
        })
    }

    /// Join a texture stem onto the relative material folder.
    fn prefixed(&self, stem: &str) -> String {
        if self.relative.is_empty() {
            stem.to_string()
        } else {
            format!("{}/{stem}", self.relative)
        }
    }
}

/// Destination texture paths for one material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTextures {
    /// Base-color path relative to the destination material root. Never empty.
    pub base_texture: String,
    /// Normal-map path, omitted when no candidate exists on disk.
    pub normal_map: Option<String>,
}

/// First two underscore-delimited segments of a material name.
///
/// `glove_sporty_left` -> `glove_sporty`: variant suffixes (`_left`,
/// `_right`, color indices) collapse back to the shared texture family.
/// A name with fewer than two segments degenerates to itself.
pub fn base_name(material_name: &str) -> String {
    material_name
        .split('_')
        .take(2)
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve the destination texture paths for `material_name`.
///
/// `descriptor` carries the original VMT's texture references (either may be
/// absent). Resolution never fails: when every probe misses, the base color
/// falls back to a best-guess name and the normal map is omitted.
pub fn resolve(
    material_name: &str,
    descriptor: &crate::formats::vmt::VmtDescriptor,
    location: &MaterialLocation,
    config: &ResolverConfig,
) -> ResolvedTextures {
    ResolvedTextures {
        base_texture: resolve_base(material_name, descriptor.base_texture.as_deref(), location, config),
        normal_map: resolve_normal(material_name, descriptor.normal_map.as_deref(), location, config),
    }
}

fn resolve_base(
    name: &str,
    original: Option<&str>,
    location: &MaterialLocation,
    config: &ResolverConfig,
) -> String {
    let base = base_name(name);

    match original {
        // Placeholder reference: the real texture is named after the family.
        Some(reference) if reference.eq_ignore_ascii_case(&config.placeholder_base) => {
            let candidates = [base.clone(), format!("{base}_color"), name.to_string()];
            let chosen = first_existing(&candidates, location, config).unwrap_or(base);
            location.prefixed(&chosen)
        }
        // Already destination-correct: keep verbatim.
        Some(reference) if config.is_destination_path(reference) => reference.to_string(),
        // Absent or bare: probe the material's own names.
        _ => {
            let candidates = [name.to_string(), base.clone(), format!("{base}_color")];
            let chosen = first_existing(&candidates, location, config).unwrap_or_else(|| name.to_string());
            location.prefixed(&chosen)
        }
    }
}

fn resolve_normal(
    name: &str,
    original: Option<&str>,
    location: &MaterialLocation,
    config: &ResolverConfig,
) -> Option<String> {
    match original {
        // Destination-convention reference is only trusted when the file is
        // really there; a stale one is rejected, not reused as a fallback.
        Some(reference) if config.is_destination_path(reference) => {
            if location.destination_exists(reference, config) {
                return Some(reference.to_string());
            }
        }
        Some(reference) if !reference.is_empty() => {
            if location.sibling_exists(reference, config) {
                return Some(location.prefixed(reference));
            }
        }
        _ => {}
    }

    // Derived probes: the material's own normal, then the family normal.
    let mut candidates = vec![format!("{name}_normal")];
    if name.contains('_') {
        let family = format!("{}_normal", base_name(name));
        if family != candidates[0] {
            candidates.push(family);
        }
    }
    candidates
        .into_iter()
        .find(|c| location.sibling_exists(c, config))
        .map(|c| location.prefixed(&c))
}

fn first_existing(
    candidates: &[String],
    location: &MaterialLocation,
    config: &ResolverConfig,
) -> Option<String> {
    candidates
        .iter()
        .find(|c| location.sibling_exists(c, config))
        .cloned()
}
