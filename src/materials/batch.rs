//! Batch material fixing
//!
//! Walks a source materials tree for each referenced material name, rewrites
//! every matching VMT descriptor, and mirrors it into the destination tree.
//! One bad file never aborts the batch: failures are logged and recorded in
//! the report, and processing moves on.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::resolver::{MaterialLocation, ResolverConfig, resolve};
use crate::formats::vmt::{VmtDescriptor, render_descriptor};

const DESCRIPTOR_EXT: &str = "vmt";

/// Result of a batch material fix
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialFixReport {
    /// Relative paths of descriptors written to the destination tree
    pub fixed: Vec<String>,
    /// Material names with no descriptor anywhere under the source root
    pub missing: Vec<String>,
    /// Messages for files that could not be read or written
    pub failures: Vec<String>,
}

impl MaterialFixReport {
    /// True when every requested material produced at least its descriptors.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.failures.is_empty()
    }
}

/// Find all descriptor files named `<name>.vmt` under `root`, recursively.
///
/// The stem must match exactly; only the extension comparison ignores case.
/// Results are sorted for deterministic processing order.
pub fn find_material_descriptors(root: &Path, name: &str) -> Vec<PathBuf> {
    let mut matches: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            let path = e.path();
            path.is_file()
                && path.file_stem().is_some_and(|stem| stem == name)
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(DESCRIPTOR_EXT))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    matches.sort();
    matches
}

/// Rewrite the descriptors for every name in `names`.
///
/// Each match is rewritten for the destination engine and written at the
/// mirrored relative path under `dest_root`, creating parent directories as
/// needed. A name matching several descriptors in different subdirectories
/// has all of them processed.
pub fn fix_materials(
    source_root: &Path,
    dest_root: &Path,
    names: &[String],
    config: &ResolverConfig,
) -> MaterialFixReport {
    let mut report = MaterialFixReport::default();

    for name in deduplicate(names) {
        let descriptors = find_material_descriptors(source_root, name);
        if descriptors.is_empty() {
            tracing::warn!("no descriptor found for material: {name}");
            report.missing.push(name.to_string());
            continue;
        }

        for vmt_path in descriptors {
            match fix_one(source_root, dest_root, name, &vmt_path, config) {
                Ok(relative) => {
                    tracing::debug!("fixed {relative}");
                    report.fixed.push(relative);
                }
                Err(e) => {
                    tracing::warn!("failed to fix {}: {e}", vmt_path.display());
                    report.failures.push(format!("{}: {e}", vmt_path.display()));
                }
            }
        }
    }

    report
}

fn fix_one(
    source_root: &Path,
    dest_root: &Path,
    name: &str,
    vmt_path: &Path,
    config: &ResolverConfig,
) -> crate::Result<String> {
    let relative = vmt_path
        .strip_prefix(source_root)
        .map_err(|_| crate::Error::InvalidPath(vmt_path.display().to_string()))?;

    let text = std::fs::read_to_string(vmt_path)?;
    let descriptor = VmtDescriptor::parse(&text);
    for warning in &descriptor.warnings {
        tracing::debug!("{}: {warning}", vmt_path.display());
    }

    let folder = vmt_path.parent().unwrap_or(source_root);
    let relative_dir = normalize_path(relative.parent().unwrap_or(Path::new("")));
    let location = MaterialLocation::new(folder, relative_dir);

    let resolved = resolve(name, &descriptor, &location, config);
    let output = render_descriptor(&resolved);

    let dest = dest_root.join(relative);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&dest, output)?;

    Ok(normalize_path(relative))
}

/// Collect the search directories needed to locate the given materials.
///
/// Returns the distinct relative parent directories (forward slashes,
/// trailing slash) of every matched descriptor, plus the configured default
/// search dir and an empty-string catch-all, sorted lexicographically. Feeds
/// the generated QC's `$cdmaterials` directives.
pub fn collect_material_dirs(
    source_root: &Path,
    names: &[String],
    config: &ResolverConfig,
) -> Vec<String> {
    let mut dirs = BTreeSet::new();
    dirs.insert(String::new());
    dirs.insert(with_trailing_slash(&config.default_search_dir));

    for name in deduplicate(names) {
        for path in find_material_descriptors(source_root, name) {
            let Ok(relative) = path.strip_prefix(source_root) else {
                continue;
            };
            let dir = normalize_path(relative.parent().unwrap_or(Path::new("")));
            if !dir.is_empty() {
                dirs.insert(with_trailing_slash(&dir));
            }
        }
    }

    dirs.into_iter().collect()
}

/// Normalize path separators to forward slashes (for engine-facing paths)
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn with_trailing_slash(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

fn deduplicate(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|n| seen.insert(*n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const GLOVE_VMT: &str = "VertexLitGeneric\n{\n\t\"$basetexture\" \"black\"\n}\n";

    fn write_file(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fix_writes_mirrored_descriptor() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let material_dir = source.path().join("models/weapons/v_models/arms/glove_sporty");
        write_file(&material_dir.join("glove_sporty_left.vmt"), GLOVE_VMT);
        std::fs::write(material_dir.join("glove_sporty.vtf"), b"").unwrap();

        let report = fix_materials(
            source.path(),
            dest.path(),
            &names(&["glove_sporty_left"]),
            &ResolverConfig::default(),
        );

        assert!(report.is_clean());
        assert_eq!(
            report.fixed,
            vec!["models/weapons/v_models/arms/glove_sporty/glove_sporty_left.vmt"]
        );
        let written = std::fs::read_to_string(
            dest.path()
                .join("models/weapons/v_models/arms/glove_sporty/glove_sporty_left.vmt"),
        )
        .unwrap();
        assert!(written.contains(
            "\"$basetexture\" \"models/weapons/v_models/arms/glove_sporty/glove_sporty\""
        ));
    }

    #[test]
    fn test_missing_material_is_reported_not_fatal() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_file(
            &source.path().join("models/weapons/knife_blade.vmt"),
            "X\n{\n}\n",
        );

        let report = fix_materials(
            source.path(),
            dest.path(),
            &names(&["no_such_material", "knife_blade"]),
            &ResolverConfig::default(),
        );

        assert_eq!(report.missing, vec!["no_such_material"]);
        assert_eq!(report.fixed.len(), 1);
        assert!(dest.path().join("models/weapons/knife_blade.vmt").exists());
    }

    #[test]
    fn test_duplicate_names_processed_once() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_file(&source.path().join("models/knife_blade.vmt"), "X\n{\n}\n");

        let report = fix_materials(
            source.path(),
            dest.path(),
            &names(&["knife_blade", "knife_blade"]),
            &ResolverConfig::default(),
        );
        assert_eq!(report.fixed.len(), 1);
    }

    #[test]
    fn test_name_matching_multiple_descriptors_processes_all() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write_file(&source.path().join("models/a/knife_blade.vmt"), "X\n{\n}\n");
        write_file(&source.path().join("models/b/knife_blade.vmt"), "X\n{\n}\n");

        let report = fix_materials(
            source.path(),
            dest.path(),
            &names(&["knife_blade"]),
            &ResolverConfig::default(),
        );
        assert_eq!(report.fixed.len(), 2);
        assert!(dest.path().join("models/a/knife_blade.vmt").exists());
        assert!(dest.path().join("models/b/knife_blade.vmt").exists());
    }

    #[test]
    fn test_collect_dirs_includes_fixed_fallbacks() {
        let source = TempDir::new().unwrap();
        let dirs = collect_material_dirs(source.path(), &[], &ResolverConfig::default());
        assert_eq!(dirs, vec!["".to_string(), "models/weapons/".to_string()]);
    }

    #[test]
    fn test_collect_dirs_sorted_with_trailing_slashes() {
        let source = TempDir::new().unwrap();
        write_file(
            &source.path().join("models/weapons/v_models/knife_m9_bay/knife_blade.vmt"),
            "X\n{\n}\n",
        );
        write_file(
            &source.path().join("models/arms/bare_arm.vmt"),
            "X\n{\n}\n",
        );

        let dirs = collect_material_dirs(
            source.path(),
            &names(&["knife_blade", "bare_arm", "not_there"]),
            &ResolverConfig::default(),
        );
        assert_eq!(
            dirs,
            vec![
                "".to_string(),
                "models/arms/".to_string(),
                "models/weapons/".to_string(),
                "models/weapons/v_models/knife_m9_bay/".to_string(),
            ]
        );
        assert!(dirs.iter().all(|d| !d.contains('\\')));
    }
}
