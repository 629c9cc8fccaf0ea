//! CLI commands for material operations

use std::path::{Path, PathBuf};

use crate::cli::progress::simple_bar;
use crate::formats::smd::material_names_from_file;
use crate::materials::{
    MaterialFixReport, ResolverConfig, collect_material_dirs, fix_materials,
};

/// Rewrite the descriptors for materials named explicitly or referenced by
/// the given SMD files.
pub fn fix(
    source: &Path,
    destination: &Path,
    smds: &[PathBuf],
    materials: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let names = gather_names(smds, materials);
    if names.is_empty() {
        anyhow::bail!("no material names given (use --smd and/or --material)");
    }
    if !source.is_dir() {
        anyhow::bail!("source materials tree not found: {}", source.display());
    }

    let config = ResolverConfig::default();
    let pb = simple_bar(names.len() as u64, "Fixing materials");

    let mut report = MaterialFixReport::default();
    for name in &names {
        pb.set_message(name.clone());
        let one = fix_materials(source, destination, std::slice::from_ref(name), &config);
        report.fixed.extend(one.fixed);
        report.missing.extend(one.missing);
        report.failures.extend(one.failures);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Fixed {} descriptors", report.fixed.len());
    for path in &report.fixed {
        println!("  {path}");
    }
    if !report.missing.is_empty() {
        println!("Not found:");
        for name in &report.missing {
            println!("  {name}");
        }
    }
    if !report.failures.is_empty() {
        println!("Failures:");
        for msg in &report.failures {
            println!("  {msg}");
        }
    }

    Ok(())
}

/// List the material names referenced by the given SMD files.
pub fn list(smds: &[PathBuf]) -> anyhow::Result<()> {
    if smds.is_empty() {
        anyhow::bail!("no SMD files given");
    }

    let names = gather_names(smds, &[]);
    if names.is_empty() {
        println!("No materials referenced");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

/// Print `$cdmaterials` search directives for the given materials.
pub fn search_dirs(source: &Path, smds: &[PathBuf], materials: &[String]) -> anyhow::Result<()> {
    let names = gather_names(smds, materials);
    let dirs = collect_material_dirs(source, &names, &ResolverConfig::default());
    for dir in dirs {
        println!("$cdmaterials \"{dir}\"");
    }
    Ok(())
}

/// Merge SMD-referenced and explicit names, deduplicated, first-seen order.
fn gather_names(smds: &[PathBuf], explicit: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for smd in smds {
        for name in material_names_from_file(smd) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    for name in explicit {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
