//! SMD geometry descriptor scanning
//!
//! The only thing the converter needs out of an SMD file is the set of
//! material names its triangle data references. Extraction is best-effort:
//! malformed input yields an empty list, never an error.

use std::path::Path;

/// Extract the distinct material names referenced by `triangles` blocks.
///
/// Inside a `triangles` .. `end` block, each polygon is introduced by a line
/// holding the material name as its only token, followed by numeric vertex
/// rows. A line counts as a material name when it is a single token that is
/// not parseable as vertex data (digits, periods, minus signs).
///
/// Names are returned deduplicated, in first-seen order.
pub fn extract_material_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut in_triangles = false;

    for line in text.lines() {
        let line = line.trim();
        if line == "triangles" {
            in_triangles = true;
        } else if line == "end" {
            in_triangles = false;
        } else if in_triangles && is_material_line(line) && !names.iter().any(|n| n == line) {
            names.push(line.to_string());
        }
    }

    names
}

/// Read an SMD file and extract its material names.
///
/// Decoding is lossy (legacy SMDs are not always clean UTF-8) and an
/// unreadable file simply yields no names.
pub fn material_names_from_file(path: &Path) -> Vec<String> {
    match std::fs::read(path) {
        Ok(bytes) => extract_material_names(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::warn!("could not read SMD {}: {e}", path.display());
            Vec::new()
        }
    }
}

fn is_material_line(line: &str) -> bool {
    !line.is_empty() && line.split_whitespace().count() == 1 && !is_vertex_data(line)
}

fn is_vertex_data(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c.is_whitespace())
}
