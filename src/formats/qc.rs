//! QC compile descriptor generation
//!
//! The destination model is rebuilt from scratch: the weapon and glove
//! meshes become bodygroups, the material search paths come from the fixed
//! materials tree, and only the bone/attachment setup survives from the
//! decompiled weapon QC. Everything else studiomdl needs is emitted fresh.

/// Directives carried over verbatim from the decompiled weapon QC.
///
/// Bone definitions and attachments must match the animation model exactly;
/// regenerating them would break `$includemodel` sequences.
const CARRIED_DIRECTIVES: [&str; 6] = [
    "$definebone",
    "$attachment",
    "$bbox",
    "$cbox",
    "$bonemerge",
    "$bonesaveframe",
];

/// Inputs for a generated compile descriptor.
#[derive(Debug, Clone)]
pub struct QcTemplate {
    /// Output model name, e.g. `v_knife_t`.
    pub model_name: String,
    /// Bodygroup name for the weapon mesh (`knife`, `pistol`).
    pub weapon_group: String,
    /// SMD stem of the weapon mesh.
    pub weapon_mesh: String,
    /// SMD stem of the glove mesh.
    pub glove_mesh: String,
    /// `$cdmaterials` search directories, already sorted.
    pub material_dirs: Vec<String>,
    /// `$includemodel` target for shared animations, when one was built.
    pub include_model: Option<String>,
}

impl QcTemplate {
    /// Render the descriptor, carrying bone setup lines over from the
    /// decompiled weapon QC text.
    pub fn render(&self, weapon_qc: &str) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("$modelname \"weapons/{}.mdl\"", self.model_name));
        lines.push(String::new());

        lines.push(format!("$bodygroup \"{}\"", self.weapon_group));
        lines.push("{".to_string());
        lines.push(format!("    studio \"{}.smd\"", self.weapon_mesh));
        lines.push("}".to_string());
        lines.push(String::new());

        lines.push("$bodygroup \"gloves\"".to_string());
        lines.push("{".to_string());
        lines.push(format!("    studio \"{}.smd\"", self.glove_mesh));
        lines.push("}".to_string());
        lines.push(String::new());

        lines.push("$surfaceprop \"weapon\"".to_string());
        lines.push("$contents \"solid\"".to_string());
        lines.push("$illumposition 0 0 0".to_string());

        for dir in &self.material_dirs {
            lines.push(format!("$cdmaterials \"{dir}\""));
        }
        lines.push(String::new());

        lines.extend(carried_lines(weapon_qc));
        lines.push(String::new());

        if let Some(include) = &self.include_model {
            lines.push(format!("$includemodel \"{include}\""));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Bone and attachment setup lines from a decompiled QC.
fn carried_lines(weapon_qc: &str) -> Vec<String> {
    weapon_qc
        .lines()
        .map(str::trim)
        .filter(|line| CARRIED_DIRECTIVES.iter().any(|d| line.starts_with(d)))
        .map(ToString::to_string)
        .collect()
}
