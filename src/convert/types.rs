//! Conversion option and summary types

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::materials::MaterialFixReport;

/// Which kind of viewmodel is being converted.
///
/// The destination game expects fixed model names per weapon slot, so the
/// kind decides the output model and the gameplay script that ships with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeaponKind {
    Knife,
    Pistol,
}

impl WeaponKind {
    /// Output model name expected by the destination game.
    pub fn model_name(self) -> &'static str {
        match self {
            WeaponKind::Knife => "v_knife_t",
            WeaponKind::Pistol => "v_pistol_usp",
        }
    }

    /// Weapon script file shipped alongside the model.
    pub fn script_name(self) -> &'static str {
        match self {
            WeaponKind::Knife => "weapon_momentum_knife.txt",
            WeaponKind::Pistol => "weapon_momentum_pistol.txt",
        }
    }

    /// Bodygroup name for the weapon mesh in the generated QC.
    pub fn group_name(self) -> &'static str {
        match self {
            WeaponKind::Knife => "knife",
            WeaponKind::Pistol => "pistol",
        }
    }
}

impl FromStr for WeaponKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knife" => Ok(WeaponKind::Knife),
            "pistol" => Ok(WeaponKind::Pistol),
            _ => Err(format!("invalid weapon kind '{s}'. Valid values: knife, pistol")),
        }
    }
}

/// Inputs for a full skin conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Extracted CS:GO data directory (models + materials).
    pub data_dir: PathBuf,
    /// Destination game install directory.
    pub game_dir: PathBuf,
    /// Output directory for the converted assets.
    pub output_dir: PathBuf,
    /// Weapon model path, relative to `data_dir`.
    pub weapon_model: PathBuf,
    /// Glove model path, relative to `data_dir`.
    pub glove_model: PathBuf,
    /// Weapon slot being converted.
    pub kind: WeaponKind,
    /// Path to the decompiler executable.
    pub decompiler: PathBuf,
    /// Directory holding the per-kind weapon scripts.
    pub scripts_dir: PathBuf,
}

/// What a finished conversion produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// Name of the compiled output model.
    pub model_name: String,
    /// Compiled model files in the output tree.
    pub artifacts: Vec<PathBuf>,
    /// Material names referenced by the converted geometry.
    pub materials: Vec<String>,
    /// Result of the material descriptor rewrite.
    pub material_report: MaterialFixReport,
    /// Whether shared animations were found and included.
    pub animations_included: bool,
    /// Whether the weapon script was copied.
    pub script_copied: bool,
}
