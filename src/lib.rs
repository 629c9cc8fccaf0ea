//! # skinforge
//!
//! A toolkit for porting CS:GO viewmodel weapon skins to Momentum Mod.
//!
//! Conversion runs through external Source engine tooling: a decompiler
//! (Crowbar) turns the `.mdl` bundles back into SMD geometry plus a QC
//! descriptor, and the destination compiler (studiomdl) rebuilds them for the
//! target game. Everything in between - rewriting VMT material descriptors,
//! deducing destination texture paths, regenerating the QC - is handled here.
//!
//! ## Quick Start
//!
//! ### Fixing materials
//!
//! ```no_run
//! use skinforge::materials::{fix_materials, ResolverConfig};
//!
//! let names = vec!["glove_sporty_left".to_string(), "knife_blade".to_string()];
//! let report = fix_materials(
//!     "csgo/materials".as_ref(),
//!     "output/materials".as_ref(),
//!     &names,
//!     &ResolverConfig::default(),
//! );
//! println!("fixed {} descriptors", report.fixed.len());
//! ```
//!
//! ### Running a full conversion
//!
//! ```no_run
//! use skinforge::convert::{Conversion, ConvertOptions, WeaponKind};
//!
//! let options = ConvertOptions {
//!     data_dir: "csgo_data".into(),
//!     game_dir: "momentum".into(),
//!     output_dir: "out".into(),
//!     weapon_model: "v_knife_m9_bay.mdl".into(),
//!     glove_model: "v_glove_sporty.mdl".into(),
//!     kind: WeaponKind::Knife,
//!     decompiler: "thirdparty/crowbar.exe".into(),
//!     scripts_dir: "scripts".into(),
//! };
//! let summary = Conversion::new(options)?.run()?;
//! println!("built {}", summary.model_name);
//! # Ok::<(), skinforge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `skinforge` command-line binary

pub mod convert;
pub mod error;
pub mod formats;
pub mod materials;
pub mod tools;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::smd::{extract_material_names, material_names_from_file};
    pub use crate::formats::vmt::{VmtDescriptor, render_descriptor};
    pub use crate::materials::{
        MaterialFixReport, MaterialLocation, ResolvedTextures, ResolverConfig,
        collect_material_dirs, fix_materials, resolve,
    };
    pub use crate::convert::{Conversion, ConversionSummary, ConvertOptions, WeaponKind};
    pub use crate::tools::{Compiler, Decompiler, ToolOutcome};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
