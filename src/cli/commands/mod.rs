use clap::Subcommand;
use std::path::PathBuf;

use crate::convert::WeaponKind;

pub mod convert;
pub mod materials;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CS:GO weapon skin to a Momentum Mod model
    Convert {
        /// Extracted CS:GO data directory (models + materials)
        #[arg(short, long)]
        data: PathBuf,

        /// Momentum Mod install directory
        #[arg(short, long)]
        game: PathBuf,

        /// Output directory for the converted assets
        #[arg(short, long)]
        output: PathBuf,

        /// Weapon model path, relative to the data directory
        #[arg(short, long)]
        weapon: PathBuf,

        /// Glove model path, relative to the data directory
        #[arg(long)]
        gloves: PathBuf,

        /// Weapon slot (knife, pistol)
        #[arg(short = 't', long = "type")]
        kind: WeaponKind,

        /// Path to the Crowbar decompiler executable
        #[arg(long)]
        decompiler: PathBuf,

        /// Directory holding the per-type weapon scripts
        #[arg(long, default_value = "scripts")]
        scripts: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rewrite VMT material descriptors for the destination engine
    FixMaterials {
        /// Source materials tree
        #[arg(short, long)]
        source: PathBuf,

        /// Destination materials tree
        #[arg(short, long)]
        destination: PathBuf,

        /// SMD files to harvest material names from
        #[arg(long = "smd")]
        smds: Vec<PathBuf>,

        /// Explicit material names to fix
        #[arg(short, long = "material")]
        materials: Vec<String>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the material names referenced by SMD geometry
    Materials {
        /// SMD files to scan
        smds: Vec<PathBuf>,
    },

    /// Print the $cdmaterials search directories for a set of materials
    SearchDirs {
        /// Source materials tree
        #[arg(short, long)]
        source: PathBuf,

        /// SMD files to harvest material names from
        #[arg(long = "smd")]
        smds: Vec<PathBuf>,

        /// Explicit material names
        #[arg(short, long = "material")]
        materials: Vec<String>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                data,
                game,
                output,
                weapon,
                gloves,
                kind,
                decompiler,
                scripts,
                quiet,
            } => convert::execute(
                crate::convert::ConvertOptions {
                    data_dir: data.clone(),
                    game_dir: game.clone(),
                    output_dir: output.clone(),
                    weapon_model: weapon.clone(),
                    glove_model: gloves.clone(),
                    kind: *kind,
                    decompiler: decompiler.clone(),
                    scripts_dir: scripts.clone(),
                },
                !*quiet,
            ),
            Commands::FixMaterials {
                source,
                destination,
                smds,
                materials,
                json,
            } => materials::fix(source, destination, smds, materials, *json),
            Commands::Materials { smds } => materials::list(smds),
            Commands::SearchDirs {
                source,
                smds,
                materials,
            } => materials::search_dirs(source, smds, materials),
        }
    }
}
