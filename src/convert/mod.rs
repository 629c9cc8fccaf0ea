//! End-to-end skin conversion pipeline
//!
//! Decompiles the weapon and glove models, mirrors their geometry into the
//! output tree, regenerates the QC descriptor, rewrites materials, and
//! recompiles for the destination game. Scratch work happens in a temp dir
//! that is dropped when the conversion finishes.

mod types;

pub use types::{ConversionSummary, ConvertOptions, WeaponKind};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::qc::QcTemplate;
use crate::formats::smd::material_names_from_file;
use crate::materials::{MaterialFixReport, ResolverConfig, collect_material_dirs, fix_materials};
use crate::tools::{Compiler, Decompiler, ToolOutcome, find_files_with_extension};

/// Pipeline phase, reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    Decompile,
    CopyMeshes,
    Animations,
    Materials,
    GenerateQc,
    Compile,
    Scripts,
}

impl ConvertPhase {
    /// Number of phases a conversion runs through.
    pub const COUNT: usize = 7;

    pub fn description(self) -> &'static str {
        match self {
            ConvertPhase::Decompile => "Decompiling models...",
            ConvertPhase::CopyMeshes => "Copying geometry...",
            ConvertPhase::Animations => "Processing animations...",
            ConvertPhase::Materials => "Fixing materials...",
            ConvertPhase::GenerateQc => "Generating QC descriptor...",
            ConvertPhase::Compile => "Compiling model...",
            ConvertPhase::Scripts => "Copying weapon scripts...",
        }
    }
}

/// A validated, ready-to-run conversion.
#[derive(Debug)]
pub struct Conversion {
    options: ConvertOptions,
    config: ResolverConfig,
    weapon_model: PathBuf,
    glove_model: PathBuf,
    anim_model: PathBuf,
    output_models: PathBuf,
    decompiler: Decompiler,
    compiler: Compiler,
}

impl Conversion {
    /// Resolve derived paths and check every required input up front.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        let weapon_model = options.data_dir.join(&options.weapon_model);
        let glove_model = options.data_dir.join(&options.glove_model);
        let anim_model = sibling_anim_model(&weapon_model);
        let studiomdl = options.game_dir.join("bin").join("win64").join("studiomdl.exe");
        let gameinfo = options.game_dir.join("momentum").join("gameinfo.txt");
        let output_models = options.output_dir.join("models").join("weapons");

        let required: [(&Path, &'static str); 8] = [
            (&options.data_dir, "Data directory"),
            (&options.game_dir, "Game directory"),
            (&options.decompiler, "Decompiler"),
            (&studiomdl, "Model compiler"),
            (&gameinfo, "Game info"),
            (&weapon_model, "Weapon model"),
            (&glove_model, "Glove model"),
            (&options.scripts_dir, "Scripts directory"),
        ];
        for (path, description) in required {
            if !path.exists() {
                return Err(Error::MissingInput {
                    description,
                    path: path.to_path_buf(),
                });
            }
        }

        let decompiler = Decompiler::new(&options.decompiler);
        let compiler = Compiler::new(studiomdl, gameinfo);

        Ok(Self {
            options,
            config: ResolverConfig::default(),
            weapon_model,
            glove_model,
            anim_model,
            output_models,
            decompiler,
            compiler,
        })
    }

    /// Override the material resolver configuration.
    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline.
    pub fn run(&self) -> Result<ConversionSummary> {
        self.run_with_progress(|_| {})
    }

    /// Run the full pipeline, reporting each phase as it starts.
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<ConversionSummary>
    where
        F: FnMut(ConvertPhase),
    {
        let kind = self.options.kind;
        std::fs::create_dir_all(&self.output_models)?;
        let temp = tempfile::tempdir()?;

        // Decompile both models separately; either failing is fatal.
        progress(ConvertPhase::Decompile);
        let weapon_dir = temp.path().join("weapon");
        let glove_dir = temp.path().join("glove");
        let weapon_smd = self.decompile_first_smd(&self.weapon_model, &weapon_dir)?;
        let glove_smd = self.decompile_first_smd(&self.glove_model, &glove_dir)?;
        let weapon_qc = first_qc(&weapon_dir)?;
        first_qc(&glove_dir)?;

        progress(ConvertPhase::CopyMeshes);
        let weapon_out = self.copy_mesh(&weapon_smd, &self.weapon_model)?;
        let glove_out = self.copy_mesh(&glove_smd, &self.glove_model)?;

        progress(ConvertPhase::Animations);
        let include_model = self.copy_animations(temp.path())?;

        // Everything the geometry references gets its descriptor rewritten.
        progress(ConvertPhase::Materials);
        let mut material_names = material_names_from_file(&weapon_out);
        for name in material_names_from_file(&glove_out) {
            if !material_names.contains(&name) {
                material_names.push(name);
            }
        }
        let materials_root = self.options.data_dir.join("materials");
        let material_report = if materials_root.is_dir() {
            fix_materials(
                &materials_root,
                &self.options.output_dir.join("materials"),
                &material_names,
                &self.config,
            )
        } else {
            tracing::warn!("no materials tree at {}", materials_root.display());
            MaterialFixReport::default()
        };
        let material_dirs = collect_material_dirs(&materials_root, &material_names, &self.config);

        progress(ConvertPhase::GenerateQc);
        let template = QcTemplate {
            model_name: kind.model_name().to_string(),
            weapon_group: kind.group_name().to_string(),
            weapon_mesh: stem_of(&self.weapon_model),
            glove_mesh: stem_of(&self.glove_model),
            material_dirs,
            include_model,
        };
        let weapon_qc_text = std::fs::read_to_string(&weapon_qc)?;
        let qc_path = self.output_models.join(format!("{}.qc", kind.model_name()));
        std::fs::write(&qc_path, template.render(&weapon_qc_text))?;
        tracing::info!("QC generated: {}", qc_path.display());

        progress(ConvertPhase::Compile);
        let artifacts = match self.compiler.compile(&qc_path, &self.output_models)? {
            ToolOutcome::Success { artifacts } => artifacts,
            outcome => {
                return Err(Error::CompileFailed {
                    qc: qc_path,
                    reason: outcome.failure_reason().unwrap_or_default(),
                });
            }
        };

        progress(ConvertPhase::Scripts);
        let script_copied = self.copy_script();

        Ok(ConversionSummary {
            model_name: kind.model_name().to_string(),
            artifacts,
            materials: material_names,
            material_report,
            animations_included: template.include_model.is_some(),
            script_copied,
        })
    }

    fn decompile_first_smd(&self, model: &Path, output_dir: &Path) -> Result<PathBuf> {
        let outcome = self.decompiler.decompile(model, output_dir)?;
        match outcome {
            ToolOutcome::Success { artifacts } => {
                artifacts.into_iter().next().ok_or_else(|| Error::DecompileFailed {
                    model: model.to_path_buf(),
                    reason: "no output artifact produced".to_string(),
                })
            }
            outcome => Err(Error::DecompileFailed {
                model: model.to_path_buf(),
                reason: outcome.failure_reason().unwrap_or_default(),
            }),
        }
    }

    /// Copy a decompiled mesh into the output tree, named after its model.
    fn copy_mesh(&self, smd: &Path, model: &Path) -> Result<PathBuf> {
        let dest = self.output_models.join(format!("{}.smd", stem_of(model)));
        std::fs::copy(smd, &dest)?;
        tracing::info!("copied {} -> {}", smd.display(), dest.display());
        Ok(dest)
    }

    /// Decompile the `_anim` companion model and mirror its animation SMDs.
    ///
    /// Any missing piece downgrades to "no shared animations" rather than
    /// failing the conversion.
    fn copy_animations(&self, temp: &Path) -> Result<Option<String>> {
        if !self.anim_model.is_file() {
            tracing::debug!("no animation model at {}", self.anim_model.display());
            return Ok(None);
        }

        let anim_dir = temp.join("anim");
        let outcome = self.decompiler.decompile(&self.anim_model, &anim_dir)?;
        if let Some(reason) = outcome.failure_reason() {
            tracing::warn!("animation decompile failed: {reason}");
            return Ok(None);
        }
        if find_files_with_extension(&anim_dir, "qc").is_empty() {
            tracing::warn!("animation model produced no QC, skipping");
            return Ok(None);
        }

        let anim_stem = stem_of(&self.anim_model);
        let smd_dir = anim_dir.join(format!("{anim_stem}_anims"));
        if !smd_dir.is_dir() {
            tracing::warn!("no animation SMD directory at {}", smd_dir.display());
            return Ok(None);
        }

        let dest = self
            .output_models
            .join(format!("{}_anims", self.options.kind.model_name()));
        std::fs::create_dir_all(&dest)?;
        for smd in find_files_with_extension(&smd_dir, "smd") {
            let name = smd.file_name().unwrap_or_default();
            std::fs::copy(&smd, dest.join(name))?;
            tracing::info!("copied animation {}", name.to_string_lossy());
        }

        Ok(Some(format!("weapons/{anim_stem}.mdl")))
    }

    /// Ship the per-kind weapon script; failure is reported, not fatal.
    fn copy_script(&self) -> bool {
        let script = self.options.kind.script_name();
        let source = self.options.scripts_dir.join(script);
        let dest_dir = self.options.output_dir.join("scripts");

        let result = std::fs::create_dir_all(&dest_dir)
            .and_then(|()| std::fs::copy(&source, dest_dir.join(script)));
        match result {
            Ok(_) => {
                tracing::info!("copied script {script}");
                true
            }
            Err(e) => {
                tracing::warn!("script copy failed: {e}");
                false
            }
        }
    }
}

fn first_qc(dir: &Path) -> Result<PathBuf> {
    find_files_with_extension(dir, "qc")
        .into_iter()
        .next()
        .ok_or_else(|| Error::QcNotFound {
            dir: dir.to_path_buf(),
        })
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `v_knife_m9_bay.mdl` -> `v_knife_m9_bay_anim.mdl`, next to the weapon.
fn sibling_anim_model(weapon_model: &Path) -> PathBuf {
    weapon_model.with_file_name(format!("{}_anim.mdl", stem_of(weapon_model)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anim_model_is_derived_from_weapon_stem() {
        let anim = sibling_anim_model(Path::new("data/v_knife_m9_bay.mdl"));
        assert_eq!(anim, Path::new("data/v_knife_m9_bay_anim.mdl"));
    }

    #[test]
    fn test_missing_inputs_are_rejected_up_front() {
        let options = ConvertOptions {
            data_dir: "definitely/not/here".into(),
            game_dir: "nope".into(),
            output_dir: "out".into(),
            weapon_model: "w.mdl".into(),
            glove_model: "g.mdl".into(),
            kind: WeaponKind::Knife,
            decompiler: "crowbar.exe".into(),
            scripts_dir: "scripts".into(),
        };
        match Conversion::new(options) {
            Err(Error::MissingInput { description, .. }) => {
                assert_eq!(description, "Data directory");
            }
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }
}
