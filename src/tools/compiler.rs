//! Model compiler wrapper (studiomdl)

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::ToolOutcome;
use super::runner::run_with_timeout;
use crate::Result;

/// Deadline for a single compile run.
pub const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

/// A complete model is at least `.mdl` + `.vvd` + `.vtx`.
pub const MIN_COMPILED_FILES: usize = 3;

/// Wraps the destination engine's model compiler.
///
/// studiomdl writes its output under `<game>/models/weapons` relative to the
/// `-game` directory, so each run gets a throwaway game dir seeded with the
/// real `gameinfo.txt`; compiled files are then moved up into the work dir.
#[derive(Debug, Clone)]
pub struct Compiler {
    executable: PathBuf,
    gameinfo: PathBuf,
}

impl Compiler {
    pub fn new(executable: impl Into<PathBuf>, gameinfo: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            gameinfo: gameinfo.into(),
        }
    }

    /// Compile the descriptor at `qc`, leaving the model files in `work_dir`.
    pub fn compile(&self, qc: &Path, work_dir: &Path) -> Result<ToolOutcome> {
        let temp_game = work_dir.join("temp_game");
        std::fs::create_dir_all(&temp_game)?;
        std::fs::copy(&self.gameinfo, temp_game.join("gameinfo.txt"))?;

        let mut command = Command::new(&self.executable);
        command
            .arg("-verbose")
            .arg("-game")
            .arg(&temp_game)
            .arg("-nop4")
            .arg(qc)
            .current_dir(work_dir);

        tracing::debug!("compiling {}", qc.display());
        let output = run_with_timeout(command, COMPILE_TIMEOUT)?;
        if !output.stdout.is_empty() {
            tracing::debug!("compiler output:\n{}", tail(&output.stdout, 1000));
        }

        let outcome = if output.timed_out() {
            ToolOutcome::TimedOut {
                seconds: COMPILE_TIMEOUT.as_secs(),
            }
        } else if !output.success() {
            ToolOutcome::NonZeroExit {
                code: output.status.and_then(|s| s.code()),
                stderr: output.stderr,
            }
        } else {
            self.claim_artifacts(qc, work_dir, &temp_game)?
        };

        let _ = std::fs::remove_dir_all(&temp_game);
        Ok(outcome)
    }

    /// Move compiled files matching the QC stem out of the throwaway game
    /// dir. Fewer than [`MIN_COMPILED_FILES`] means the compile silently
    /// produced garbage.
    fn claim_artifacts(&self, qc: &Path, work_dir: &Path, temp_game: &Path) -> Result<ToolOutcome> {
        let qc_stem = qc
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let models_dir = temp_game.join("models").join("weapons");

        let mut artifacts = Vec::new();
        if models_dir.is_dir() {
            for entry in std::fs::read_dir(&models_dir)? {
                let path = entry?.path();
                let matches_stem = path
                    .file_stem()
                    .is_some_and(|s| s.to_string_lossy().starts_with(&qc_stem));
                if path.is_file() && matches_stem {
                    let dest = work_dir.join(path.file_name().unwrap_or_default());
                    std::fs::rename(&path, &dest)?;
                    tracing::debug!("created {}", dest.display());
                    artifacts.push(dest);
                }
            }
        }

        if artifacts.len() >= MIN_COMPILED_FILES {
            artifacts.sort();
            Ok(ToolOutcome::Success { artifacts })
        } else {
            Ok(ToolOutcome::NoArtifactProduced)
        }
    }
}

fn tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
