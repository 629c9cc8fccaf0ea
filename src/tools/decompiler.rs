//! Model decompiler wrapper (Crowbar)

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::runner::run_with_timeout;
use super::{ToolOutcome, find_files_with_extension};
use crate::Result;

/// Deadline for a single decompile run.
pub const DECOMPILE_TIMEOUT: Duration = Duration::from_secs(30);

/// Wraps the external decompiler executable.
///
/// The decompiler is invoked as `<exe> <model> <output_dir>` and signals
/// nothing useful through its exit status alone - a run only counts as
/// successful once SMD geometry shows up under the output directory.
#[derive(Debug, Clone)]
pub struct Decompiler {
    executable: PathBuf,
}

impl Decompiler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Decompile `model` into `output_dir`.
    pub fn decompile(&self, model: &Path, output_dir: &Path) -> Result<ToolOutcome> {
        std::fs::create_dir_all(output_dir)?;

        let mut command = Command::new(&self.executable);
        command.arg(model).arg(output_dir);

        tracing::debug!("decompiling {} -> {}", model.display(), output_dir.display());
        let output = run_with_timeout(command, DECOMPILE_TIMEOUT)?;

        if output.timed_out() {
            return Ok(ToolOutcome::TimedOut {
                seconds: DECOMPILE_TIMEOUT.as_secs(),
            });
        }
        if !output.success() {
            return Ok(ToolOutcome::NonZeroExit {
                code: output.status.and_then(|s| s.code()),
                stderr: output.stderr,
            });
        }

        let smds = find_files_with_extension(output_dir, "smd");
        if smds.is_empty() {
            Ok(ToolOutcome::NoArtifactProduced)
        } else {
            tracing::debug!("found {} SMD files", smds.len());
            Ok(ToolOutcome::Success { artifacts: smds })
        }
    }
}
