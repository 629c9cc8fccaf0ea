//! External tool orchestration
//!
//! Decompiling and compiling run through third-party executables. Every run
//! is bounded by a timeout, and "the process exited 0" is never taken to
//! mean "the work happened" - each wrapper verifies that the expected output
//! artifacts actually landed on disk.

mod compiler;
mod decompiler;
mod runner;

pub use compiler::{COMPILE_TIMEOUT, Compiler, MIN_COMPILED_FILES};
pub use decompiler::{DECOMPILE_TIMEOUT, Decompiler};
pub use runner::{ProcessOutput, run_with_timeout};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Outcome of one external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The run produced the expected artifacts.
    Success {
        /// Output files confirmed on disk.
        artifacts: Vec<PathBuf>,
    },
    /// The process was killed after exceeding its deadline.
    TimedOut {
        /// The deadline that was exceeded, in seconds.
        seconds: u64,
    },
    /// The process exited with a failure status.
    NonZeroExit {
        /// Exit code, when the platform reported one.
        code: Option<i32>,
        /// Captured stderr text.
        stderr: String,
    },
    /// The process exited cleanly but the expected artifacts never appeared.
    NoArtifactProduced,
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success { .. })
    }

    /// Human-readable failure description; `None` for successes.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            ToolOutcome::Success { .. } => None,
            ToolOutcome::TimedOut { seconds } => Some(format!("timed out after {seconds}s")),
            ToolOutcome::NonZeroExit { code, stderr } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    Some(format!("exit code {code}"))
                } else {
                    Some(format!("exit code {code}: {stderr}"))
                }
            }
            ToolOutcome::NoArtifactProduced => Some("no output artifact produced".to_string()),
        }
    }
}

/// Find all files with the given extension under `dir`, recursively, sorted.
pub(crate) fn find_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}
