//! Error types for `skinforge`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `skinforge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Input Validation Errors ====================
    /// A required input file or directory does not exist.
    #[error("{description} not found: {path}")]
    MissingInput {
        /// What the path was expected to be (e.g. "Weapon model").
        description: &'static str,
        /// The path that was checked.
        path: PathBuf,
    },

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    // ==================== Decompile/Compile Errors ====================
    /// The decompiler ran but no usable geometry came out of it.
    #[error("decompiling {model} failed: {reason}")]
    DecompileFailed {
        /// The model that was being decompiled.
        model: PathBuf,
        /// Why the run is considered failed (timeout, exit code, no artifact).
        reason: String,
    },

    /// The compiler ran but did not produce the expected model files.
    #[error("compiling {qc} failed: {reason}")]
    CompileFailed {
        /// The QC descriptor that was being compiled.
        qc: PathBuf,
        /// Why the run is considered failed (timeout, exit code, no artifact).
        reason: String,
    },

    /// Decompilation finished but left no QC descriptor behind.
    #[error("no QC descriptor found in {dir}")]
    QcNotFound {
        /// The decompiler output directory that was searched.
        dir: PathBuf,
    },
}

/// A specialized Result type for `skinforge` operations.
pub type Result<T> = std::result::Result<T, Error>;
