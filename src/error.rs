//! Domain errors for resolution, persistence and execution.
//!
//! Subcommands wrap these in `anyhow` with extra context; `main` prints the
//! chain and exits with status 1.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine home directory")]
    HomeDir,

    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write config {}", path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No stored command for this (project, verb). Recoverable by the resolver.
    #[error("no mapping found for '{verb}' in project: {project}")]
    NotMapped { project: String, verb: String },

    /// No stored command and nothing could be suggested.
    #[error(
        "no mapping found for '{verb}' in this project\n\nTip: Run 'tz map {verb} \"<your-{verb}-command>\"' to set it up"
    )]
    NoMapping { verb: String },

    #[error("cancelled")]
    Cancelled,

    #[error("-D flag is only supported for npm/yarn/pnpm/bun projects\nCurrent command: {command}")]
    UnsupportedModifier { command: String },

    #[error("'{verb}' is a built-in command and can only be mapped per project")]
    GlobalBuiltin { verb: String },

    #[error("empty command")]
    EmptyCommand,

    #[error("failed to spawn shell")]
    Spawn(#[source] std::io::Error),

    #[error("command failed: {status}")]
    CommandFailed { status: ExitStatus },

    /// Captured-mode failure; `output` is the trimmed stdout + stderr text.
    #[error("command failed: {status}")]
    CapturedFailed { status: ExitStatus, output: String },
}

pub type Result<T> = std::result::Result<T, Error>;
