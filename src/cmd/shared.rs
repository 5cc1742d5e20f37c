/*!
shared.rs - state and helpers shared by every subcommand.

`Context` carries what used to be process-wide flags: config location,
project directory, batch mode and quiet mode. Each `execute_*` receives it
explicitly.
*/

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::config::{ConfigFile, Store};
use crate::prompt::{AssumeYes, Confirmer, Prompt};
use crate::resolver::{Origin, Resolved, Resolver};

/* ---- Context ---- */

#[derive(Debug, Clone)]
pub struct Context {
    pub config: ConfigFile,
    pub project_dir: PathBuf,
    pub assume_yes: bool,
    pub quiet: bool,
}

impl Context {
    /// Store key for the project directory (absolute, not canonicalized).
    pub fn project_key(&self) -> String {
        project_key(&self.project_dir)
    }

    pub fn load_store(&self) -> Result<Store> {
        self.config.load().context("failed to load config")
    }

    pub fn save_store(&self, store: &Store) -> Result<()> {
        self.config.save(store).context("failed to save config")
    }

    /// User-facing status line on stdout (suppressed by --quiet).
    pub fn note(&self, tag: &str, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let style = StyleOptions::detect();
        let mark = emoji(tag, &style);
        let text = if mark.is_empty() {
            msg.as_ref().to_string()
        } else {
            format!("{mark} {}", msg.as_ref())
        };
        let role = match tag {
            "success" => Role::Success,
            "warn" => Role::Warning,
            _ => Role::Dim,
        };
        println!("{}", color(role, text, &style));
    }

    /// Resolve `verb` for this project, prompting on stdin unless `--yes`.
    pub fn resolve(&self, store: &mut Store, verb: &str, args: &[String]) -> Result<Resolved> {
        let mut confirmer: Box<dyn Confirmer> = if self.assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(Prompt::stdio())
        };
        let key = self.project_key();
        let resolved = Resolver::new(store, &self.config, &mut *confirmer).resolve(
            &self.project_dir,
            &key,
            verb,
            args,
        )?;
        if let Origin::Suggested(_) = resolved.origin
            && let Ok(saved) = store.get_command(&key, verb)
        {
            self.note("success", format!("Saved mapping: {verb} -> \"{saved}\"\n"));
        }
        Ok(resolved)
    }
}

/* ---- Project Path ---- */

/// Absolute project directory: `--project` (made absolute) or the working directory.
pub fn project_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => std::path::absolute(p)
            .with_context(|| format!("failed to resolve project path: {}", p.display())),
        None => std::env::current_dir().context("failed to get current project path"),
    }
}

pub fn project_key(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

/* ---- Count Arguments ---- */

/// Parse a commit count such as `5` or `-5` (git's own spelling). Must be >= 1.
pub fn parse_count(raw: &str) -> Result<u32> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let count: i64 = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid count: {raw} (must be a number)"))?;
    if count < 1 {
        anyhow::bail!("count must be at least 1");
    }
    u32::try_from(count).map_err(|_| anyhow::anyhow!("invalid count: {raw} (too large)"))
}

/* ---- Tests ---- */
