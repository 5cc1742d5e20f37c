/*!
`clone.rs`

Implements `tz clone <repository>`: `git clone` into the current directory,
then open the new checkout in an editor.

Editor selection: `--editor` > `TZ_EDITOR` env var > `code`.
A missing editor is not an error; the clone already succeeded, so a hint is
printed instead. `--no-open` skips the editor step entirely.
*/

use anyhow::{Context as _, Result};
use clap::Args;

use crate::cmd::shared::Context;
use crate::error::Error;
use crate::executor;
use crate::repo::{self, RepoSpec};

/// Environment variable naming the editor command.
pub const EDITOR_ENV: &str = "TZ_EDITOR";
const DEFAULT_EDITOR: &str = "code";

#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository URL (https://, ssh://, git@host:path) or local path
    #[arg(value_name = "REPOSITORY")]
    pub url: String,

    /// Editor command used to open the clone (falls back to TZ_EDITOR, then `code`)
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Clone only; do not open an editor
    #[arg(long)]
    pub no_open: bool,
}

pub fn execute_clone(ctx: &Context, args: CloneArgs) -> Result<()> {
    let spec = repo::parse_repo(&args.url)?;
    let name = spec.project_name().with_context(|| {
        format!("failed to extract project name from URL: {}", args.url)
    })?;
    crate::log_debug!("clone: {spec} -> ./{name} (remote: {})", spec.is_remote());

    ctx.note("clone", format!("Cloning {}...", spec.original()));
    executor::run(&clone_command(&spec)).context("failed to clone repository")?;

    if args.no_open {
        ctx.note("success", format!("Cloned {name}"));
        return Ok(());
    }

    let editor = pick_editor(args.editor);
    if !editor_available(&editor) {
        if !ctx.quiet {
            println!("{}", missing_editor_hint(&editor, &name));
        }
        return Ok(());
    }

    ctx.note("info", format!("Opening {name} in {editor}..."));
    executor::run(&format!("{editor} {}", shell_words::quote(&name)))
        .with_context(|| format!("failed to open {name} in {editor}"))?;
    ctx.note("success", format!("Successfully cloned and opened {name}"));
    Ok(())
}

/* ---- Helpers ---- */

fn clone_command(spec: &RepoSpec) -> String {
    format!("git clone {}", shell_words::quote(spec.original()))
}

fn pick_editor(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var(EDITOR_ENV).ok())
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Whether the editor's program (first word) resolves on PATH.
fn editor_available(editor: &str) -> bool {
    let program = shell_words::split(editor)
        .ok()
        .and_then(|words| words.into_iter().next())
        .unwrap_or_else(|| editor.to_string());

    #[cfg(windows)]
    let probe = format!("where {program}");
    #[cfg(not(windows))]
    let probe = format!("command -v {}", shell_words::quote(&program));

    match executor::output(&probe) {
        Ok(found) => {
            crate::log_trace!("clone: editor {program} at {found}");
            true
        }
        Err(Error::CapturedFailed { status, output }) => {
            crate::log_debug!("clone: {program} not found ({status}): {output}");
            false
        }
        Err(e) => {
            crate::log_debug!("clone: editor probe failed: {e}");
            false
        }
    }
}

fn missing_editor_hint(editor: &str, name: &str) -> String {
    let mut out = String::new();
    if editor == DEFAULT_EDITOR {
        out.push_str("\n⚠ VS Code 'code' command not found in PATH.\n");
        out.push_str("To enable it:\n");
        out.push_str("  1. Open VS Code\n");
        out.push_str("  2. Press Cmd+Shift+P\n");
        out.push_str("  3. Type 'shell command' and select 'Install code command in PATH'\n");
    } else {
        out.push_str(&format!("\n⚠ Editor '{editor}' not found in PATH.\n"));
        out.push_str(&format!("Set --editor or {EDITOR_ENV} to a command on your PATH.\n"));
    }
    out.push_str(&format!("\nRepository cloned successfully to: {name}"));
    out
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_command_quotes_input() {
        let spec = repo::parse_repo("git@github.com:user/repo.git").unwrap();
        assert_eq!(clone_command(&spec), "git clone git@github.com:user/repo.git");
        let spec = repo::parse_repo("my repo").unwrap();
        assert_eq!(clone_command(&spec), "git clone 'my repo'");
    }

    #[test]
    fn explicit_editor_wins() {
        assert_eq!(pick_editor(Some("zed".into())), "zed");
        assert_eq!(pick_editor(Some("  nvim ".into())), "nvim");
    }

    #[test]
    fn vscode_hint() {
        let hint = missing_editor_hint("code", "repo");
        assert!(hint.contains("VS Code 'code' command not found"));
        assert!(hint.contains("Install code command in PATH"));
        assert!(hint.ends_with("Repository cloned successfully to: repo"));
    }

    #[test]
    fn other_editor_hint() {
        let hint = missing_editor_hint("subl -n", "app");
        assert!(hint.contains("Editor 'subl -n' not found"));
        assert!(hint.contains(EDITOR_ENV));
    }

    #[cfg(unix)]
    #[test]
    fn editor_probe() {
        assert!(editor_available("sh -c true"));
        assert!(!editor_available("tz-definitely-not-an-editor-xyz"));
    }
}
