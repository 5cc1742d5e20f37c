/*!
`run.rs`

Built-in verb subcommands: install | dev | test | build | clear.

Each one resolves the verb for the current project (stored mapping, or a
confirmed ecosystem suggestion) and runs the result through the shell.

  tz install [-D] [ARGS..]   -D appends the package manager's dev-dependency flag
  tz dev     [ARGS..]
  tz test    [ARGS..]
  tz build   [ARGS..]
  tz clear   [-a]            -a also deletes known lock files afterwards

Extra ARGS are appended verbatim after the mapped command.
*/

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::Context;
use crate::executor;
use crate::resolver::{append_args, apply_dev_modifier};
use crate::verb::Verb;

/// Lock files removed by `tz clear --all`.
pub const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "Gemfile.lock",
    "Cargo.lock",
    "poetry.lock",
];

/* -------------------------------------------------------------------------- */
/* Argument Structs                                                           */
/* -------------------------------------------------------------------------- */

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Extra arguments appended to the mapped command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Install as dev dependency (npm/yarn/pnpm/bun)
    #[arg(short = 'D', long = "dev")]
    pub dev: bool,

    /// Extra arguments appended to the mapped command (e.g. package names)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Also remove lock files (package-lock.json, yarn.lock, etc.)
    #[arg(short, long)]
    pub all: bool,
}

/* -------------------------------------------------------------------------- */
/* Entry Points                                                               */
/* -------------------------------------------------------------------------- */

/// dev / test / build.
pub fn execute_run(ctx: &Context, verb: Verb, args: RunArgs) -> Result<()> {
    let mut store = ctx.load_store()?;
    let resolved = ctx.resolve(&mut store, verb.as_str(), &args.args)?;
    executor::run(&resolved.command)?;
    Ok(())
}

pub fn execute_install(ctx: &Context, args: InstallArgs) -> Result<()> {
    let mut store = ctx.load_store()?;
    let resolved = ctx.resolve(&mut store, Verb::Install.as_str(), &[])?;
    let command = install_command(&resolved.command, args.dev, &args.args)?;
    executor::run(&command)?;
    Ok(())
}

pub fn execute_clear(ctx: &Context, args: ClearArgs) -> Result<()> {
    let mut store = ctx.load_store()?;
    let resolved = ctx.resolve(&mut store, Verb::Clear.as_str(), &[])?;
    executor::run(&resolved.command)?;

    if args.all {
        let sweep = remove_lock_files(&ctx.project_dir);
        for name in &sweep.removed {
            ctx.note("info", format!("Removed {name}"));
        }
        for (name, err) in &sweep.failed {
            ctx.note("warn", format!("Could not remove {name}: {err}"));
        }
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Helpers                                                                    */
/* -------------------------------------------------------------------------- */

/// Dev flag goes right after the base command, package names after that.
fn install_command(base: &str, dev: bool, extra: &[String]) -> Result<String> {
    let base = if dev {
        apply_dev_modifier(base)?
    } else {
        base.to_string()
    };
    Ok(append_args(&base, extra))
}

/// Outcome of a lock-file sweep.
#[derive(Debug, Default)]
struct LockSweep {
    removed: Vec<&'static str>,
    failed: Vec<(&'static str, std::io::Error)>,
}

/// Delete any known lock file in `dir`. Failures are reported, not fatal.
fn remove_lock_files(dir: &Path) -> LockSweep {
    let mut sweep = LockSweep::default();
    for name in LOCK_FILES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => sweep.removed.push(*name),
            Err(e) => {
                crate::log_debug!("clear: remove {} failed: {e}", path.display());
                sweep.failed.push((*name, e));
            }
        }
    }
    sweep
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
