use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

mod cmd;
mod config;
mod detector;
mod error;
mod executor;
mod prompt;
mod repo;
mod resolver;
mod utils;
mod verb;

use cmd::format::{Role, StyleOptions, color};
use cmd::{
    BranchArgs, ClearArgs, CloneArgs, Context, InstallArgs, ListArgs, LogArgs, MapArgs, ResetArgs,
    RunArgs,
};
use config::ConfigFile;
use verb::Verb;

/// tz - one set of short verbs for every project.
///
/// Command layout:
///   tz install|i [-D] [ARGS..]    tz dev|d [ARGS..]    tz test|t [ARGS..]
///   tz build|b [ARGS..]           tz clear|c [-a]
///   tz init                       interactive setup of the five verbs
///   tz map <verb> <command> [-g]  store a mapping (or --file PATH)
///   tz list|ls [--json]           show mappings
///   tz <custom> [ARGS..]          project or global custom verb
///   tz fetch|f  status|s  branch|br NAME  log|l [N] [-a]  reset|r [N]
///   tz clone <url> [--editor CMD] [--no-open]
///
/// Unmapped built-in verbs are auto-detected from project marker files
/// (package.json, go.mod, Cargo.toml, ...) and saved after confirmation.
///
/// Global flags / env:
///   -v / -vv / -vvv   Increase log verbosity (stderr)
///   -q / --quiet      Errors only, no status lines
///   -y / --yes        Accept suggestions without prompting
///   --config PATH     Config file (or TZ_CONFIG env; default ~/.tz/config.json)
///   -C / --project    Run as if started in DIR
#[derive(Parser, Debug)]
#[command(
    name = "tz",
    version,
    author,
    about = "tz - short verbs (install, dev, test, build, clear) mapped per project",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Accept detected suggestions without asking
    #[arg(short = 'y', long = "yes", global = true)]
    yes: bool,

    /// Config file location (falls back to TZ_CONFIG, then ~/.tz/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "project", global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install dependencies
    #[command(visible_alias = "i")]
    Install(InstallArgs),

    /// Start the development server
    #[command(visible_alias = "d")]
    Dev(RunArgs),

    /// Run tests
    #[command(visible_alias = "t")]
    Test(RunArgs),

    /// Build the project
    #[command(visible_alias = "b")]
    Build(RunArgs),

    /// Clean build artifacts
    #[command(visible_alias = "c")]
    Clear(ClearArgs),

    /// Interactively configure all built-in verbs for this project
    Init,

    /// Map a verb to a shell command
    Map(MapArgs),

    /// Show mapped commands
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// git fetch
    #[command(visible_alias = "f")]
    Fetch,

    /// git status
    #[command(visible_alias = "s")]
    Status,

    /// Create and check out a branch (`-` switches back)
    #[command(visible_alias = "br")]
    Branch(BranchArgs),

    /// Compact git log
    #[command(visible_alias = "l")]
    Log(LogArgs),

    /// Soft reset the last N commits
    #[command(visible_alias = "r")]
    Reset(ResetArgs),

    /// Clone a repository and open it in an editor
    Clone(CloneArgs),

    /// Custom verb mapped with `tz map`
    #[command(external_subcommand)]
    Custom(Vec<String>),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let style = StyleOptions::detect();
            eprintln!("{} {e:#}", color(Role::Error, "error:", &style));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ConfigFile::locate(cli.config)?;
    let project_dir = cmd::shared::project_dir(cli.project.as_deref())?;
    if cli.project.is_some() {
        // Mapped commands run in the project, not where tz was started.
        std::env::set_current_dir(&project_dir).with_context(|| {
            format!("failed to enter project directory: {}", project_dir.display())
        })?;
    }
    crate::log_debug!(
        "config={} project={}",
        config.path().display(),
        project_dir.display()
    );

    let ctx = Context {
        config,
        project_dir,
        assume_yes: cli.yes,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Install(args) => cmd::execute_install(&ctx, args),
        Commands::Dev(args) => cmd::execute_run(&ctx, Verb::Dev, args),
        Commands::Test(args) => cmd::execute_run(&ctx, Verb::Test, args),
        Commands::Build(args) => cmd::execute_run(&ctx, Verb::Build, args),
        Commands::Clear(args) => cmd::execute_clear(&ctx, args),
        Commands::Init => cmd::execute_init(&ctx),
        Commands::Map(args) => cmd::execute_map(&ctx, args),
        Commands::List(args) => cmd::execute_list(&ctx, args),
        Commands::Fetch => cmd::execute_fetch(),
        Commands::Status => cmd::execute_status(),
        Commands::Branch(args) => cmd::execute_branch(args),
        Commands::Log(args) => cmd::execute_log(args),
        Commands::Reset(args) => cmd::execute_reset(args),
        Commands::Clone(args) => cmd::execute_clone(&ctx, args),
        Commands::Custom(argv) => cmd::execute_custom(&ctx, argv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_and_trailing_args() {
        let cli = Cli::try_parse_from(["tz", "t", "--watch", "src/"]).unwrap();
        match cli.command {
            Commands::Test(a) => assert_eq!(a.args, vec!["--watch", "src/"]),
            other => panic!("unexpected {other:?}"),
        }
        let cli = Cli::try_parse_from(["tz", "i", "-D", "lodash"]).unwrap();
        match cli.command {
            Commands::Install(a) => {
                assert!(a.dev);
                assert_eq!(a.args, vec!["lodash"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_verb_is_custom() {
        let cli = Cli::try_parse_from(["tz", "seed", "--fresh"]).unwrap();
        match cli.command {
            Commands::Custom(argv) => assert_eq!(argv, vec!["seed", "--fresh"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_counts_parse() {
        let cli = Cli::try_parse_from(["tz", "l", "-5", "-a"]).unwrap();
        match cli.command {
            Commands::Log(a) => {
                assert_eq!(a.count.as_deref(), Some("-5"));
                assert!(a.all);
            }
            other => panic!("unexpected {other:?}"),
        }
        let cli = Cli::try_parse_from(["tz", "br", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Branch(b) if b.name == "-"));
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = Cli::try_parse_from(["tz", "map", "-g", "notes", "vim notes.md", "-y"]).unwrap();
        assert!(cli.yes);
        match cli.command {
            Commands::Map(a) => {
                assert!(a.global);
                assert_eq!(a.verb.as_deref(), Some("notes"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
