/*!
`git.rs`

Fixed git shortcuts. These never consult the config.

  tz fetch  | f          git fetch
  tz status | s          git status
  tz branch | br NAME    git checkout -b NAME   (NAME `-` -> git checkout -)
  tz log    | l [N] [-a] git log --oneline [-N]  (-a: full format)
  tz reset  | r [N]      git reset --soft HEAD~N (default 1)

Counts accept `5` or `-5` and must be at least 1.
*/

use anyhow::{Result, bail};
use clap::Args;

use crate::cmd::shared::parse_count;
use crate::executor;

/* -------------------------------------------------------------------------- */
/* Argument Structs                                                           */
/* -------------------------------------------------------------------------- */

#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Branch to create, or `-` to switch back to the previous branch
    #[arg(value_name = "NAME", allow_hyphen_values = true)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of commits to show (`5` or `-5`)
    #[arg(value_name = "COUNT", allow_negative_numbers = true)]
    pub count: Option<String>,

    /// Show the full log format instead of one line per commit
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Number of commits to undo (default 1)
    #[arg(value_name = "COUNT", allow_negative_numbers = true)]
    pub count: Option<String>,
}

/* -------------------------------------------------------------------------- */
/* Entry Points                                                               */
/* -------------------------------------------------------------------------- */

pub fn execute_fetch() -> Result<()> {
    executor::run("git fetch")?;
    Ok(())
}

pub fn execute_status() -> Result<()> {
    executor::run("git status")?;
    Ok(())
}

pub fn execute_branch(args: BranchArgs) -> Result<()> {
    executor::run(&branch_command(&args.name)?)?;
    Ok(())
}

pub fn execute_log(args: LogArgs) -> Result<()> {
    executor::run(&log_command(args.count.as_deref(), args.all)?)?;
    Ok(())
}

pub fn execute_reset(args: ResetArgs) -> Result<()> {
    executor::run(&reset_command(args.count.as_deref())?)?;
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Command Builders                                                           */
/* -------------------------------------------------------------------------- */

fn branch_command(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("branch name cannot be empty");
    }
    if name == "-" {
        return Ok("git checkout -".to_string());
    }
    Ok(format!("git checkout -b {}", shell_words::quote(name)))
}

fn log_command(count: Option<&str>, all: bool) -> Result<String> {
    let mut cmd = if all {
        "git log".to_string()
    } else {
        "git log --oneline".to_string()
    };
    if let Some(raw) = count {
        cmd.push_str(&format!(" -{}", parse_count(raw)?));
    }
    Ok(cmd)
}

fn reset_command(count: Option<&str>) -> Result<String> {
    let n = count.map(parse_count).transpose()?.unwrap_or(1);
    Ok(format!("git reset --soft HEAD~{n}"))
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_new_and_previous() {
        assert_eq!(branch_command("feature-x").unwrap(), "git checkout -b feature-x");
        assert_eq!(branch_command("-").unwrap(), "git checkout -");
        assert!(branch_command("  ").is_err());
    }

    #[test]
    fn branch_name_is_quoted() {
        assert_eq!(
            branch_command("x; rm -rf /").unwrap(),
            "git checkout -b 'x; rm -rf /'"
        );
    }

    #[test]
    fn log_variants() {
        assert_eq!(log_command(None, false).unwrap(), "git log --oneline");
        assert_eq!(log_command(Some("5"), false).unwrap(), "git log --oneline -5");
        assert_eq!(log_command(Some("-3"), true).unwrap(), "git log -3");
        assert_eq!(log_command(None, true).unwrap(), "git log");
    }

    #[test]
    fn log_rejects_bad_count() {
        let err = log_command(Some("many"), false).unwrap_err();
        assert_eq!(err.to_string(), "invalid count: many (must be a number)");
        let err = log_command(Some("0"), false).unwrap_err();
        assert_eq!(err.to_string(), "count must be at least 1");
    }

    #[test]
    fn reset_defaults_to_one() {
        assert_eq!(reset_command(None).unwrap(), "git reset --soft HEAD~1");
        assert_eq!(reset_command(Some("2")).unwrap(), "git reset --soft HEAD~2");
        assert_eq!(reset_command(Some("-4")).unwrap(), "git reset --soft HEAD~4");
        assert!(reset_command(Some("-0")).is_err());
    }
}
