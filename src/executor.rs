/*!
executor.rs - run resolved command strings through the system shell.

Modes:
  - run(command)    : inherit stdin/stdout/stderr, stream live, wait for exit
  - output(command) : capture stdout + stderr as text instead of streaming

The command string is handed to `sh -c` (`cmd /C` on Windows) untouched, so
pipes, redirects and `&&` chains are interpreted by that shell. No timeout is
applied and signals are not intercepted: Ctrl-C reaches the child through the
terminal's process group.
*/

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::error::{Error, Result};

fn shell(command: &str) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.arg("/C");
        c
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut c = Command::new("sh");
        c.arg("-c");
        c
    };
    cmd.arg(command);
    cmd
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(Error::Spawn)
}

fn check(status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed { status })
    }
}

/// Run `command` with the parent's standard streams attached.
pub fn run(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(Error::EmptyCommand);
    }
    crate::log_debug!("exec: sh -c {:?}", command);

    let rt = runtime()?;
    let status = rt.block_on(async {
        shell(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(Error::Spawn)
    })?;
    crate::log_trace!("exec: exited with {status}");
    check(status)
}

/// Run `command` and return its trimmed combined output (stdout then stderr).
/// On a non-zero exit the same text travels in `Error::CapturedFailed`.
pub fn output(command: &str) -> Result<String> {
    if command.trim().is_empty() {
        return Err(Error::EmptyCommand);
    }
    crate::log_debug!("exec (captured): sh -c {:?}", command);

    let rt = runtime()?;
    let out = rt.block_on(async {
        shell(command)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(Error::Spawn)
    })?;

    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    let text = text.trim().to_string();
    if !out.status.success() {
        return Err(Error::CapturedFailed {
            status: out.status,
            output: text,
        });
    }
    Ok(text)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn empty_command_never_spawns() {
        assert!(matches!(run(""), Err(Error::EmptyCommand)));
        assert!(matches!(run("   "), Err(Error::EmptyCommand)));
        assert!(matches!(output(""), Err(Error::EmptyCommand)));
    }

    #[test]
    fn successful_command() {
        run("true").unwrap();
    }

    #[test]
    fn failing_command_reports_status() {
        let err = run("exit 3").unwrap_err();
        match err {
            Error::CommandFailed { status } => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn captured_output_combines_streams() {
        let text = output("echo out; echo err 1>&2").unwrap();
        assert_eq!(text, "out\nerr");
    }

    #[test]
    fn captured_failure_keeps_output() {
        let err = output("echo partial; echo broken 1>&2; exit 2").unwrap_err();
        match err {
            Error::CapturedFailed { status, output } => {
                assert_eq!(status.code(), Some(2));
                assert_eq!(output, "partial\nbroken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shell_operators_are_honoured() {
        assert_eq!(output("printf 'a b' | wc -w | tr -d ' '").unwrap(), "2");
        assert!(output("false && echo never").is_err());
    }
}
