/*!
`init.rs`

Interactive setup of all five built-in verbs for the current project.

Per verb, in order install, dev, test, build, clear:
  1. Already configured -> "Keep this? (Y/n)"; keeping moves on.
  2. Suggestion available -> "Accept suggestion? (y/n/custom)"
       y / yes / empty -> suggestion
       n / no          -> ask for a command (empty skips)
       anything else   -> taken as the command itself
  3. No suggestion -> ask for a command (empty skips)

The config file is written once, after the last verb. With `--yes` stdin is
not read: existing mappings are kept and suggestions accepted.
*/

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::cmd::shared::Context;
use crate::config::Store;
use crate::detector;
use crate::prompt::{Prompt, parse_yes_no};
use crate::verb::Verb;

/// What happened to each verb during one init run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitSummary {
    pub saved: Vec<(Verb, String)>,
    pub kept: Vec<Verb>,
    pub skipped: Vec<Verb>,
}

pub fn execute_init(ctx: &Context) -> Result<()> {
    let mut store = ctx.load_store()?;
    let key = ctx.project_key();

    let summary = if ctx.assume_yes {
        let mut prompt = Prompt::new(io::empty(), io::stdout());
        run_init(&mut store, &ctx.project_dir, &key, &mut prompt)?
    } else {
        let mut prompt = Prompt::stdio();
        run_init(&mut store, &ctx.project_dir, &key, &mut prompt)?
    };
    crate::log_debug!(
        "init: {} saved, {} kept, {} skipped",
        summary.saved.len(),
        summary.kept.len(),
        summary.skipped.len()
    );

    ctx.save_store(&store)?;

    let aliases: Vec<String> = Verb::variants()
        .iter()
        .map(|v| format!("tz {} ({v})", v.alias()))
        .collect();
    if ctx.quiet {
        return Ok(());
    }
    println!();
    ctx.note("success", "Configuration complete!");
    println!("\nYou can now use:\n  {}", aliases.join(", "));
    Ok(())
}

/// Drive the questionnaire against `prompt`, updating `store` in memory only.
pub fn run_init<R: BufRead, W: Write>(
    store: &mut Store,
    project_dir: &Path,
    project_key: &str,
    prompt: &mut Prompt<R, W>,
) -> Result<InitSummary> {
    let eco = detector::detect(project_dir);
    prompt.say(format!(
        "Initializing tz for current project:\n  {project_key}\n\n"
    ))?;
    if eco.is_known() {
        prompt.say(format!("Detected: {eco} project\n\n"))?;
    } else {
        prompt.say("Project type: Unknown (manual configuration required)\n\n")?;
    }

    let mut summary = InitSummary::default();
    for verb in Verb::variants() {
        let name = verb.as_str();

        if let Ok(existing) = store.get_command(project_key, name) {
            prompt.say(format!("✓ '{name}' already configured: {existing}\n"))?;
            if prompt.ask_yes_no("  Keep this?", true)? {
                summary.kept.push(*verb);
                continue;
            }
        }

        prompt.say(format!("\nCommand: {name}\n"))?;
        let chosen = match detector::suggest(eco, *verb) {
            Some(suggested) => {
                prompt.say(format!("Suggested: {suggested}\n"))?;
                let answer = prompt.ask_line("Accept suggestion? (y/n/custom): ")?;
                match parse_yes_no(&answer) {
                    _ if answer.is_empty() => Some(suggested.to_string()),
                    Some(true) => Some(suggested.to_string()),
                    Some(false) => ask_command(prompt, name)?,
                    None => Some(answer),
                }
            }
            None => ask_command(prompt, name)?,
        };

        match chosen {
            Some(cmd) => {
                store.set_command(project_key, name, cmd.as_str());
                prompt.say(format!("  ✓ Saved: {name} -> \"{cmd}\"\n"))?;
                summary.saved.push((*verb, cmd));
            }
            None => {
                prompt.say(format!("  ⊘ Skipped: {name}\n"))?;
                summary.skipped.push(*verb);
            }
        }
    }
    Ok(summary)
}

fn ask_command<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    name: &str,
) -> Result<Option<String>> {
    let cmd = prompt.ask_line(&format!(
        "Enter command for '{name}' (or press Enter to skip): "
    ))?;
    Ok((!cmd.is_empty()).then_some(cmd))
}

/* ---- Tests ---- */
