/*!
`map.rs`

Implements `tz map`, which stores a verb -> shell command mapping.

  tz map <verb> <command>            project mapping (current directory)
  tz map -g <verb> <command>         global mapping (custom verbs only)
  tz map --file mappings.(json|yaml) bulk mapping from a file, optionally -g

Built-in verbs (install, dev, test, build, clear) are project-scoped; mapping
one globally is rejected. Mapping file root must be an object of
verb -> command; non-string values are stored in their JSON text form.
*/

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::Args;

use crate::cmd::shared::Context;
use crate::config::Store;
use crate::verb::{Verb, VerbName};

/* -------------------------------------------------------------------------- */
/* Argument Struct                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Verb to map (install, dev, test, build, clear, or any custom name)
    #[arg(
        value_name = "VERB",
        required_unless_present = "file",
        requires = "command"
    )]
    pub verb: Option<String>,

    /// Shell command the verb runs
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Set the mapping globally (usable from any directory)
    #[arg(short, long)]
    pub global: bool,

    /// Load mappings from a JSON or YAML file
    #[arg(long, value_name = "PATH", conflicts_with = "verb")]
    pub file: Option<PathBuf>,
}

/* -------------------------------------------------------------------------- */
/* Public Entry Point                                                         */
/* -------------------------------------------------------------------------- */

pub fn execute_map(ctx: &Context, args: MapArgs) -> Result<()> {
    let pairs: Vec<(String, String)> = match (&args.file, args.verb, args.command) {
        (Some(path), _, _) => load_mapping_file(path)?.into_iter().collect(),
        (None, Some(verb), Some(command)) => vec![(verb, command)],
        _ => bail!("usage: tz map <verb> <command> (or --file <PATH>)"),
    };
    if pairs.is_empty() {
        bail!("no mappings to apply");
    }

    let mut store = ctx.load_store()?;
    let key = ctx.project_key();
    for (verb, command) in &pairs {
        apply_mapping(&mut store, &key, verb, command, args.global)?;
    }
    ctx.save_store(&store)?;

    for (verb, command) in &pairs {
        if args.global {
            ctx.note("success", format!("Mapped '{verb}' to '{command}' globally"));
        } else {
            ctx.note(
                "success",
                format!("Mapped '{verb}' to '{command}' for project:\n  {key}"),
            );
        }
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Core Logic                                                                 */
/* -------------------------------------------------------------------------- */

fn apply_mapping(
    store: &mut Store,
    project_key: &str,
    verb: &str,
    command: &str,
    global: bool,
) -> Result<()> {
    let verb = verb.trim();
    if verb.is_empty() {
        bail!("verb cannot be empty");
    }
    if command.trim().is_empty() {
        bail!("command for '{verb}' cannot be empty");
    }
    if let VerbName::Custom(name) = VerbName::parse(verb)
        && let Some(builtin) = Verb::from_str_ci(name)
    {
        crate::log_warn!(
            "'{name}' is stored as a custom verb; the built-in is spelled '{builtin}'"
        );
    }

    if global {
        store
            .set_global(verb, command)
            .with_context(|| format!("failed to set global command '{verb}'"))?;
    } else {
        store.set_command(project_key, verb, command);
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Mapping File Loading                                                       */
/* -------------------------------------------------------------------------- */

fn load_mapping_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapping file: {}", path.display()))?;
    let lower = path.to_string_lossy().to_ascii_lowercase();

    let value: serde_json::Value = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let yaml_v: serde_yaml::Value =
            serde_yaml::from_str(&raw).context("failed to parse YAML mapping file")?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON mapping file")?
    };

    let obj = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("mapping file root must be an object"))?;

    Ok(obj
        .iter()
        .map(|(k, v)| {
            let s = match v {
                serde_json::Value::String(sv) => sv.clone(),
                other => other.to_string(),
            };
            (k.clone(), s)
        })
        .collect())
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
