/*!
`list.rs`

Implements `tz list` (alias `ls`): show what every verb resolves to for the
current project, plus the global mappings.

Scopes shown in the human table:
  - project   : stored for this directory
  - suggested : not stored, but the detected ecosystem has a default
                (nothing is saved until the verb is run and confirmed)

JSON Output Shape:
{
  "project": "/abs/path",
  "config": "/home/me/.tz/config.json",
  "detected": "Go",            (null when no marker file matched)
  "commands": { "dev": "go run ." },
  "suggested": { "test": "go test ./..." },
  "global": { "mouflon": "/path/to/mouflon.ts" }
}
*/

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, color, heading, table};
use crate::cmd::shared::Context;
use crate::config::Store;
use crate::detector::{self, Ecosystem};
use crate::verb::Verb;

/// CLI arguments for `tz list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// One line of the project table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    verb: String,
    command: String,
    scope: &'static str,
}

/// Entry point for the list subcommand.
pub fn execute_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let store = ctx.load_store()?;
    let key = ctx.project_key();
    let eco = detector::detect(&ctx.project_dir);
    let rows = project_rows(&store, &key, eco);

    if args.json {
        let mut commands = BTreeMap::new();
        let mut suggested = BTreeMap::new();
        for r in &rows {
            let target = if r.scope == "suggested" {
                &mut suggested
            } else {
                &mut commands
            };
            target.insert(r.verb.clone(), r.command.clone());
        }
        let out = serde_json::json!({
            "project": key,
            "config": ctx.config.path().display().to_string(),
            "detected": eco.is_known().then(|| eco.name()),
            "commands": commands,
            "suggested": suggested,
            "global": store.global,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let style = StyleOptions::detect();
    let subtitle = if eco.is_known() {
        format!("{key} ({eco})")
    } else {
        key.clone()
    };
    println!("{}", heading("Commands", Some(subtitle), &style));

    if rows.is_empty() {
        println!(
            "{}",
            color(
                Role::Dim,
                "No commands mapped. Run 'tz init' or 'tz map <verb> <command>'.",
                &style
            )
        );
    } else {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| vec![r.verb.clone(), r.scope.to_string(), r.command.clone()])
            .collect();
        println!("{}", table(&["VERB", "SCOPE", "COMMAND"], &cells, &style));
    }

    println!();
    println!("{}", heading("Global", None::<&str>, &style));
    let globals = global_rows(&store);
    if globals.is_empty() {
        println!(
            "{}",
            color(
                Role::Dim,
                "No global commands. Run 'tz map -g <verb> <command>'.",
                &style
            )
        );
    } else {
        println!("{}", table(&["VERB", "COMMAND"], &globals, &style));
    }
    Ok(())
}

/* ---- Row Building ---- */

/// Stored entries in display order, with unmapped built-ins filled from the
/// ecosystem defaults (if any).
fn project_rows(store: &Store, key: &str, eco: Ecosystem) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let entries = store.project(key).map(|p| p.entries()).unwrap_or_default();

    for verb in Verb::variants() {
        if let Some((_, cmd)) = entries.iter().find(|(v, _)| *v == verb.as_str()) {
            rows.push(Row {
                verb: verb.as_str().to_string(),
                command: (*cmd).to_string(),
                scope: "project",
            });
        } else if let Some(cmd) = detector::suggest(eco, *verb) {
            rows.push(Row {
                verb: verb.as_str().to_string(),
                command: cmd.to_string(),
                scope: "suggested",
            });
        }
    }

    for (verb, cmd) in &entries {
        if Verb::variants().iter().any(|v| v.as_str() == *verb) {
            continue;
        }
        rows.push(Row {
            verb: (*verb).to_string(),
            command: (*cmd).to_string(),
            scope: "project",
        });
    }
    rows
}

fn global_rows(store: &Store) -> Vec<Vec<String>> {
    store
        .global
        .iter()
        .filter(|(_, c)| !c.is_empty())
        .map(|(v, c)| vec![v.clone(), c.clone()])
        .collect()
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;

    const P: &str = "/work/app";

    #[test]
    fn rows_mix_stored_and_suggested() {
        let mut store = Store::default();
        store.set_command(P, "dev", "air");
        store.set_command(P, "seed", "go run ./cmd/seed");

        let rows = project_rows(&store, P, Ecosystem::Go);
        let view: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.verb.as_str(), r.scope, r.command.as_str()))
            .collect();
        assert_eq!(
            view,
            vec![
                ("install", "suggested", "go mod download"),
                ("dev", "project", "air"),
                ("test", "suggested", "go test ./..."),
                ("build", "suggested", "go build"),
                ("clear", "suggested", "go clean"),
                ("seed", "project", "go run ./cmd/seed"),
            ]
        );
    }

    #[test]
    fn unknown_project_lists_only_stored() {
        let mut store = Store::default();
        store.set_command(P, "build", "make");
        let rows = project_rows(&store, P, Ecosystem::Unknown);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scope, "project");
        assert!(project_rows(&Store::default(), P, Ecosystem::Unknown).is_empty());
    }

    #[test]
    fn global_rows_sorted() {
        let mut store = Store::default();
        store.set_global("zz", "z").unwrap();
        store.set_global("aa", "a").unwrap();
        assert_eq!(
            global_rows(&store),
            vec![
                vec!["aa".to_string(), "a".to_string()],
                vec!["zz".to_string(), "z".to_string()],
            ]
        );
    }
}
