/*!
resolver.rs - turn (project, verb, extra args) into a runnable command string.

Resolution order:
  1. Stored project mapping (custom verbs also fall back to the global mapping)
  2. Ecosystem detection + suggestion table (built-in verbs only)
  3. Confirmation through the injected `Confirmer`
  4. Accepted suggestion is stored and the config file saved
  5. Extra args appended verbatim, space-joined (no shell escaping)

A declined suggestion returns `Error::Cancelled` before anything is written.
If the save in step 4 fails, the in-memory store keeps the accepted mapping.
*/

use std::path::Path;

use crate::config::{ConfigFile, Scope, Store};
use crate::detector::{self, Ecosystem};
use crate::error::Error;
use crate::prompt::Confirmer;
use crate::verb::VerbName;

/// Where the resolved command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Project,
    Global,
    /// Detected, confirmed and saved during this resolution.
    Suggested(Ecosystem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub command: String,
    pub origin: Origin,
}

pub struct Resolver<'a, C> {
    store: &'a mut Store,
    file: &'a ConfigFile,
    confirmer: C,
}

impl<'a, C: Confirmer> Resolver<'a, C> {
    pub fn new(store: &'a mut Store, file: &'a ConfigFile, confirmer: C) -> Self {
        Self {
            store,
            file,
            confirmer,
        }
    }

    /// `project_dir` is probed for marker files; `project_key` indexes the store.
    pub fn resolve(
        &mut self,
        project_dir: &Path,
        project_key: &str,
        verb: &str,
        extra_args: &[String],
    ) -> anyhow::Result<Resolved> {
        if let Some((cmd, scope)) = self.store.lookup(project_key, verb) {
            crate::log_debug!("resolve: '{verb}' mapped ({scope:?}) -> {cmd}");
            let origin = match scope {
                Scope::Project => Origin::Project,
                Scope::Global => Origin::Global,
            };
            return Ok(Resolved {
                command: append_args(cmd, extra_args),
                origin,
            });
        }

        let VerbName::Builtin(builtin) = VerbName::parse(verb) else {
            return Err(Error::NoMapping {
                verb: verb.to_string(),
            }
            .into());
        };

        let Some((eco, suggested)) = detector::suggestion_for(project_dir, builtin) else {
            crate::log_debug!("resolve: nothing to suggest for '{verb}'");
            return Err(Error::NoMapping {
                verb: verb.to_string(),
            }
            .into());
        };

        if !self.confirmer.confirm_suggestion(eco, verb, suggested)? {
            return Err(Error::Cancelled.into());
        }

        self.store.set_command(project_key, verb, suggested);
        self.file.save(self.store)?;
        crate::log_info!("saved mapping {verb} -> {suggested} for {project_key}");

        Ok(Resolved {
            command: append_args(suggested, extra_args),
            origin: Origin::Suggested(eco),
        })
    }
}

/// Verbatim space-join; the caller owns any quoting.
pub fn append_args(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        return command.to_string();
    }
    format!("{command} {}", args.join(" "))
}

/// Append the package manager's dev-dependency flag.
///
/// Heuristic: substring match on the command text. `npm` also matches `pnpm`,
/// both take `--save-dev`. Anything unrecognised is an error, not a no-op.
pub fn apply_dev_modifier(command: &str) -> Result<String, Error> {
    let flag = if command.contains("npm") {
        "--save-dev"
    } else if command.contains("yarn") {
        "--dev"
    } else if command.contains("bun") {
        "-D"
    } else {
        return Err(Error::UnsupportedModifier {
            command: command.to_string(),
        });
    };
    Ok(format!("{command} {flag}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::AssumeYes;
    use tempfile::TempDir;

    /// Scripted confirmer that records how often it was asked.
    struct Scripted {
        answer: bool,
        asked: usize,
    }

    impl Confirmer for Scripted {
        fn confirm_suggestion(&mut self, _: Ecosystem, _: &str, _: &str) -> anyhow::Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    struct Fixture {
        _tmp: TempDir,
        project: std::path::PathBuf,
        key: String,
        file: ConfigFile,
    }

    fn fixture(markers: &[&str]) -> Fixture {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("proj");
        std::fs::create_dir(&project).unwrap();
        for m in markers {
            std::fs::write(project.join(m), "").unwrap();
        }
        let file = ConfigFile::new(tmp.path().join("home").join(".tz").join("config.json"));
        let key = project.to_string_lossy().into_owned();
        Fixture {
            _tmp: tmp,
            project,
            key,
            file,
        }
    }

    #[test]
    fn stored_mapping_skips_detection_and_prompt() {
        let fx = fixture(&["package.json"]);
        let mut store = Store::default();
        store.set_command(&fx.key, "test", "npm test");
        let mut scripted = Scripted {
            answer: false,
            asked: 0,
        };
        let resolved = Resolver::new(&mut store, &fx.file, &mut scripted)
            .resolve(&fx.project, &fx.key, "test", &["--watch".to_string()])
            .unwrap();
        assert_eq!(resolved.command, "npm test --watch");
        assert_eq!(resolved.origin, Origin::Project);
        assert_eq!(scripted.asked, 0);
        assert!(!fx.file.path().exists(), "nothing saved");
    }

    #[test]
    fn go_project_suggestion_accepted_and_persisted() {
        let fx = fixture(&["go.mod"]);
        let mut store = fx.file.load().unwrap();
        let resolved = Resolver::new(&mut store, &fx.file, AssumeYes)
            .resolve(&fx.project, &fx.key, "dev", &[])
            .unwrap();
        assert_eq!(resolved.command, "go run .");
        assert_eq!(resolved.origin, Origin::Suggested(Ecosystem::Go));
        assert_eq!(store.get_command(&fx.key, "dev").unwrap(), "go run .");
        let reloaded = fx.file.load().unwrap();
        assert_eq!(reloaded.get_command(&fx.key, "dev").unwrap(), "go run .");
    }

    #[test]
    fn declined_suggestion_leaves_disk_untouched() {
        let fx = fixture(&["Cargo.toml"]);
        let mut store = Store::default();
        store.set_command(&fx.key, "test", "cargo nextest run");
        fx.file.save(&store).unwrap();
        let before = fx.file.load().unwrap();

        let mut scripted = Scripted {
            answer: false,
            asked: 0,
        };
        let err = Resolver::new(&mut store, &fx.file, &mut scripted)
            .resolve(&fx.project, &fx.key, "build", &[])
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Cancelled)));
        assert_eq!(scripted.asked, 1);
        assert_eq!(fx.file.load().unwrap(), before);
    }

    #[test]
    fn unknown_project_has_no_mapping() {
        let fx = fixture(&[]);
        let mut store = Store::default();
        let err = Resolver::new(&mut store, &fx.file, AssumeYes)
            .resolve(&fx.project, &fx.key, "install", &[])
            .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoMapping { .. })));
        assert!(msg.contains("tz map install"));
    }

    #[test]
    fn custom_verb_is_never_suggested() {
        let fx = fixture(&["package.json"]);
        let mut store = Store::default();
        let err = Resolver::new(&mut store, &fx.file, AssumeYes)
            .resolve(&fx.project, &fx.key, "seed", &[])
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoMapping { .. })));
    }

    #[test]
    fn custom_verb_falls_back_to_global() {
        let fx = fixture(&[]);
        let mut store = Store::default();
        store.set_global("notes", "vim notes.md").unwrap();
        let resolved = Resolver::new(&mut store, &fx.file, AssumeYes)
            .resolve(&fx.project, &fx.key, "notes", &["+10".to_string()])
            .unwrap();
        assert_eq!(resolved.command, "vim notes.md +10");
        assert_eq!(resolved.origin, Origin::Global);
    }

    #[test]
    fn append_args_is_verbatim() {
        assert_eq!(append_args("npm test", &[]), "npm test");
        let args = vec!["--watch".to_string(), "a b".to_string()];
        assert_eq!(append_args("npm test", &args), "npm test --watch a b");
    }

    #[test]
    fn dev_modifier_per_manager() {
        assert_eq!(apply_dev_modifier("yarn install").unwrap(), "yarn install --dev");
        assert_eq!(apply_dev_modifier("npm install").unwrap(), "npm install --save-dev");
        assert_eq!(apply_dev_modifier("pnpm add").unwrap(), "pnpm add --save-dev");
        assert_eq!(apply_dev_modifier("bun install").unwrap(), "bun install -D");
    }

    #[test]
    fn dev_modifier_rejects_other_tools() {
        let err = apply_dev_modifier("mvn install").unwrap_err();
        assert!(matches!(err, Error::UnsupportedModifier { .. }));
        assert!(err.to_string().contains("mvn install"));
    }
}
