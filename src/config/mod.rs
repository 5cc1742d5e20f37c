/*!
Command store persisted at `~/.tz/config.json`.

File layout:
{
  "projects": {
    "/abs/project/path": {
      "install": "npm install",
      "dev": "npm run dev",
      "custom": { "seed": "node scripts/seed.js" }
    }
  },
  "global": { "mouflon": "/path/to/mouflon.ts" }
}

Rules:
  - Built-in verbs live in dedicated fields; anything else goes to `custom`.
  - Empty strings are "not configured" (never written back).
  - `global` holds custom verbs only; built-in names are rejected.
  - The whole file is read at start and overwritten in full on save (no locking).
*/

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::verb::{Verb, VerbName};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TZ_CONFIG";

/* -------------------------------------------------------------------------- */
/* Data Model                                                                 */
/* -------------------------------------------------------------------------- */

/// Verb mappings for one project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCommands {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub install: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub dev: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub test: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub build: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub clear: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub custom: BTreeMap<String, String>,
}

/// Whole config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "projects_tolerating_null")]
    pub projects: BTreeMap<String, ProjectCommands>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub global: BTreeMap<String, String>,
}

/// Where a stored command was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Project,
    Global,
}

fn is_unset(v: &Option<String>) -> bool {
    v.as_deref().is_none_or(str::is_empty)
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// `null` for the whole section or for a single project reads as empty.
fn projects_tolerating_null<'de, D>(
    d: D,
) -> std::result::Result<BTreeMap<String, ProjectCommands>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<ProjectCommands>>> = Option::deserialize(d)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}

impl ProjectCommands {
    fn field(&self, verb: Verb) -> &Option<String> {
        match verb {
            Verb::Install => &self.install,
            Verb::Dev => &self.dev,
            Verb::Test => &self.test,
            Verb::Build => &self.build,
            Verb::Clear => &self.clear,
        }
    }

    fn field_mut(&mut self, verb: Verb) -> &mut Option<String> {
        match verb {
            Verb::Install => &mut self.install,
            Verb::Dev => &mut self.dev,
            Verb::Test => &mut self.test,
            Verb::Build => &mut self.build,
            Verb::Clear => &mut self.clear,
        }
    }

    /// Configured command for `verb`; empty strings count as absent.
    pub fn get(&self, verb: VerbName<'_>) -> Option<&str> {
        let cmd = match verb {
            VerbName::Builtin(v) => self.field(v).as_deref(),
            VerbName::Custom(name) => self.custom.get(name).map(String::as_str),
        };
        cmd.filter(|c| !c.is_empty())
    }

    pub fn set(&mut self, verb: VerbName<'_>, command: impl Into<String>) {
        match verb {
            VerbName::Builtin(v) => *self.field_mut(v) = Some(command.into()),
            VerbName::Custom(name) => {
                self.custom.insert(name.to_string(), command.into());
            }
        }
    }

    /// Configured (verb, command) pairs: built-ins in fixed order, then custom verbs sorted.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let builtins = Verb::variants()
            .iter()
            .filter_map(|v| self.get((*v).into()).map(|c| (v.as_str(), c)));
        let custom = self
            .custom
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(k, c)| (k.as_str(), c.as_str()));
        builtins.chain(custom).collect()
    }
}

/* -------------------------------------------------------------------------- */
/* Store Operations                                                           */
/* -------------------------------------------------------------------------- */

impl Store {
    pub fn project(&self, project: &str) -> Option<&ProjectCommands> {
        self.projects.get(project)
    }

    /// Stored command for (project, verb). Missing project, missing verb and
    /// empty value all surface as `NotMapped`.
    pub fn get_command(&self, project: &str, verb: &str) -> Result<&str> {
        self.project(project)
            .and_then(|p| p.get(VerbName::parse(verb)))
            .ok_or_else(|| Error::NotMapped {
                project: project.to_string(),
                verb: verb.to_string(),
            })
    }

    /// Creates the project entry on first write.
    pub fn set_command(&mut self, project: &str, verb: &str, command: impl Into<String>) {
        self.projects
            .entry(project.to_string())
            .or_default()
            .set(VerbName::parse(verb), command);
    }

    pub fn get_global(&self, verb: &str) -> Option<&str> {
        self.global
            .get(verb)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    pub fn set_global(&mut self, verb: &str, command: impl Into<String>) -> Result<()> {
        if VerbName::parse(verb).is_builtin() {
            return Err(Error::GlobalBuiltin {
                verb: verb.to_string(),
            });
        }
        self.global.insert(verb.to_string(), command.into());
        Ok(())
    }

    /// Project mapping first; custom verbs then fall back to the global mapping.
    pub fn lookup(&self, project: &str, verb: &str) -> Option<(&str, Scope)> {
        if let Ok(cmd) = self.get_command(project, verb) {
            return Some((cmd, Scope::Project));
        }
        if VerbName::parse(verb).is_builtin() {
            return None;
        }
        self.get_global(verb).map(|cmd| (cmd, Scope::Global))
    }
}

/* -------------------------------------------------------------------------- */
/* Backing File                                                               */
/* -------------------------------------------------------------------------- */

/// Location of the JSON config file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the config path: explicit flag > `TZ_CONFIG` > `~/.tz/config.json`.
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(p) = explicit {
            return Ok(Self::new(p));
        }
        if let Ok(env_p) = std::env::var(CONFIG_ENV)
            && !env_p.trim().is_empty()
        {
            return Ok(Self::new(env_p));
        }
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(Error::HomeDir)?;
        Ok(home.join(".tz").join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store; a missing file yields an empty store.
    pub fn load(&self) -> Result<Store> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                crate::log_debug!("config: {} not found, starting empty", self.path.display());
                return Ok(Store::default());
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let store = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: self.path.clone(),
            source,
        })?;
        crate::log_debug!("config: loaded {}", self.path.display());
        Ok(store)
    }

    /// Overwrite the file with `store`, creating the parent directory if needed.
    pub fn save(&self, store: &Store) -> Result<()> {
        let write_err = |source| Error::ConfigWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut data = serde_json::to_string_pretty(store)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        data.push('\n');
        std::fs::write(&self.path, data).map_err(write_err)?;
        crate::log_debug!("config: saved {}", self.path.display());
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */
