//! Static default commands per ecosystem and built-in verb.

use std::path::Path;

use super::{Ecosystem, detect};
use crate::verb::Verb;

/// One row of the suggestion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestions {
    pub install: &'static str,
    pub dev: &'static str,
    pub test: &'static str,
    pub build: &'static str,
    pub clear: &'static str,
}

impl Suggestions {
    pub fn get(&self, verb: Verb) -> &'static str {
        match verb {
            Verb::Install => self.install,
            Verb::Dev => self.dev,
            Verb::Test => self.test,
            Verb::Build => self.build,
            Verb::Clear => self.clear,
        }
    }
}

impl Ecosystem {
    /// Default commands for this ecosystem; `None` for `Unknown`.
    pub const fn suggestions(&self) -> Option<Suggestions> {
        match self {
            Ecosystem::NodeJs => Some(Suggestions {
                install: "npm install",
                dev: "npm run dev",
                test: "npm test",
                build: "npm run build",
                clear: "rm -rf dist",
            }),
            Ecosystem::Go => Some(Suggestions {
                install: "go mod download",
                dev: "go run .",
                test: "go test ./...",
                build: "go build",
                clear: "go clean",
            }),
            Ecosystem::Python => Some(Suggestions {
                install: "pip install -r requirements.txt",
                dev: "python main.py",
                test: "pytest",
                build: "python -m build",
                clear: "rm -rf __pycache__ dist build",
            }),
            Ecosystem::Rust => Some(Suggestions {
                install: "cargo fetch",
                dev: "cargo run",
                test: "cargo test",
                build: "cargo build",
                clear: "cargo clean",
            }),
            Ecosystem::Ruby => Some(Suggestions {
                install: "bundle install",
                dev: "bundle exec rails server",
                test: "bundle exec rspec",
                build: "bundle exec rake build",
                clear: "rm -rf tmp",
            }),
            Ecosystem::Java => Some(Suggestions {
                install: "mvn install",
                dev: "mvn spring-boot:run",
                test: "mvn test",
                build: "mvn package",
                clear: "mvn clean",
            }),
            Ecosystem::Unknown => None,
        }
    }
}

/// Pure table lookup.
pub fn suggest(ecosystem: Ecosystem, verb: Verb) -> Option<&'static str> {
    ecosystem
        .suggestions()
        .map(|s| s.get(verb))
        .filter(|cmd| !cmd.is_empty())
}

/// Detect `dir` and look up the default for `verb`.
pub fn suggestion_for(dir: &Path, verb: Verb) -> Option<(Ecosystem, &'static str)> {
    let eco = detect(dir);
    suggest(eco, verb).map(|cmd| (eco, cmd))
}
