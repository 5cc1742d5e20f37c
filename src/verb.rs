/*!
Built-in verbs and verb-name classification.

Variants:
  install / dev / test / build / clear  (project-scoped, dedicated storage fields)

Any other name is a custom verb, stored in an open map (per project or global).

Helpers:
  - variants()
  - from_str_ci()
  - as_str()
  - VerbName::parse()
*/

use std::fmt;

/// The five first-class verbs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Verb {
    /// Install dependencies
    Install,
    /// Start the dev server
    Dev,
    /// Run tests
    Test,
    /// Build the project
    Build,
    /// Clear build artifacts
    Clear,
}

impl Verb {
    /// All built-in verbs in prompt/display order.
    pub const fn variants() -> &'static [Verb] {
        &[Verb::Install, Verb::Dev, Verb::Test, Verb::Build, Verb::Clear]
    }

    /// Case-insensitive parser independent of `clap`.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "install" => Some(Verb::Install),
            "dev" => Some(Verb::Dev),
            "test" => Some(Verb::Test),
            "build" => Some(Verb::Build),
            "clear" => Some(Verb::Clear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Install => "install",
            Verb::Dev => "dev",
            Verb::Test => "test",
            Verb::Build => "build",
            Verb::Clear => "clear",
        }
    }

    /// Single-letter alias accepted on the command line.
    pub fn alias(&self) -> &'static str {
        match self {
            Verb::Install => "i",
            Verb::Dev => "d",
            Verb::Test => "t",
            Verb::Build => "b",
            Verb::Clear => "c",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb name as typed by the user: either built-in or custom.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerbName<'a> {
    Builtin(Verb),
    Custom(&'a str),
}

impl<'a> VerbName<'a> {
    /// Built-in names are matched exactly (lowercase), mirroring the stored field names.
    pub fn parse(name: &'a str) -> Self {
        match Verb::variants().iter().find(|v| v.as_str() == name) {
            Some(v) => VerbName::Builtin(*v),
            None => VerbName::Custom(name),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, VerbName::Builtin(_))
    }
}

impl From<Verb> for VerbName<'static> {
    fn from(v: Verb) -> Self {
        VerbName::Builtin(v)
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Verb::from_str_ci("INSTALL"), Some(Verb::Install));
        assert_eq!(Verb::from_str_ci(" dev "), Some(Verb::Dev));
        assert_eq!(Verb::from_str_ci("clear"), Some(Verb::Clear));
        assert_eq!(Verb::from_str_ci("docker"), None);
    }

    #[test]
    fn variants_order() {
        let names: Vec<&str> = Verb::variants().iter().map(|v| v.as_str()).collect();
        assert_eq!(names, vec!["install", "dev", "test", "build", "clear"]);
    }

    #[test]
    fn verb_name_classification() {
        assert_eq!(VerbName::parse("test"), VerbName::Builtin(Verb::Test));
        assert_eq!(VerbName::parse("seed"), VerbName::Custom("seed"));
        // stored field names are lowercase; other spellings are custom verbs
        assert_eq!(VerbName::parse("Test"), VerbName::Custom("Test"));
        assert!(VerbName::parse("build").is_builtin());
        assert!(!VerbName::parse("docker").is_builtin());
    }

    #[test]
    fn display_output() {
        assert_eq!(Verb::Install.to_string(), "install");
        assert_eq!(Verb::Clear.alias(), "c");
    }
}
