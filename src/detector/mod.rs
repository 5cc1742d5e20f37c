//! Project ecosystem detection from marker files.
//!
//! detect -> Ecosystem { NodeJs | Go | Python | Rust | Ruby | Java | Unknown }
//! Existence checks only; file contents are never read.
//!
use std::fmt;
use std::path::Path;

mod suggest;

pub use suggest::{suggest, suggestion_for};

/// Detected project technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    NodeJs,
    Go,
    Python,
    Rust,
    Ruby,
    Java,
    Unknown,
}

/// Marker files per ecosystem, in detection priority order. First match wins.
const MARKERS: &[(Ecosystem, &[&str])] = &[
    (Ecosystem::NodeJs, &["package.json"]),
    (Ecosystem::Go, &["go.mod"]),
    (
        Ecosystem::Python,
        &["pyproject.toml", "requirements.txt", "setup.py"],
    ),
    (Ecosystem::Rust, &["Cargo.toml"]),
    (Ecosystem::Ruby, &["Gemfile"]),
    (
        Ecosystem::Java,
        &["pom.xml", "build.gradle", "build.gradle.kts"],
    ),
];

impl Ecosystem {
    pub fn name(&self) -> &'static str {
        match self {
            Ecosystem::NodeJs => "Node.js",
            Ecosystem::Go => "Go",
            Ecosystem::Python => "Python",
            Ecosystem::Rust => "Rust",
            Ecosystem::Ruby => "Ruby",
            Ecosystem::Java => "Java",
            Ecosystem::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Ecosystem::Unknown)
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `dir` by the first ecosystem whose marker file exists.
pub fn detect(dir: &Path) -> Ecosystem {
    for (eco, files) in MARKERS {
        if let Some(hit) = files.iter().find(|f| dir.join(f).exists()) {
            crate::log_trace!("detect: found {} in {} -> {}", hit, dir.display(), eco);
            return *eco;
        }
    }
    crate::log_trace!("detect: no marker files in {}", dir.display());
    Ecosystem::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for f in files {
            std::fs::write(dir.path().join(f), "").unwrap();
        }
        dir
    }

    #[test]
    fn empty_dir_is_unknown() {
        let dir = project_with(&[]);
        assert_eq!(detect(dir.path()), Ecosystem::Unknown);
    }

    #[test]
    fn single_markers() {
        let cases = [
            ("package.json", Ecosystem::NodeJs),
            ("go.mod", Ecosystem::Go),
            ("requirements.txt", Ecosystem::Python),
            ("setup.py", Ecosystem::Python),
            ("Cargo.toml", Ecosystem::Rust),
            ("Gemfile", Ecosystem::Ruby),
            ("build.gradle.kts", Ecosystem::Java),
        ];
        for (file, expected) in cases {
            let dir = project_with(&[file]);
            assert_eq!(detect(dir.path()), expected, "marker {file}");
        }
    }

    #[test]
    fn node_wins_over_go() {
        let dir = project_with(&["go.mod", "package.json"]);
        assert_eq!(detect(dir.path()), Ecosystem::NodeJs);
    }

    #[test]
    fn python_wins_over_rust_and_java() {
        let dir = project_with(&["pom.xml", "Cargo.toml", "pyproject.toml"]);
        assert_eq!(detect(dir.path()), Ecosystem::Python);
    }

    #[test]
    fn marker_directory_counts_as_present() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("Gemfile")).unwrap();
        assert_eq!(detect(dir.path()), Ecosystem::Ruby);
    }

    #[test]
    fn display_names() {
        assert_eq!(Ecosystem::NodeJs.to_string(), "Node.js");
        assert_eq!(Ecosystem::Unknown.to_string(), "Unknown");
        assert!(!Ecosystem::Unknown.is_known());
    }
}
