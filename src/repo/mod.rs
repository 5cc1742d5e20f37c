//! Repository reference parsing for `tz clone`.
//!
//! parse_repo -> RepoSpec { RemoteUrl | ScpLike | LocalPath }
//! project_name() gives the directory `git clone` will create.
//!
use anyhow::{Result, bail};
use std::fmt;
use std::path::Path;
use url::Url;

/// Schemes git itself understands as URLs.
const GIT_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "git+ssh", "file"];

/// A parsed `tz clone` argument. Keeps the original input for the git command line.
#[derive(Debug, Clone)]
pub enum RepoSpec {
    /// `https://github.com/user/repo.git`, `ssh://git@host/user/repo`, ...
    RemoteUrl { original: String, url: Url },
    /// `git@github.com:user/repo.git`
    ScpLike {
        original: String,
        host: String,
        path: String,
    },
    /// A plain path or bare repository name.
    LocalPath { original: String },
}

impl RepoSpec {
    pub fn original(&self) -> &str {
        match self {
            RepoSpec::RemoteUrl { original, .. } => original,
            RepoSpec::ScpLike { original, .. } => original,
            RepoSpec::LocalPath { original } => original,
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, RepoSpec::LocalPath { .. })
    }

    /// Last path component without a `.git` suffix.
    pub fn project_name(&self) -> Option<String> {
        let last = match self {
            RepoSpec::RemoteUrl { url, .. } => url
                .path_segments()
                .and_then(|mut segs| segs.rfind(|s| !s.is_empty()))
                .map(str::to_string),
            RepoSpec::ScpLike { path, .. } => path
                .rsplit('/')
                .find(|s| !s.is_empty())
                .map(str::to_string),
            RepoSpec::LocalPath { original } => Path::new(original.trim_end_matches('/'))
                .file_name()
                .map(|s| s.to_string_lossy().into_owned()),
        }?;
        let name = last.strip_suffix(".git").unwrap_or(&last);
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name.to_string())
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoSpec::RemoteUrl { url, .. } => write!(f, "{url}"),
            RepoSpec::ScpLike { host, path, .. } => write!(f, "{host}:{path}"),
            RepoSpec::LocalPath { original } => write!(f, "{original}"),
        }
    }
}

/// Classify a repository reference.
///
/// Parsing Strategy:
/// 1. URL with a git-understood scheme -> RemoteUrl.
/// 2. `[user@]host:path` with no `/` before the colon -> ScpLike.
/// 3. Anything else is a local path.
pub fn parse_repo(raw: &str) -> Result<RepoSpec> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("repository URL is empty");
    }

    if let Ok(url) = Url::parse(trimmed)
        && GIT_SCHEMES.contains(&url.scheme())
    {
        return Ok(RepoSpec::RemoteUrl {
            original: trimmed.to_string(),
            url,
        });
    }

    if let Some((host, path)) = trimmed.split_once(':')
        && !host.is_empty()
        && !host.contains('/')
        && !path.is_empty()
    {
        return Ok(RepoSpec::ScpLike {
            original: trimmed.to_string(),
            host: host.to_string(),
            path: path.to_string(),
        });
    }

    Ok(RepoSpec::LocalPath {
        original: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> Option<String> {
        parse_repo(raw).unwrap().project_name()
    }

    #[test]
    fn https_urls() {
        assert_eq!(name("https://github.com/user/repo.git").as_deref(), Some("repo"));
        assert_eq!(name("https://github.com/user/repo").as_deref(), Some("repo"));
        assert_eq!(name("https://github.com/user/repo/").as_deref(), Some("repo"));
        assert!(parse_repo("https://github.com/user/repo").unwrap().is_remote());
    }

    #[test]
    fn ssh_forms() {
        let spec = parse_repo("git@github.com:user/repo.git").unwrap();
        assert!(matches!(spec, RepoSpec::ScpLike { ref host, .. } if host == "git@github.com"));
        assert_eq!(spec.project_name().as_deref(), Some("repo"));
        assert_eq!(name("ssh://git@host.xz:2222/team/tool.git").as_deref(), Some("tool"));
    }

    #[test]
    fn local_paths() {
        let spec = parse_repo("../mirrors/thing.git").unwrap();
        assert!(!spec.is_remote());
        assert_eq!(spec.project_name().as_deref(), Some("thing"));
        assert_eq!(name("repo").as_deref(), Some("repo"));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(parse_repo("   ").is_err());
        assert_eq!(name("https://github.com/"), None);
        assert_eq!(name(".git"), None);
    }

    #[test]
    fn original_is_preserved() {
        let spec = parse_repo(" git@github.com:user/repo ").unwrap();
        assert_eq!(spec.original(), "git@github.com:user/repo");
        assert_eq!(spec.to_string(), "git@github.com:user/repo");
    }
}
