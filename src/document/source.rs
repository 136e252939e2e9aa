//! Document source classification.
//!
//! A source string is either a remote URL or a local filesystem path. The
//! decision is made once, when the [`DocumentSource`] is built, and never
//! revisited while the process runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

/// Where the document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A file on the local filesystem, watched for changes.
    Local(PathBuf),
    /// A remote resource, polled on a fixed interval.
    Remote(Url),
}

/// Immutable description of the document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    location: SourceLocation,
    poll_interval: Duration,
}

impl DocumentSource {
    /// Classify `raw` as a remote URL or a local path.
    ///
    /// `raw` is remote iff it parses as a URL with both a scheme and a
    /// non-empty host. Local paths are taken verbatim.
    pub fn classify(raw: &str, poll_interval: Duration) -> Self {
        let location = match remote_url(raw) {
            Some(url) => SourceLocation::Remote(url),
            None => SourceLocation::Local(PathBuf::from(raw)),
        };
        Self { location, poll_interval }
    }

    /// Classify `raw`, resolving relative local paths against `base_dir`.
    pub fn resolve(raw: &str, base_dir: Option<&Path>, poll_interval: Duration) -> Self {
        let mut source = Self::classify(raw, poll_interval);
        if let SourceLocation::Local(path) = &source.location {
            if let Some(base) = base_dir {
                if path.is_relative() {
                    source.location = SourceLocation::Local(base.join(path));
                }
            }
        }
        source
    }

    /// Classify `raw`, resolving relative local paths against the directory
    /// of the running executable.
    pub fn resolve_from_executable(raw: &str, poll_interval: Duration) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if exe_dir.is_none() {
            tracing::warn!(source = raw, "Could not locate executable directory, using path as given");
        }
        Self::resolve(raw, exe_dir.as_deref(), poll_interval)
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The file path, for local sources.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.location {
            SourceLocation::Local(path) => Some(path),
            SourceLocation::Remote(_) => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.location, SourceLocation::Remote(_))
    }

    /// Polling interval; only meaningful for remote sources.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// `"remote"` or `"local"`.
    pub fn kind(&self) -> &'static str {
        if self.is_remote() { "remote" } else { "local" }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}

fn remote_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    (!url.scheme().is_empty() && has_host).then_some(url)
}
