//! Artifact request types: what the operator asked to import.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Whether the artifact is a plain file or an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    File,
    Archive,
}

/// Where the artifact bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Fetched over HTTP(S) and hashed from a temporary copy.
    RemoteUrl(String),
    /// Hashed in place, never copied.
    LocalPath(PathBuf),
}

impl ArtifactSource {
    /// The operator-supplied location, as entered.
    pub fn location(&self) -> String {
        match self {
            ArtifactSource::RemoteUrl(url) => url.clone(),
            ArtifactSource::LocalPath(path) => path.display().to_string(),
        }
    }

    /// Default entry for the URL list: the URL itself for remote
    /// sources, a `file://` URL of the absolute path for local ones.
    pub fn default_url(&self) -> String {
        match self {
            ArtifactSource::RemoteUrl(url) => url.clone(),
            ArtifactSource::LocalPath(path) => {
                let absolute = absolutize(path);
                format!("file://{}", absolute.display())
            }
        }
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// The recognized packaging formats, a fixed external contract.
///
/// `Tgz` is a legacy alias of `TarGz` and is kept distinct so existing
/// stanzas round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    Zip,
    Tar,
    TarGz,
    Tgz,
    TarBz2,
    TarXz,
}

impl ArchiveType {
    /// All recognized types, in suffix-matching preference order.
    pub const ALL: [ArchiveType; 6] = [
        ArchiveType::Zip,
        ArchiveType::Tar,
        ArchiveType::TarGz,
        ArchiveType::Tgz,
        ArchiveType::TarBz2,
        ArchiveType::TarXz,
    ];

    /// The literal spelling used in stanzas and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveType::Zip => "zip",
            ArchiveType::Tar => "tar",
            ArchiveType::TarGz => "tar.gz",
            ArchiveType::Tgz => "tgz",
            ArchiveType::TarBz2 => "tar.bz2",
            ArchiveType::TarXz => "tar.xz",
        }
    }

    /// Comma-separated list of all spellings, for prompt text.
    pub fn all_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Infer the type from a path or URL suffix.
    ///
    /// The candidate is lowercased and tested against each recognized
    /// suffix in preference order; the first match wins.
    pub fn guess(name_or_url: &str) -> Option<ArchiveType> {
        let lowered = name_or_url.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| lowered.ends_with(&format!(".{}", t.as_str())))
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown archive type `{}`; expected one of: {}",
                    s,
                    ArchiveType::all_names()
                )
            })
    }
}

/// A fully-collected import request.
///
/// `urls` is non-empty; its first entry is the canonical download
/// location used to build the package reference. Archive-only fields
/// are collected separately as [`ArchiveOptions`] once the licensing
/// step has run.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    pub kind: ArtifactKind,
    pub source: ArtifactSource,
    pub name: String,
    pub namespace: String,
    pub version: Option<String>,
    pub urls: Vec<String>,
}

/// Archive-only fields of a request.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    pub archive_type: ArchiveType,
    pub extract: bool,
    pub strip_prefix: Option<String>,
}

impl ArtifactRequest {
    /// The canonical download location (first URL).
    pub fn download_url(&self) -> &str {
        &self.urls[0]
    }
}

/// Normalize a comma-separated URL answer: split, trim, drop empties.
pub fn normalize_urls(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
