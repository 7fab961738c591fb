//! Artifact acquisition: obtain the bytes, produce the digest.
//!
//! Remote sources are streamed into a run-scoped temporary directory
//! and hashed from there; the directory is deleted when acquisition
//! returns, on success and on error alike. Local sources are hashed in
//! place. Nothing is cached and nothing is retried; any failure here
//! aborts the run.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::core::request::ArtifactSource;
use crate::util::hash::sha256_file;
use crate::util::shell::{Shell, Status};

/// Acquire the artifact named by `source` and return its SHA-256
/// digest as lowercase hex.
pub fn acquire_digest(source: &ArtifactSource, shell: &Shell) -> Result<String> {
    match source {
        ArtifactSource::LocalPath(path) => {
            shell.status(Status::Hashing, path.display());
            sha256_file(path)
        }
        ArtifactSource::RemoteUrl(url) => {
            let tmp = tempfile::Builder::new()
                .prefix("oma-import-")
                .tempdir()
                .context("failed to create download directory")?;
            let dest = tmp.path().join(remote_file_name(url));

            shell.status(Status::Fetching, url);
            download_to_file(url, &dest, shell)?;

            shell.status(Status::Hashing, dest.display());
            sha256_file(&dest)
            // `tmp` drops here and removes the directory.
        }
    }
}

/// Pick a temporary file name from the URL path, falling back to a
/// fixed name when the path has no usable final segment.
fn remote_file_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "artifact".to_string())
}

/// Stream a GET response body to `dest`.
///
/// The URL scheme selects TLS or plaintext transport; any status of
/// 400 or above is a download failure.
fn download_to_file(url: &str, dest: &Path, shell: &Shell) -> Result<()> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to download {}", url))?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        bail!("download failed with status {} for {}", status.as_u16(), url);
    }

    let pb = shell.bytes_progress("downloading", response.content_length());
    let mut reader = pb.wrap_read(response);
    let mut file = File::create(dest)
        .with_context(|| format!("failed to create download file: {}", dest.display()))?;

    io::copy(&mut reader, &mut file)
        .with_context(|| format!("failed to stream download from {}", url))?;
    pb.finish_and_clear();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_local_source_hashes_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("readme.txt");
        std::fs::write(&path, "hello").unwrap();

        let shell = Shell::new(true);
        let digest = acquire_digest(&ArtifactSource::LocalPath(path), &shell).unwrap();
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_local_source_missing_file_is_fatal() {
        let shell = Shell::new(true);
        let source = ArtifactSource::LocalPath(PathBuf::from("/no/such/file"));
        assert!(acquire_digest(&source, &shell).is_err());
    }

    #[test]
    fn test_remote_file_name_from_url_path() {
        assert_eq!(
            remote_file_name("https://example.org/data/set.tar.gz?x=1"),
            "set.tar.gz"
        );
        assert_eq!(remote_file_name("https://example.org/"), "artifact");
        assert_eq!(remote_file_name("not a url"), "artifact");
    }
}
