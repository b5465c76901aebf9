//! Output directory preparation and the sequential download loop.
//!
//! Downloads continue past individual failures; the report records every
//! outcome so the caller can summarize and pick the exit status. A failed
//! fetch writes nothing, so the output directory never holds an error page
//! under a resource name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BlazorgrabError;
use crate::fetch::Client;
use crate::resolve::Target;

/// Per-run outcome of the download loop.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub downloaded: Vec<String>,
    pub failures: Vec<DownloadFailure>,
}

#[derive(Debug)]
pub struct DownloadFailure {
    pub name: String,
    pub error: BlazorgrabError,
}

/// Idempotent create of the output directory, intermediate directories
/// included.
pub fn prepare_output_dir(dir: &Path) -> Result<(), BlazorgrabError> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Download every name in list order, one request at a time.
///
/// The loop is a plain function over the list; a bounded-concurrency version
/// could replace it without changing the contract.
pub fn download_resources(
    client: &Client,
    target: &Target,
    names: &[String],
    output_dir: &Path,
) -> DownloadReport {
    let mut report = DownloadReport::default();
    for name in names {
        match download_one(client, target, name, output_dir) {
            Ok(()) => {
                println!("  {name} ... ok");
                report.downloaded.push(name.clone());
            }
            Err(error) => {
                println!("  {name} ... failed: {error}");
                report.failures.push(DownloadFailure {
                    name: name.clone(),
                    error,
                });
            }
        }
    }
    report
}

fn download_one(
    client: &Client,
    target: &Target,
    name: &str,
    output_dir: &Path,
) -> Result<(), BlazorgrabError> {
    let path = local_path(output_dir, name).ok_or_else(|| BlazorgrabError::UnsafeResourceName {
        name: name.to_string(),
    })?;

    let url = target.resource_url(name);
    debug!(%url, "downloading resource");
    let bytes = client
        .binary(&url)
        .map_err(|source| BlazorgrabError::ResourceDownload {
            name: name.to_string(),
            url: url.clone(),
            message: source.to_string(),
        })?;

    fs::write(&path, bytes).map_err(|source| BlazorgrabError::ResourceDownload {
        name: name.to_string(),
        url,
        message: source.to_string(),
    })?;
    Ok(())
}

/// Where a resource lands locally. `None` for names that would escape the
/// output directory; manifest keys are flat filenames, so separators and
/// parent references have no legitimate use.
fn local_path(output_dir: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return None;
    }
    Some(output_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prepare_output_dir_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let out = dir.path().join("downloaded_dlls");

        prepare_output_dir(&out).expect("first create");
        fs::write(out.join("keep.dll"), b"bytes").expect("write");
        prepare_output_dir(&out).expect("second create");

        assert_eq!(fs::read(out.join("keep.dll")).expect("read"), b"bytes");
    }

    #[test]
    fn prepare_output_dir_creates_intermediate_directories() {
        let dir = TempDir::new().expect("tempdir");
        let out = dir.path().join("a").join("b").join("c");

        prepare_output_dir(&out).expect("create");
        assert!(out.is_dir());
    }

    #[test]
    fn hostile_resource_names_are_refused() {
        let out = Path::new("/tmp/out");
        assert!(local_path(out, "").is_none());
        assert!(local_path(out, "../evil.dll").is_none());
        assert!(local_path(out, "sub/dir.dll").is_none());
        assert!(local_path(out, "sub\\dir.dll").is_none());
        assert!(local_path(out, "trick..dll").is_none());
        assert_eq!(
            local_path(out, "dotnet.wasm"),
            Some(PathBuf::from("/tmp/out/dotnet.wasm"))
        );
    }
}
