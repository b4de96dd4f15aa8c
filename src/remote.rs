//! Download of remote range sources.
//!
//! Sources are fetched with a blocking HTTP GET. Gzip-compressed files are
//! decompressed while streaming to disk; the result is written to a
//! temporary file and renamed into place once complete.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default connect timeout for downloads.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloader fetches source files over HTTP(S).
pub struct Downloader {
    agent: ureq::Agent,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a downloader with default timeouts.
    pub fn new() -> Self {
        Self::with_connect_timeout(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a downloader with a custom connect timeout.
    pub fn with_connect_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout_connect(timeout).build(),
        }
    }

    /// Download `url` into `destination`, optionally gunzipping it.
    ///
    /// Returns the path of the written file: the URL's file name, without
    /// its `.gz` extension when decompressing.
    pub fn download(&self, url: &str, destination: &Path, decompress: bool) -> Result<PathBuf> {
        let file_name = file_name_from_url(url)?;
        let target = if decompress {
            destination.join(strip_gz_extension(&file_name))
        } else {
            destination.join(&file_name)
        };

        fs::create_dir_all(destination)?;

        log::info!(
            "Starting download, source: {}, destination: {:?}",
            url,
            target
        );

        let reader = self.open(url)?;
        let written = write_to_file(reader, &target, decompress)?;

        log::info!("Download completed: {:?} ({} bytes)", target, written);
        Ok(target)
    }

    /// Open a streaming reader over the body of `url`.
    pub fn open(&self, url: &str) -> Result<Box<dyn Read + Send + Sync>> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => Error::Download(format!("HTTP error: {}", code)),
            ureq::Error::Transport(t) => Error::Download(format!("transport error: {}", t)),
        })?;

        Ok(response.into_reader())
    }
}

/// Extract the last path segment of a URL, ignoring query and fragment.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = path.split_once("://").map(|(_, rest)| rest).unwrap_or(path);

    match path.split_once('/') {
        Some((_, route)) => match route.rsplit('/').next() {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(Error::Download(format!("no file name in URL: {}", url))),
        },
        None => Err(Error::Download(format!("no file name in URL: {}", url))),
    }
}

/// Check whether a path or URL names a compressed file.
pub fn is_compressed(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path).to_lowercase();
    path.ends_with(".gz") || path.ends_with(".zip") || path.ends_with(".7z")
}

fn strip_gz_extension(file_name: &str) -> &str {
    file_name.strip_suffix(".gz").unwrap_or(file_name)
}

/// Copy `reader` to `target` through a temporary file, gunzipping if asked.
///
/// Returns the number of bytes written.
fn write_to_file<R: Read>(reader: R, target: &Path, decompress: bool) -> Result<u64> {
    let mut temp_name = target.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let file = File::create(&temp_path)?;

    match finish_temp_file(reader, file, &temp_path, target, decompress) {
        Ok(written) => Ok(written),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

/// Fill `file`, flush it to disk and rename it over `target`.
fn finish_temp_file<R: Read>(
    mut reader: R,
    file: File,
    temp_path: &Path,
    target: &Path,
    decompress: bool,
) -> Result<u64> {
    let mut writer = BufWriter::new(file);

    let written = if decompress {
        io::copy(&mut GzDecoder::new(&mut reader), &mut writer)?
    } else {
        io::copy(&mut reader, &mut writer)?
    };

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    // Atomic rename
    fs::rename(temp_path, target)?;
    Ok(written)
}
