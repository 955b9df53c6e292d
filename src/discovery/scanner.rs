//! Directory scanning for reward trace files.
//!
//! Lists the entries directly inside the scan directory (no recursion)
//! and decides which of them are eligible for parsing.

use crate::utils::config::TRACE_SUFFIX;
use crate::utils::error::DiscoveryError;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A filesystem entry found in the scan directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFile {
    /// Full path to the entry
    pub path: PathBuf,

    /// Bare file name, including extension
    pub file_name: String,

    /// Size in bytes (0 for anything that is not a regular file)
    pub size: u64,

    /// Suffix including the leading dot (e.g. ".log"), if any
    pub suffix: Option<String>,

    /// Whether the entry resolves to a regular file
    pub is_file: bool,
}

impl TraceFile {
    /// Check whether this entry should be parsed as a reward trace
    ///
    /// **Public** - regular file, non-empty, suffix exactly `.log`
    pub fn is_eligible(&self) -> bool {
        self.is_file && self.size > 0 && self.suffix.as_deref() == Some(TRACE_SUFFIX)
    }
}

/// List every entry directly inside `dir`, in filesystem order
///
/// **Public** - main entry point for discovery
///
/// # Arguments
/// * `dir` - Directory to scan
///
/// # Returns
/// One `TraceFile` per entry. The order is whatever the platform's
/// directory listing yields; it is not sorted.
///
/// # Errors
/// * `DiscoveryError::DirectoryNotFound` - `dir` is missing or not a directory
/// * `DiscoveryError::ReadDir` - listing failed (e.g. permissions)
/// * `DiscoveryError::Metadata` - an entry's metadata could not be read
pub fn scan_directory(dir: impl AsRef<Path>) -> Result<Vec<TraceFile>, DiscoveryError> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound(dir.to_path_buf()));
    }

    debug!("Scanning directory: {}", dir.display());

    let entries = fs::read_dir(dir).map_err(|source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        files.push(describe_entry(entry.path())?);
    }

    debug!("Found {} entries in {}", files.len(), dir.display());
    Ok(files)
}

/// List only the entries eligible for parsing
///
/// **Public** - convenience wrapper over `scan_directory`
pub fn eligible_trace_files(dir: impl AsRef<Path>) -> Result<Vec<TraceFile>, DiscoveryError> {
    Ok(scan_directory(dir)?
        .into_iter()
        .filter(TraceFile::is_eligible)
        .collect())
}

/// Build a `TraceFile` for one directory entry
///
/// **Private** - symlinks are followed; a dangling link counts as
/// "not a regular file" rather than an error
fn describe_entry(path: PathBuf) -> Result<TraceFile, DiscoveryError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()));

    let (is_file, size) = match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => (true, meta.len()),
        Ok(_) => (false, 0),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Skipping dangling entry: {}", path.display());
            (false, 0)
        }
        Err(source) => return Err(DiscoveryError::Metadata { path, source }),
    };

    Ok(TraceFile {
        path,
        file_name,
        size,
        suffix,
        is_file,
    })
}
