//! Filter discovery from a directory of executables

use crate::filter::{CommandFilter, FilterRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Conventional filters directory in the working directory
pub const DEFAULT_FILTERS_DIR: &str = "filters";

/// Errors raised while enumerating the filters directory
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Filters directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("No filter programs found in {}", path.display())]
    NoFilters { path: PathBuf },

    #[error("{name} is not a filter program")]
    NotAFilter { name: String },

    #[error("Failed to read filters directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Build a registry from every program in `dir`.
///
/// Each file is registered under its file stem, so `filters/upper.sh` becomes
/// the `upper` filter. Every entry must be a regular file, and on unix it
/// must also be executable.
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<FilterRegistry, DiscoveryError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let io_err = |source| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();

    if paths.is_empty() {
        return Err(DiscoveryError::NoFilters {
            path: dir.to_path_buf(),
        });
    }

    let mut registry = FilterRegistry::new();
    for path in paths {
        let name = filter_name(&path);
        if !is_filter_program(&path) {
            return Err(DiscoveryError::NotAFilter { name });
        }
        debug!("Discovered filter {} at {}", name, path.display());
        registry.register(name, Arc::new(CommandFilter::new(path)));
    }

    info!("Discovered {} filters in {}", registry.len(), dir.display());
    Ok(registry)
}

fn filter_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(unix)]
fn is_filter_program(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_filter_program(path: &Path) -> bool {
    path.is_file()
}
