use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnownIdentitiesError {
    #[error("cannot read known-identity directory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("known-identity directory {0} contains no reference images")]
    Empty(PathBuf),
}

/// Directory of reference images, one identity per file.
///
/// Nothing is cached: the listing is taken fresh on every request so files
/// added while the session runs are picked up by the next recognition.
#[derive(Clone, Debug)]
pub struct KnownIdentityStore {
    dir: PathBuf,
}

impl KnownIdentityStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Regular, non-hidden files in the directory, sorted by name.
    ///
    /// Subdirectories are ignored; grouping is per file, not per folder.
    pub fn reference_files(&self) -> Result<Vec<PathBuf>, KnownIdentitiesError> {
        let read_err = |source| KnownIdentitiesError::Read {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let path = entry.path();
            if !path.is_file() || is_hidden(&path) {
                continue;
            }
            files.push(path);
        }

        if files.is_empty() {
            return Err(KnownIdentitiesError::Empty(self.dir.clone()));
        }
        files.sort();
        Ok(files)
    }
}

/// Name used in logs for a reference file: its stem.
pub fn identity_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
