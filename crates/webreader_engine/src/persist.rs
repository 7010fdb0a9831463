use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("output directory {path} missing or not writable: {source}")]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists and accepts new files; create it if missing.
/// Safe to call repeatedly.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |source| PersistError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(PersistError::NotADirectory(dir.to_path_buf())),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(dir_error)?;
        }
        Err(err) => return Err(dir_error(err)),
    }
    // Writability probe; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(dir_error)?;
    Ok(())
}

/// Writes whole files into one directory through a temp file and a rename,
/// so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` as the full text of `{dir}/{filename}`, replacing any
    /// existing file of that name.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Windows refuses to rename over an existing file; elsewhere the
        // rename replaces it atomically.
        #[cfg(windows)]
        if target.is_file() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
