//! Folder checks for the review tree and report writes into output folders.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// What a folder is used for; named in every folder error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRole {
    Input,
    Output,
    Log,
}

impl fmt::Display for FolderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FolderRole::Input => "input",
            FolderRole::Output => "output",
            FolderRole::Log => "log",
        })
    }
}

#[derive(Debug, Error)]
pub enum FolderError {
    #[error("{role} folder {} is not a directory", path.display())]
    NotAFolder { role: FolderRole, path: PathBuf },
    #[error("{role} folder {} is not writable: {source}", path.display())]
    NotWritable {
        role: FolderRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not save report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FolderError {
    pub fn path(&self) -> &Path {
        match self {
            FolderError::NotAFolder { path, .. }
            | FolderError::NotWritable { path, .. }
            | FolderError::ReportWrite { path, .. } => path,
        }
    }
}

/// Creates `dir` if missing and checks that new files can be placed in it.
pub fn ensure_writable_dir(dir: &Path, role: FolderRole) -> Result<(), FolderError> {
    let not_writable = |source| FolderError::NotWritable {
        role,
        path: dir.to_path_buf(),
        source,
    };
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => {
            return Err(FolderError::NotAFolder {
                role,
                path: dir.to_path_buf(),
            })
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(not_writable)?;
        }
        Err(err) => return Err(not_writable(err)),
    }
    // Dropped immediately; the scratch file is removed with it.
    NamedTempFile::new_in(dir).map_err(not_writable)?;
    Ok(())
}

/// Saves a rendered report as `{output_dir}/{filename}`.
///
/// The bytes go to a scratch file beside the target first, so the report
/// either appears complete or not at all. A report with the same name is
/// replaced.
pub fn write_report(
    output_dir: &Path,
    filename: &str,
    content: &[u8],
) -> Result<PathBuf, FolderError> {
    ensure_writable_dir(output_dir, FolderRole::Output)?;

    let target = output_dir.join(filename);
    let write_failed = |source| FolderError::ReportWrite {
        path: target.clone(),
        source,
    };
    let mut scratch = NamedTempFile::new_in(output_dir).map_err(write_failed)?;
    scratch.write_all(content).map_err(write_failed)?;
    scratch.as_file_mut().sync_all().map_err(write_failed)?;

    if target.exists() {
        fs::remove_file(&target).map_err(write_failed)?;
    }
    scratch
        .persist(&target)
        .map_err(|err| write_failed(err.error))?;
    Ok(target)
}
