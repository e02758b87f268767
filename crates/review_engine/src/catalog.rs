use std::fs;
use std::io;
use std::path::Path;

use review_core::Catalog;
use review_logging::review_debug;

/// Lists the regular files of `dir` as a tagged/untagged catalog.
///
/// A missing directory is an empty catalog, not an error.
pub fn list_input_files(dir: &Path) -> io::Result<Catalog> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Catalog::default()),
        Err(err) => return Err(err),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        // Follows symlinks, so a link to a regular file is listed.
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => review_debug!("Skipping non UTF-8 file name {:?} in {:?}", raw, dir),
        }
    }
    Ok(Catalog::from_names(names))
}
