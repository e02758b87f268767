use std::path::PathBuf;

use review_core::{PathResolver, Scope};
use review_logging::{review_info, review_warn};
use thiserror::Error;

use crate::folder::{ensure_writable_dir, FolderError, FolderRole};

/// Folder under the home directory used when the base path is unwritable.
const FALLBACK_DIR_NAME: &str = "LMReview_Review";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error("no fallback directory available (home directory unknown)")]
    NoFallback,
}

/// Result of [`prepare_base`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBase {
    pub resolver: PathResolver,
    /// Original base when startup had to relocate.
    pub relocated_from: Option<PathBuf>,
}

/// `~/LMReview_Review`, if a home directory is known.
pub fn default_fallback_base() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(FALLBACK_DIR_NAME))
}

/// Creates the log folder and the input and output folders of every
/// project × delivery pair.
pub fn ensure_structure(
    resolver: &PathResolver,
    projects: &[String],
    deliveries: &[String],
) -> Result<(), SetupError> {
    ensure_writable_dir(&resolver.log_dir(), FolderRole::Log)?;
    for project in projects {
        for delivery in deliveries {
            let Some(scope) = Scope::new(project.as_str(), delivery.as_str()) else {
                review_warn!("Skipping blank project/delivery {:?}/{:?}", project, delivery);
                continue;
            };
            ensure_writable_dir(&resolver.input_dir(&scope), FolderRole::Input)?;
            ensure_writable_dir(&resolver.output_dir(&scope), FolderRole::Output)?;
        }
    }
    Ok(())
}

/// Ensures the folder structure, relocating once to `fallback` on failure.
pub fn prepare_base(
    resolver: &PathResolver,
    projects: &[String],
    deliveries: &[String],
    fallback: Option<PathBuf>,
) -> Result<PreparedBase, SetupError> {
    match ensure_structure(resolver, projects, deliveries) {
        Ok(()) => Ok(PreparedBase {
            resolver: resolver.clone(),
            relocated_from: None,
        }),
        Err(err) => {
            let fallback = fallback.ok_or(SetupError::NoFallback)?;
            review_warn!(
                "Base path not writable ({}); relocating to {:?}",
                err,
                fallback
            );
            let relocated = resolver.with_base(fallback);
            ensure_structure(&relocated, projects, deliveries)?;
            review_info!("Using fallback base {:?}", relocated.base_path());
            Ok(PreparedBase {
                resolver: relocated,
                relocated_from: Some(resolver.base_path().to_path_buf()),
            })
        }
    }
}
