// SPDX-License-Identifier: GPL-3.0-only

//! Saving and sharing composed strips
//!
//! `download` writes the strip to disk, optionally via a native save
//! dialog. `share` saves the strip and then walks a fallback chain; every
//! step is wrapped so a failure cascades to the next instead of aborting
//! the flow. Only an explicit dialog dismissal is treated as cancellation.

use crate::compose::CompositeStrip;
use crate::errors::ExportError;
use crate::storage;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a share attempt concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform handler took the file
    Opened,
    /// Fell back to revealing the containing folder
    OpenedFolder,
    /// Nothing external worked; the file is saved on disk
    SavedOnly,
}

/// Save the strip to disk.
///
/// Interactive mode raises a native save dialog seeded with a timestamped
/// filename; dismissing it returns `ExportError::Cancelled`, which callers
/// treat as silent. Non-interactive mode saves straight into `dir`.
pub async fn download(
    strip: &CompositeStrip,
    dir: &Path,
    interactive: bool,
) -> Result<PathBuf, ExportError> {
    if interactive {
        let suggested = storage::unique_strip_path(dir);
        let file_name = suggested
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "strip.png".to_string());

        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_title("Save photo strip")
            .set_directory(dir)
            .set_file_name(file_name)
            .save_file()
            .await
        else {
            // User closed the dialog; not an error worth surfacing
            return Err(ExportError::Cancelled);
        };

        let path = handle.path().to_path_buf();
        tokio::fs::write(&path, &strip.data)
            .await
            .map_err(|e| ExportError::SaveFailed(e.to_string()))?;

        info!(path = %path.display(), "Strip saved via dialog");
        return Ok(path);
    }

    storage::save_strip(strip.data.clone(), dir.to_path_buf())
        .await
        .map_err(ExportError::SaveFailed)
}

/// Share the strip, cascading through fallbacks.
///
/// The strip is saved first so there is always a file to fall back to,
/// then: platform handler on the file → containing folder → saved-only.
pub async fn share(
    strip: &CompositeStrip,
    dir: &Path,
) -> Result<(PathBuf, ShareOutcome), ExportError> {
    let path = storage::save_strip(strip.data.clone(), dir.to_path_buf())
        .await
        .map_err(ExportError::SaveFailed)?;

    let outcome = run_share_chain(&path, |target| open::that_detached(target));
    Ok((path, outcome))
}

/// Walk the share fallback chain with the given opener.
///
/// Each step is wrapped so its failure cascades to the next one rather
/// than aborting the whole flow.
fn run_share_chain(
    path: &Path,
    opener: impl Fn(&Path) -> std::io::Result<()>,
) -> ShareOutcome {
    match opener(path) {
        Ok(()) => {
            info!(path = %path.display(), "Strip handed to platform handler");
            return ShareOutcome::Opened;
        }
        Err(e) => {
            warn!(error = %e, "Platform handler failed, trying containing folder");
        }
    }

    if let Some(parent) = path.parent() {
        match opener(parent) {
            Ok(()) => {
                info!(dir = %parent.display(), "Opened strip folder");
                return ShareOutcome::OpenedFolder;
            }
            Err(e) => {
                warn!(error = %e, "Folder open failed, keeping saved file only");
            }
        }
    }

    ShareOutcome::SavedOnly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CompositeStrip;
    use std::io;

    fn strip() -> CompositeStrip {
        CompositeStrip {
            data: vec![1, 2, 3],
            width: 4,
            height: 4,
        }
    }

    #[tokio::test]
    async fn test_download_direct_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = download(&strip(), dir.path(), false).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_share_chain_prefers_file_handler() {
        let outcome = run_share_chain(Path::new("/tmp/a/strip.png"), |_| Ok(()));
        assert_eq!(outcome, ShareOutcome::Opened);
    }

    #[test]
    fn test_share_chain_falls_back_to_folder() {
        let outcome = run_share_chain(Path::new("/tmp/a/strip.png"), |p| {
            if p.extension().is_some() {
                Err(io::Error::other("no handler"))
            } else {
                Ok(())
            }
        });
        assert_eq!(outcome, ShareOutcome::OpenedFolder);
    }

    #[test]
    fn test_share_chain_survives_total_failure() {
        let outcome =
            run_share_chain(Path::new("/tmp/a/strip.png"), |_| Err(io::Error::other("nope")));
        assert_eq!(outcome, ShareOutcome::SavedOnly);
    }
}
