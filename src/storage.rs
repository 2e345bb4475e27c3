// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for composed strips

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Subdirectory of the pictures directory holding strips
const STRIPS_SUBDIR: &str = "photobooth";

/// Directory where strips are saved.
///
/// An explicit override wins; otherwise the XDG pictures directory, the
/// home directory, and finally the working directory.
pub fn strips_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Some(pictures) = dirs::picture_dir() {
        return pictures.join(STRIPS_SUBDIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join("Pictures").join(STRIPS_SUBDIR);
    }

    PathBuf::from(".")
}

/// Build a strip path in `dir` that does not collide with existing files.
///
/// The name carries a millisecond timestamp; a numeric suffix covers calls
/// landing inside the same millisecond.
pub fn unique_strip_path(dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%3f");
    let base = format!("strip_{}", timestamp);

    let candidate = dir.join(format!("{}.png", base));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{}_{}.png", base, counter));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Save strip bytes under a fresh timestamped name and return the path
pub async fn save_strip(data: Vec<u8>, dir: PathBuf) -> Result<PathBuf, String> {
    let path = tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&dir).map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

        let path = unique_strip_path(&dir);
        debug!(path = %path.display(), "Writing strip");
        std::fs::write(&path, &data).map_err(|e| format!("Failed to save strip: {}", e))?;
        Ok::<_, String>(path)
    })
    .await
    .map_err(|e| format!("Save task error: {}", e))??;

    info!(path = %path.display(), "Strip saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_path_skips_existing() {
        let dir = tempfile::tempdir().unwrap();

        let first = unique_strip_path(dir.path());
        std::fs::write(&first, b"x").unwrap();

        let second = unique_strip_path(dir.path());
        assert_ne!(first, second);
        assert!(!second.exists());
    }

    #[tokio::test]
    async fn test_rapid_saves_never_collide() {
        let dir = tempfile::tempdir().unwrap();

        let mut paths = Vec::new();
        for _ in 0..5 {
            let path = save_strip(b"strip".to_vec(), dir.path().to_path_buf())
                .await
                .unwrap();
            paths.push(path);
        }

        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), paths.len(), "colliding filenames: {paths:?}");
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = strips_dir(Some(Path::new("/tmp/custom")));
        assert_eq!(dir, PathBuf::from("/tmp/custom"));
    }
}
