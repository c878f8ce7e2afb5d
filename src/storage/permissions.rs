//! File permissions
//!
//! Reconciles on-disk permission bits with a declared mode. Creation calls
//! apply the umask, so the bits can end up narrower than requested.

use std::io::Result;
use std::path::Path;

/// Permission bits compared during reconciliation
pub const MODE_MASK: u32 = 0o777;

/// Make the permission bits of `path` match `mode`.
///
/// Returns true when a chmod was issued.
#[cfg(unix)]
pub async fn sync_mode(path: &Path, mode: u32) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let current = metadata.permissions().mode() & MODE_MASK;
    let expected = mode & MODE_MASK;
    if current == expected {
        return Ok(false);
    }

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(expected)).await?;
    Ok(true)
}

#[cfg(not(unix))]
pub async fn sync_mode(_path: &Path, _mode: u32) -> Result<bool> {
    Ok(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn mode_of(path: &Path) -> u32 {
        std::fs::metadata(path).unwrap().permissions().mode() & MODE_MASK
    }

    #[tokio::test]
    async fn test_sync_mode_widens_permissions() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.txt");
        std::fs::write(&path, b"x").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        assert!(sync_mode(&path, 0o644).await.unwrap());
        assert_eq!(mode_of(&path), 0o644);
        assert!(!sync_mode(&path, 0o100644).await.unwrap());
    }
}
