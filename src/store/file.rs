//! File-based network configuration store.

use std::io;
use std::path::{Path, PathBuf};

use super::{ConfigStore, StoreError};

/// Extension used by systemd-networkd for interface files.
const NETWORK_EXTENSION: &str = "network";

/// File-based implementation of [`ConfigStore`].
///
/// Maps interface `name` to `{dir}/{name}.network`.
///
/// # Atomic Writes
///
/// Content goes to `{path}.tmp` first and is then renamed over `{path}`,
/// so a network file is either fully replaced or left as it was. When
/// `{path}` is a symlink the rename lands on the resolved target, and an
/// existing file's permissions carry over to the replacement.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the network files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for `interface`.
    #[must_use]
    pub fn path_for(&self, interface: &str) -> PathBuf {
        self.dir.join(format!("{interface}.{NETWORK_EXTENSION}"))
    }

    /// Performs the blocking write.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn write_blocking(path: &Path, content: &str) -> io::Result<()> {
        // A symlinked network file stays a symlink; its target is replaced
        let target = match std::fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(e),
        };
        let permissions = match std::fs::metadata(&target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        // Append .tmp instead of replacing the extension
        // (eth0.network -> eth0.network.tmp)
        let mut temp_name = target.clone().into_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, content)?;

        let result = permissions
            .map_or(Ok(()), |permissions| std::fs::set_permissions(&temp_path, permissions))
            .and_then(|()| std::fs::rename(&temp_path, &target));

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    async fn read(&self, interface: &str) -> Result<String, StoreError> {
        let path = self.path_for(interface);

        let result = tokio::fs::read_to_string(&path).await;
        result.map_err(|source| StoreError::Read { path, source })
    }

    async fn write(&self, interface: &str, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(interface);
        let target = path.clone();
        let content = content.to_string();

        // Use spawn_blocking to avoid blocking the async runtime
        let result = tokio::task::spawn_blocking(move || Self::write_blocking(&target, &content))
            .await
            .unwrap_or_else(|e| Err(io::Error::other(e)));

        result.map_err(|source| StoreError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn path_uses_network_extension() {
        let store = FileConfigStore::new("/etc/systemd/network");

        assert_eq!(store.dir(), Path::new("/etc/systemd/network"));
        assert_eq!(
            store.path_for("eth1"),
            PathBuf::from("/etc/systemd/network/eth1.network")
        );
    }

    #[tokio::test]
    async fn read_returns_file_content() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eth0.network"), "Address=10.0.0.1/8\n").unwrap();
        let store = FileConfigStore::new(dir.path());

        let content = store.read("eth0").await.unwrap();

        assert_eq!(content, "Address=10.0.0.1/8\n");
    }

    #[tokio::test]
    async fn read_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::new(dir.path());

        let error = store.read("eth9").await.unwrap_err();

        match error {
            StoreError::Read { path, source } => {
                assert_eq!(path, dir.path().join("eth9.network"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            StoreError::Write { .. } => panic!("expected read error"),
        }
    }

    #[tokio::test]
    async fn write_replaces_content_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eth0.network"), "old").unwrap();
        let store = FileConfigStore::new(dir.path());

        store.write("eth0", "new").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("eth0.network")).unwrap(),
            "new"
        );
        assert!(!dir.path().join("eth0.network.tmp").exists());
    }

    #[tokio::test]
    async fn write_creates_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::new(dir.path());

        store.write("eth3", "Address=10.3.0.1/16\n").await.unwrap();

        assert_eq!(store.read("eth3").await.unwrap(), "Address=10.3.0.1/16\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("eth1.network");
        std::fs::write(&path, "Address=1.2.3.4/24\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();
        let store = FileConfigStore::new(dir.path());

        store.write("eth1", "Address=5.6.7.8/24\n").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_through_symlink_updates_link_target() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.network");
        let link = dir.path().join("eth1.network");
        std::fs::write(&real, "Address=1.2.3.4/24\n").unwrap();
        std::os::unix::fs::symlink("real.network", &link).unwrap();
        let store = FileConfigStore::new(dir.path());

        store.write("eth1", "Address=5.6.7.8/24\n").await.unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "Address=5.6.7.8/24\n");
        assert!(!dir.path().join("real.network.tmp").exists());
        assert!(!dir.path().join("eth1.network.tmp").exists());
    }

    #[tokio::test]
    async fn write_into_missing_directory_is_write_error() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("missing"));

        let error = store.write("eth0", "content").await.unwrap_err();

        assert!(matches!(error, StoreError::Write { .. }));
    }

    #[tokio::test]
    async fn interfaces_are_independent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eth1.network"), "one").unwrap();
        std::fs::write(dir.path().join("eth2.network"), "two").unwrap();
        let store = FileConfigStore::new(dir.path());

        store.write("eth1", "changed").await.unwrap();

        assert_eq!(store.read("eth1").await.unwrap(), "changed");
        assert_eq!(store.read("eth2").await.unwrap(), "two");
    }
}
