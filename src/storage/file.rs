use super::{check_key, DurableStorage, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first write. Writes go through a temporary
/// file and a rename so a crash never leaves a half-written blob behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl DurableStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let staging = self.dir.join(format!(".{}.json.tmp", key));
        tokio::fs::write(&staging, value).await?;
        tokio::fs::rename(&staging, &path).await?;
        debug!(?path, "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.read("session").await.unwrap(), None);
        storage.write("session", "{}".into()).await.unwrap();

        let reopened = FileStorage::new(dir.path().join("state"));
        assert_eq!(reopened.read("session").await.unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("state/session.json").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove("cart_transaction").await.unwrap();

        storage.write("cart_transaction", "1".into()).await.unwrap();
        storage.remove("cart_transaction").await.unwrap();
        assert_eq!(storage.read("cart_transaction").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let result = storage.write("../escape", "x".into()).await;
        assert_eq!(result, Err(StorageError::InvalidKey("../escape".into())));
    }
}
