use super::{DurableStorage, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A record type with a fixed storage key and schema version.
///
/// Bump `VERSION` whenever the serialized shape changes; older blobs are then
/// ignored instead of misread.
pub trait PersistedRecord: Serialize + DeserializeOwned + Send + Sync {
    const KEY: &'static str;
    const VERSION: u32;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: serde_json::Value,
}

/// Reads the record stored under `R::KEY`.
///
/// Returns `Ok(None)` when nothing is stored, when the blob was written by
/// another version, or when it is corrupt. Only storage failures are errors.
pub async fn load<R: PersistedRecord>(
    storage: &dyn DurableStorage,
) -> Result<Option<R>, StorageError> {
    let key = R::KEY;
    let Some(raw) = storage.read(key).await? else {
        return Ok(None);
    };

    let envelope: Envelope = match serde_json::from_str(&raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable record");
            return Ok(None);
        }
    };
    if envelope.version != R::VERSION {
        debug!(
            key,
            stored = envelope.version,
            expected = R::VERSION,
            "Ignoring record from another version"
        );
        return Ok(None);
    }

    match serde_json::from_value(envelope.data) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(key, error = %e, "Discarding record with unexpected shape");
            Ok(None)
        }
    }
}

/// Writes `record` under `R::KEY`, replacing whatever was there.
pub async fn save<R: PersistedRecord>(
    storage: &dyn DurableStorage,
    record: &R,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&EnvelopeRef {
        version: R::VERSION,
        data: record,
    })?;
    storage.write(R::KEY, raw).await
}

pub async fn clear<R: PersistedRecord>(storage: &dyn DurableStorage) -> Result<(), StorageError> {
    storage.remove(R::KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        note: String,
    }

    impl PersistedRecord for Draft {
        const KEY: &'static str = "draft";
        const VERSION: u32 = 2;
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let draft = Draft {
            note: "call supplier".into(),
        };
        save(&storage, &draft).await.unwrap();

        assert_eq!(
            storage.read("draft").await.unwrap().as_deref(),
            Some(r#"{"version":2,"data":{"note":"call supplier"}}"#)
        );
        assert_eq!(load::<Draft>(&storage).await.unwrap(), Some(draft));
    }

    #[tokio::test]
    async fn test_version_mismatch_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage
            .write("draft", r#"{"version":1,"data":{"note":"old"}}"#.into())
            .await
            .unwrap();
        assert_eq!(load::<Draft>(&storage).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage.write("draft", "{not json".into()).await.unwrap();
        assert_eq!(load::<Draft>(&storage).await.unwrap(), None);

        storage
            .write("draft", r#"{"version":2,"data":{"text":1}}"#.into())
            .await
            .unwrap();
        assert_eq!(load::<Draft>(&storage).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let storage = MemoryStorage::new();
        save(&storage, &Draft { note: "x".into() }).await.unwrap();
        assert!(storage.read("draft").await.unwrap().is_some());

        clear::<Draft>(&storage).await.unwrap();
        assert_eq!(load::<Draft>(&storage).await.unwrap(), None);
    }
}
