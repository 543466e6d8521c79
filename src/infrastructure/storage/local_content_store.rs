use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{ContentStore, StorageError};
use crate::domain::value_objects::{DocumentName, Locator};

/// Filesystem content store: one object per locator under `<root>/objects`,
/// written through `<root>/temp` and moved into place with an atomic rename.
pub struct LocalContentStore {
    root: PathBuf,
    durable_writes: bool,
}

impl LocalContentStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            durable_writes: true,
        }
    }

    pub fn with_durability(root: PathBuf, durable_writes: bool) -> Self {
        Self {
            root,
            durable_writes,
        }
    }

    fn objects_dir(&self) -> PathBuf {
        self.root.join("objects")
    }

    fn temp_dir(&self) -> PathBuf {
        self.root.join("temp")
    }

    fn object_path(&self, locator: &Locator) -> PathBuf {
        self.objects_dir().join(locator.as_str())
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn ensure_ready(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.objects_dir()).await?;
        fs::create_dir_all(self.temp_dir()).await?;
        Ok(())
    }

    async fn store(
        &self,
        content: &[u8],
        suggested_name: &DocumentName,
    ) -> Result<Locator, StorageError> {
        // Fresh locator per call: random token plus the original extension.
        let token = Uuid::new_v4();
        let locator = Locator::new(format!("{token}.{}", suggested_name.extension()))
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        let temp_path = self.temp_dir().join(format!("{token}.partial"));
        debug!(path = %temp_path.display(), "writing content to temp file");

        let mut file = File::create(&temp_path).await?;
        if let Err(e) = file.write_all(content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }
        if self.durable_writes {
            if let Err(e) = file.sync_all().await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::Io(e));
            }
        }
        drop(file);

        let final_path = self.object_path(&locator);

        // Locators are never reused, so an existing object here means a token
        // collision; refuse to overwrite it. Only a definite NotFound clears
        // the path, anything else is a real I/O failure.
        match fs::metadata(&final_path).await {
            Ok(_) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::Internal(format!(
                    "locator collision at {locator}"
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::Io(e));
            }
        }

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        debug!(%locator, size = content.len(), "content object stored");
        Ok(locator)
    }

    async fn read(&self, locator: &Locator) -> Result<Vec<u8>, StorageError> {
        fs::read(self.object_path(locator)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(locator.to_string())
            } else {
                StorageError::Io(e)
            }
        })
    }

    async fn delete(&self, locator: &Locator) -> Result<(), StorageError> {
        match fs::remove_file(self.object_path(locator)).await {
            Ok(()) => Ok(()),
            // Idempotent: an absent object is already the desired state.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn exists(&self, locator: &Locator) -> Result<bool, StorageError> {
        match fs::metadata(self.object_path(locator)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn cleanup_orphans(
        &self,
        known: &HashSet<Locator>,
    ) -> Result<Vec<Locator>, StorageError> {
        let mut removed = Vec::new();
        let mut entries = fs::read_dir(self.objects_dir()).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let locator = match Locator::new(file_name) {
                Ok(locator) => locator,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping unparseable object name");
                    continue;
                }
            };

            if !known.contains(&locator) {
                fs::remove_file(entry.path()).await?;
                debug!(%locator, "removed orphaned content object");
                removed.push(locator);
            }
        }

        // Temp files survive only when a write crashed before its rename;
        // nothing references them, so reclaim them in the same sweep.
        let mut temp_entries = fs::read_dir(self.temp_dir()).await?;
        while let Some(entry) = temp_entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                debug!(path = %entry.path().display(), "removed stale temp file");
            }
        }

        Ok(removed)
    }
}
