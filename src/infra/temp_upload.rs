use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use std::{
    error::Error as StdError,
    io,
    path::{Path, PathBuf},
    pin::pin,
};
use tempfile::{Builder, NamedTempFile};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::value_objects::media::MediaKind;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("temporary upload storage failed: {0}")]
    Io(#[from] io::Error),

    #[error("upload body could not be read: {0}")]
    Body(#[source] Box<dyn StdError + Send + Sync>),
}

/// Directory holding uploads for the duration of a single request.
#[derive(Debug, Clone)]
pub struct TempUploadStore {
    dir: PathBuf,
}

impl TempUploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `chunks` to a fresh file as they arrive. The file is removed
    /// again if the stream or the disk fails half way.
    pub async fn persist<S, C, E>(
        &self,
        kind: MediaKind,
        chunks: S,
    ) -> Result<TempUpload, PersistError>
    where
        S: Stream<Item = Result<C, E>>,
        C: AsRef<[u8]>,
        E: StdError + Send + Sync + 'static,
    {
        let file = Builder::new()
            .prefix("upload-")
            .suffix(kind.file_suffix())
            .tempfile_in(&self.dir)?;
        let mut upload = TempUpload { file, kind, size: 0 };

        let mut out = tokio::fs::File::create(upload.path()).await?;
        let mut chunks = pin!(chunks);
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|err| PersistError::Body(Box::new(err)))?;
            out.write_all(chunk.as_ref()).await?;
            upload.size += chunk.as_ref().len() as u64;
        }
        out.flush().await?;

        debug!(
            path = %upload.path().display(),
            %kind,
            size = upload.size,
            "temp upload: persisted"
        );

        Ok(upload)
    }
}

/// An uploaded file on disk. Removed when discarded or dropped.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    kind: MediaKind,
    size: u64,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Bytes written to disk.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }

    pub fn discard(self) {
        let path = self.path().to_path_buf();
        let kind = self.kind;
        match self.file.close() {
            Ok(()) => debug!(path = %path.display(), %kind, "temp upload: removed"),
            Err(err) => warn!(
                path = %path.display(),
                %kind,
                error = %err,
                "temp upload: failed to remove file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    fn body(parts: &[&str]) -> impl Stream<Item = Result<Vec<u8>, io::Error>> {
        let chunks: Vec<_> = parts
            .iter()
            .map(|p| Ok::<_, io::Error>(p.as_bytes().to_vec()))
            .collect();
        stream::iter(chunks)
    }

    #[tokio::test]
    async fn persist_writes_bytes_with_kind_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempUploadStore::new(dir.path()).unwrap();

        let upload = store
            .persist(MediaKind::Video, body(&["mp4", "-", "bytes"]))
            .await
            .unwrap();

        assert!(upload.path().starts_with(dir.path()));
        assert_eq!(upload.path().extension().unwrap(), "mp4");
        assert_eq!(upload.kind(), MediaKind::Video);
        assert_eq!(upload.size(), 9);
        assert_eq!(upload.read().await.unwrap(), b"mp4-bytes");
    }

    #[tokio::test]
    async fn broken_body_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempUploadStore::new(dir.path()).unwrap();
        let chunks = stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
        ]);

        let err = store.persist(MediaKind::Image, chunks).await.unwrap_err();

        assert!(matches!(err, PersistError::Body(_)));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn discard_and_drop_both_remove_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempUploadStore::new(dir.path()).unwrap();

        let discarded = store.persist(MediaKind::Image, body(&["a"])).await.unwrap();
        let dropped = store.persist(MediaKind::Image, body(&["b"])).await.unwrap();
        assert_eq!(entries(dir.path()), 2);

        discarded.discard();
        assert_eq!(entries(dir.path()), 1);

        drop(dropped);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn concurrent_uploads_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempUploadStore::new(dir.path()).unwrap();

        let first = store.persist(MediaKind::Image, body(&["same"])).await.unwrap();
        let second = store.persist(MediaKind::Image, body(&["same"])).await.unwrap();

        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads").join("incoming");

        let store = TempUploadStore::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }
}
