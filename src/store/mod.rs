//! Note storage module
//!
//! Notes live as plain files directly inside the cache directory: the file
//! name is the note name, the file content is the note text. There is no
//! index and no locking; every operation is a single filesystem call.

mod note;

pub use note::{CreateNoteRequest, Note};

use crate::error::{NoteError, NoteResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Handle to the cache directory
#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    /// Open the store, creating the cache directory recursively if absent
    pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names are joined verbatim, separators included
    fn note_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Every regular file in the cache directory, in directory-listing order
    pub async fn list(&self) -> NoteResult<Vec<Note>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut notes = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // metadata follows symlinks, so linked notes are listed too
            if !fs::metadata(entry.path()).await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let content = fs::read(entry.path()).await?;
            notes.push(Note {
                name,
                text: String::from_utf8_lossy(&content).into_owned(),
            });
        }

        Ok(notes)
    }

    /// Raw content of note `name`
    pub async fn read(&self, name: &str) -> NoteResult<Vec<u8>> {
        let path = self.note_path(name);
        if !path.is_file() {
            return Err(NoteError::NotFound(name.to_string()));
        }
        fs::read(&path)
            .await
            .map_err(|e| NoteError::from_io(name, e))
    }

    /// Create a new note; fails if one with the same name exists
    pub async fn create(&self, name: &str, text: &str) -> NoteResult<()> {
        if name.is_empty() || text.is_empty() {
            return Err(NoteError::MissingFields);
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.note_path(name))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => NoteError::AlreadyExists(name.to_string()),
                _ => NoteError::Io(e),
            })?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Replace the whole content of an existing note
    pub async fn update(&self, name: &str, content: &[u8]) -> NoteResult<()> {
        let path = self.note_path(name);
        if !path.is_file() {
            return Err(NoteError::NotFound(name.to_string()));
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| NoteError::from_io(name, e))?;
        file.write_all(content).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> NoteResult<()> {
        let path = self.note_path(name);
        if !path.is_file() {
            return Err(NoteError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| NoteError::from_io(name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store() -> (TempDir, NoteStore) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("a").join("b").join("cache");
        let store = NoteStore::open(&root).await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (_dir, store) = open_store().await;
        store.create("a.txt", "hello").await.unwrap();
        assert_eq!(store.read("a.txt").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_create_existing_keeps_content() {
        let (_dir, store) = open_store().await;
        store.create("a.txt", "first").await.unwrap();

        let err = store.create("a.txt", "second").await.unwrap_err();
        assert!(matches!(err, NoteError::AlreadyExists(_)));
        assert_eq!(store.read("a.txt").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields() {
        let (dir, store) = open_store().await;
        assert!(matches!(
            store.create("", "text").await,
            Err(NoteError::MissingFields)
        ));
        assert!(matches!(
            store.create("a.txt", "").await,
            Err(NoteError::MissingFields)
        ));
        assert!(!dir.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_create_in_missing_directory_is_io_error() {
        let (_dir, store) = open_store().await;
        assert!(matches!(
            store.create("nodir/a.txt", "hi").await,
            Err(NoteError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_follows_symlinks() {
        let (_dir, store) = open_store().await;
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("target.txt");
        std::fs::write(&target, "linked").unwrap();
        std::os::unix::fs::symlink(&target, store.root().join("link")).unwrap();
        std::fs::create_dir(store.root().join("subdir")).unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(
            notes,
            vec![Note {
                name: "link".into(),
                text: "linked".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (_dir, store) = open_store().await;
        assert!(matches!(
            store.read("nope").await,
            Err(NoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_content() {
        let (_dir, store) = open_store().await;
        store.create("a.txt", "a much longer original text").await.unwrap();
        store.update("a.txt", b"short").await.unwrap();
        assert_eq!(store.read("a.txt").await.unwrap(), b"short");
    }

    #[tokio::test]
    async fn test_update_missing_creates_nothing() {
        let (dir, store) = open_store().await;
        assert!(matches!(
            store.update("ghost", b"x").await,
            Err(NoteError::NotFound(_))
        ));
        assert!(!dir.path().join("ghost").exists());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = open_store().await;
        store.create("a.txt", "bye").await.unwrap();
        store.delete("a.txt").await.unwrap();
        assert!(matches!(
            store.read("a.txt").await,
            Err(NoteError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("a.txt").await,
            Err(NoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_prepopulated_files() {
        let (dir, store) = open_store().await;
        std::fs::write(dir.path().join("one"), "1").unwrap();
        std::fs::write(dir.path().join("two"), "second").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut notes = store.list().await.unwrap();
        notes.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            notes,
            vec![
                Note { name: "one".into(), text: "1".into() },
                Note { name: "two".into(), text: "second".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_dir, store) = open_store().await;
        assert!(store.list().await.unwrap().is_empty());
    }
}
