//! # Data product storage
//!
//! The parser never touches files directly: it asks a [`Storage`] backend to open a
//! resource by name. Two backends are provided:
//!
//! - [`FileSystemStorage`] resolves names under a root directory and exposes the
//!   resolved path (used for MIME lookup).
//! - [`MemoryStorage`] keeps blobs in memory and has no paths, so MIME lookup falls
//!   back to plain text.
use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufReader, Cursor, Read},
};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// A name-addressed blob store holding uploaded data products.
pub trait Storage {
    /// Open `name` for reading. The handle is released when dropped.
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Local path of `name`, if the backend has one.
    fn path(&self, _name: &str) -> Option<Utf8PathBuf> {
        None
    }
}

/// Storage backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: Utf8PathBuf,
}

impl FileSystemStorage {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        FileSystemStorage { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Join `name` to the root, refusing names that would leave it.
    fn resolve(&self, name: &str) -> io::Result<Utf8PathBuf> {
        let relative = Utf8Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if name.is_empty() || escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("data product name outside storage root: {name:?}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl Storage for FileSystemStorage {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let path = self.resolve(name)?;
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn path(&self, name: &str) -> Option<Utf8PathBuf> {
        self.resolve(name).ok()
    }
}

/// In-memory storage; resources have no filesystem path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.blobs.insert(name.into(), data.into());
    }
}

impl Storage for MemoryStorage {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        self.blobs
            .get(name)
            .map(|data| Box::new(Cursor::new(data.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

/// MIME type of a data product, guessed from its file extension.
pub fn guess_mimetype(path: &Utf8Path) -> Option<&'static str> {
    let extension = path.extension()?.to_ascii_lowercase();
    match extension.as_str() {
        "psv" | "txt" | "dat" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "fits" | "fz" => Some("image/fits"),
        "xml" => Some("application/xml"),
        "json" => Some("application/json"),
        _ => None,
    }
}

#[cfg(test)]
mod storage_test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_guess_mimetype() {
        assert_eq!(guess_mimetype(Utf8Path::new("obs/ades.psv")), Some("text/plain"));
        assert_eq!(guess_mimetype(Utf8Path::new("ADES.PSV")), Some("text/plain"));
        assert_eq!(guess_mimetype(Utf8Path::new("a.csv")), Some("text/csv"));
        assert_eq!(guess_mimetype(Utf8Path::new("frame.fits")), Some("image/fits"));
        assert_eq!(guess_mimetype(Utf8Path::new("ades.xml")), Some("application/xml"));
        assert_eq!(guess_mimetype(Utf8Path::new("README")), None);
        assert_eq!(guess_mimetype(Utf8Path::new("photo.png")), None);
    }

    #[test]
    fn test_filesystem_open_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut file = File::create(root.join("obs.psv")).unwrap();
        writeln!(file, "stn|ra").unwrap();

        let storage = FileSystemStorage::new(root.clone());
        assert_eq!(storage.path("obs.psv"), Some(root.join("obs.psv")));

        let mut content = String::new();
        storage
            .open("obs.psv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "stn|ra\n");

        let err = storage.open("missing.psv").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_filesystem_rejects_escaping_names() {
        let storage = FileSystemStorage::new("/srv/data");
        for name in ["../etc/passwd", "/etc/passwd", "a/../../b", ""] {
            let err = storage.open(name).err().unwrap();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name}");
            assert_eq!(storage.path(name), None);
        }
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.insert("blob", "stn|ra\n");

        let mut content = String::new();
        storage
            .open("blob")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "stn|ra\n");
        assert_eq!(storage.path("blob"), None);
        assert!(storage.open("other").is_err());
    }
}
