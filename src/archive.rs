use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;
use crate::error::{Error, Result};

pub struct Archive<T> {
    zip: ZipArchive<T>,
    path: PathBuf,
}

impl Archive<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Archive<File>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Archive {
            path: path.to_owned(),
            source: ZipError::Io(e),
        })?;
        Archive::new(file, path)
    }
}

impl<T: Read + Seek> Archive<T> {
    /// Wrap an already-open reader.  `path` is only used in error messages.
    pub fn new(file: T, path: impl Into<PathBuf>) -> Result<Archive<T>> {
        let path = path.into();
        match ZipArchive::new(file) {
            Ok(zip) => Ok(Archive { zip, path }),
            Err(source) => Err(Error::Archive { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_names(&self) -> Vec<String> {
        self.zip.file_names().map(|s| s.to_owned()).collect()
    }

    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = match self.zip.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(Error::EntryNotFound(name.to_owned())),
            Err(source) => return Err(Error::Archive { path: self.path.clone(), source }),
        };
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).map_err(|e| Error::Archive {
            path: self.path.clone(),
            source: ZipError::Io(e),
        })?;
        Ok(buf)
    }
}
