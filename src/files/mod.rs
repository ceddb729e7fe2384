//! File-serving collaborator for static routes.
//!
//! # Responsibilities
//! - Open a file named by a request path relative to some root
//! - Refuse names that would escape that root
//!
//! # Design Decisions
//! - Synchronous I/O; static handlers run on the blocking pool
//! - Any failure is an `io::Error`; callers map it to 404

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// File contents plus the path they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Something static files can be read from.
pub trait FileSystem: Send + Sync {
    /// Open `name`, a `/`-separated path relative to the file system's root.
    fn open(&self, name: &str) -> io::Result<OpenedFile>;
}

/// A directory on local disk.
///
/// Directories resolve to their `index.html`.
#[derive(Debug, Clone)]
pub struct Dir {
    root: PathBuf,
}

impl Dir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let mut path = self.root.clone();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        format!("{name} escapes the served directory"),
                    ));
                }
            }
        }
        Ok(path)
    }
}

impl FileSystem for Dir {
    fn open(&self, name: &str) -> io::Result<OpenedFile> {
        let mut path = self.resolve(name)?;
        if path.is_dir() {
            path.push("index.html");
        }
        let contents = fs::read(&path)?;
        Ok(OpenedFile { path, contents })
    }
}
