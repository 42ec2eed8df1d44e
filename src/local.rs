use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::exceptions::{FsError, Result};
use crate::fs::{FileHandle, FileSystem};
use crate::mode::OpenMode;
use crate::resolve::ResolvePolicy;

/// Host filesystem access under a fixed base path.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    base_path: PathBuf,
    policy: ResolvePolicy,
}

impl LocalFileSystem {
    /// The base path is not checked for existence.
    pub fn new<P: AsRef<Path>>(base_path: P) -> LocalFileSystem {
        LocalFileSystem::with_policy(base_path, ResolvePolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(base_path: P, policy: ResolvePolicy) -> LocalFileSystem {
        LocalFileSystem {
            base_path: base_path.as_ref().to_owned(),
            policy,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        self.policy.resolve(&self.base_path, path)
    }
}

impl FileSystem for LocalFileSystem {
    fn open(&self, path: &Path, mode: &str) -> Result<Box<dyn FileHandle>> {
        let open_mode = OpenMode::parse(mode)?;
        let resolved = self.resolve(path)?;
        debug!(
            "opening {} with mode {:?} (binary: {})",
            resolved.display(),
            mode,
            open_mode.binary
        );
        let file = open_mode
            .open_options()
            .open(&resolved)
            .map_err(|e| FsError::Open(resolved.clone(), e))?;
        Ok(Box::new(LocalFile::new(file, open_mode)))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let resolved = self.resolve(path)?;
        debug!("removing {}", resolved.display());
        std::fs::remove_file(&resolved).map_err(|e| FsError::Remove(resolved, e))
    }

    fn rename(&self, old_path: &Path, new_path: &Path) -> Result<()> {
        let from = self.resolve(old_path)?;
        let to = self.resolve(new_path)?;
        debug!("renaming {} to {}", from.display(), to.display());
        std::fs::rename(&from, &to).map_err(|e| FsError::Rename(from, to, e))
    }

    fn exists(&self, path: &Path) -> bool {
        match self.resolve(path) {
            Ok(resolved) => resolved.exists(),
            Err(e) => {
                trace!("exists check failed: {}", e);
                false
            }
        }
    }
}

/// Handle returned by [`LocalFileSystem::open`].
///
/// Writes are buffered; pending output is flushed before any read or
/// reposition so the handle always sees its own writes.
pub struct LocalFile {
    inner: BufWriter<File>,
    mode: OpenMode,
}

impl LocalFile {
    fn new(file: File, mode: OpenMode) -> LocalFile {
        LocalFile {
            inner: BufWriter::new(file),
            mode,
        }
    }
}

impl FileHandle for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.mode.read {
            return Err(FsError::NotReadable);
        }
        self.inner.flush()?;
        let n = self.inner.get_mut().read(buf)?;
        trace!("read {} of {} bytes", n, buf.len());
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if !self.mode.write {
            return Err(FsError::NotWritable);
        }
        self.inner.write_all(buf)?;
        trace!("wrote {} bytes", buf.len());
        Ok(buf.len())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.inner.seek(pos).map_err(FsError::Seek)
    }

    fn tell(&mut self) -> Result<u64> {
        self.inner.stream_position().map_err(FsError::Seek)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        self.flush()
    }
}
