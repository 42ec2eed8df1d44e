use std::error::Error;
use std::path::PathBuf;
use std::{fmt, io};

#[derive(Debug)]
pub enum FsError {
    Io(io::Error),
    InvalidMode(String),
    PathEscapesRoot(PathBuf),
    Open(PathBuf, io::Error),
    Seek(io::Error),
    NotReadable,
    NotWritable,
    Remove(PathBuf, io::Error),
    Rename(PathBuf, PathBuf, io::Error),
    InvalidPattern(String, String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::InvalidMode(m) => write!(f, "Invalid open mode: {:?}", m),
            Self::PathEscapesRoot(x) => write!(f, "Path {} escapes the base path", x.display()),
            Self::Open(x, err) => write!(f, "Unable to open {}: {}", x.display(), err),
            Self::Seek(err) => write!(f, "Seek failed: {}", err),
            Self::NotReadable => write!(f, "Handle was not opened for reading"),
            Self::NotWritable => write!(f, "Handle was not opened for writing"),
            Self::Remove(x, err) => write!(f, "Unable to remove {}: {}", x.display(), err),
            Self::Rename(from, to, err) => write!(
                f,
                "Unable to rename {} to {}: {}",
                from.display(),
                to.display(),
                err
            ),
            Self::InvalidPattern(p, s) => write!(f, "Invalid glob pattern {}: {}", p, s),
        }
    }
}

impl From<io::Error> for FsError {
    fn from(err: io::Error) -> FsError {
        FsError::Io(err)
    }
}

impl Error for FsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) | Self::Seek(err) => Some(err),
            Self::Open(_, err) | Self::Remove(_, err) | Self::Rename(_, _, err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
