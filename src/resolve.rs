use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::exceptions::FsError;

/// How a caller-supplied path is mapped onto the base path.
///
/// Absolute arguments are always re-rooted under the base; the policies only
/// differ in how `..` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvePolicy {
    /// Plain prefix concatenation. `..` is handed to the OS as-is.
    Join,
    /// Lexically normalised; a `..` that would climb above the base is an error.
    #[default]
    Confined,
}

impl ResolvePolicy {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvePolicy::Join => "join",
            ResolvePolicy::Confined => "confined",
        }
    }

    pub fn resolve(&self, base: &Path, path: &Path) -> Result<PathBuf, FsError> {
        match self {
            ResolvePolicy::Join => Ok(join(base, path)),
            ResolvePolicy::Confined => confine(base, path),
        }
    }
}

impl FromStr for ResolvePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(ResolvePolicy::Join),
            "confined" => Ok(ResolvePolicy::Confined),
            _ => Err(format!("unknown resolve policy: {} (expected join or confined)", s)),
        }
    }
}

fn join(base: &Path, path: &Path) -> PathBuf {
    let mut resolved = base.to_path_buf();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

fn confine(base: &Path, path: &Path) -> Result<PathBuf, FsError> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(FsError::PathEscapesRoot(path.to_path_buf()));
                }
            }
            Component::Normal(part) => parts.push(part),
        }
    }
    let mut resolved = base.to_path_buf();
    resolved.extend(parts);
    Ok(resolved)
}
