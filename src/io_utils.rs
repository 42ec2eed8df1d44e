use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::{fs, io};

use glob::Pattern;
use log::error;

use crate::exceptions::FsError;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

pub fn walk_dir(dir: &Path, include_hidden: bool) -> io::Result<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    if dir.is_dir() {
        match fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok(entry) => {
                            let path = entry.path();
                            if !include_hidden && is_hidden(&path) {
                                continue;
                            }
                            let file_type = match entry.file_type() {
                                Ok(t) => t,
                                Err(e) => {
                                    error!("Unable to stat {}: {}", path.display(), e);
                                    continue;
                                }
                            };
                            // symlinked directories are never followed
                            if file_type.is_symlink() {
                                if path.is_file() {
                                    files.insert(path);
                                }
                            } else if file_type.is_file() {
                                files.insert(path);
                            } else if file_type.is_dir() {
                                files.extend(walk_dir(&path, include_hidden)?);
                            }
                        }
                        Err(e) => error!("Unable to read entry in dir: {}", e),
                    }
                }
            }
            Err(e) => error!("Read dir failed: {}", e),
        }
    }
    Ok(files)
}

/// Lists files below `base` as paths relative to it, optionally keeping only
/// those matching a glob pattern (also relative to `base`).
pub fn list_files(
    base: &Path,
    pattern: Option<&str>,
    include_hidden: bool,
) -> Result<Vec<PathBuf>, FsError> {
    let pattern = match pattern {
        Some(p) => Some(
            Pattern::new(p).map_err(|e| FsError::InvalidPattern(p.to_string(), e.to_string()))?,
        ),
        None => None,
    };

    let files = walk_dir(base, include_hidden)?
        .into_iter()
        .filter_map(|path| path.strip_prefix(base).ok().map(Path::to_path_buf))
        .filter(|rel| match pattern {
            Some(ref p) => p.matches_path(rel),
            None => true,
        })
        .collect();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_walk_dir() -> io::Result<()> {
        // Create a temporary directory for testing
        let temp_dir = tempdir()?;
        let temp_path = temp_dir.path();

        let file_path = temp_path.join("file.txt");
        fs::write(&file_path, "Test file")?;

        let subdir_path = temp_path.join("subdir");
        fs::create_dir(&subdir_path)?;

        let subfile_path = subdir_path.join("subfile.txt");
        fs::write(&subfile_path, "Test subfile")?;

        let hidden_path = temp_path.join(".hidden");
        fs::write(&hidden_path, "Hidden")?;

        let result = walk_dir(temp_path, false)?;
        assert!(result.contains(&file_path));
        assert!(result.contains(&subfile_path));
        assert!(!result.contains(&hidden_path));

        let result = walk_dir(temp_path, true)?;
        assert!(result.contains(&hidden_path));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_dir_skips_symlinked_dirs() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let temp_path = temp_dir.path();

        let subdir_path = temp_path.join("sub");
        fs::create_dir(&subdir_path)?;
        let file_path = subdir_path.join("file.txt");
        fs::write(&file_path, "Test file")?;

        // a link back to the root would loop forever if followed
        std::os::unix::fs::symlink(temp_path, subdir_path.join("loop"))?;
        let linked_file = temp_path.join("linked.txt");
        std::os::unix::fs::symlink(&file_path, &linked_file)?;

        let result = walk_dir(temp_path, false)?;
        assert_eq!(
            result.into_iter().collect::<Vec<_>>(),
            vec![linked_file, file_path]
        );
        Ok(())
    }

    #[test]
    fn test_list_files_with_pattern() {
        let temp_dir = match tempdir() {
            Ok(x) => x,
            Err(_) => panic!("Failed to create temporary directory"),
        };
        let temp_path = temp_dir.path();

        for name in ["a.bin", "b.txt", "nested/c.bin"] {
            let path = temp_path.join(name);
            if let Some(parent) = path.parent() {
                match fs::create_dir_all(parent) {
                    Ok(x) => x,
                    Err(_) => panic!("Failed to create {}", parent.display()),
                };
            }
            match fs::write(&path, name) {
                Ok(x) => x,
                Err(_) => panic!("Failed to write {}", name),
            };
        }

        match list_files(temp_path, None, false) {
            Ok(files) => assert_eq!(
                files,
                vec![
                    PathBuf::from("a.bin"),
                    PathBuf::from("b.txt"),
                    PathBuf::from("nested/c.bin"),
                ]
            ),
            Err(e) => panic!("Error occurred: {:?}", e),
        }

        match list_files(temp_path, Some("**/*.bin"), false) {
            Ok(files) => assert_eq!(
                files,
                vec![PathBuf::from("a.bin"), PathBuf::from("nested/c.bin")]
            ),
            Err(e) => panic!("Error occurred: {:?}", e),
        }
    }

    #[test]
    fn test_list_files_bad_pattern() {
        match list_files(Path::new("."), Some("[unclosed"), false) {
            Err(FsError::InvalidPattern(p, _)) => assert_eq!(p, "[unclosed"),
            other => panic!("expected pattern error, got {:?}", other),
        }
    }
}
