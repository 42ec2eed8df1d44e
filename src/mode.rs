use std::fs::OpenOptions;
use std::str::FromStr;

use crate::exceptions::FsError;

/// Parsed form of a C-style textual open mode (`"r"`, `"wb"`, `"a+"`, ...).
///
/// The binary/text distinction is kept for callers that want to inspect it but
/// never changes how bytes are read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
    pub exclusive: bool,
    /// Informational only; logged on open.
    pub binary: bool,
}

impl OpenMode {
    pub fn parse(mode: &str) -> Result<OpenMode, FsError> {
        let invalid = || FsError::InvalidMode(mode.to_string());
        let mut chars = mode.chars();
        let mut open_mode = match chars.next() {
            Some('r') => OpenMode::base(true, false, false),
            Some('w') => OpenMode::base(false, true, false),
            Some('a') => OpenMode::base(false, true, true),
            _ => return Err(invalid()),
        };

        let mut plus = false;
        let mut kind = None;
        for c in chars {
            match c {
                '+' if !plus => plus = true,
                'b' | 't' if kind.is_none() => kind = Some(c),
                'x' if !open_mode.exclusive && open_mode.truncate => open_mode.exclusive = true,
                _ => return Err(invalid()),
            }
        }

        if plus {
            open_mode.read = true;
            open_mode.write = true;
        }
        open_mode.binary = kind == Some('b');
        Ok(open_mode)
    }

    fn base(read: bool, write: bool, append: bool) -> OpenMode {
        OpenMode {
            read,
            write,
            append,
            // "w" truncates and creates, "a" only creates, "r" does neither
            truncate: write && !append,
            create: write,
            exclusive: false,
            binary: false,
        }
    }

    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.read);
        if self.append {
            options.append(true);
        } else {
            options.write(self.write);
        }
        if self.exclusive {
            options.create_new(true);
        } else {
            options.create(self.create).truncate(self.truncate);
        }
        options
    }
}

impl FromStr for OpenMode {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpenMode::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_modes() {
        let r = OpenMode::parse("r").unwrap();
        assert!(r.read && !r.write && !r.create && !r.truncate);

        let w = OpenMode::parse("w").unwrap();
        assert!(!w.read && w.write && w.create && w.truncate && !w.append);

        let a = OpenMode::parse("a").unwrap();
        assert!(!a.read && a.write && a.create && !a.truncate && a.append);
    }

    #[test]
    fn test_parse_update_and_binary() {
        let rp = OpenMode::parse("r+b").unwrap();
        assert!(rp.read && rp.write && !rp.create && rp.binary);

        let wp = OpenMode::parse("wb+").unwrap();
        assert!(wp.read && wp.write && wp.truncate && wp.binary);

        let ap = OpenMode::parse("a+t").unwrap();
        assert!(ap.read && ap.append && !ap.binary);

        let wx = OpenMode::parse("wbx").unwrap();
        assert!(wx.exclusive);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for mode in ["", "q", "rw", "r++", "rbt", "rx", "ax", "wxx", "b"] {
            match OpenMode::parse(mode) {
                Err(FsError::InvalidMode(m)) => assert_eq!(m, mode),
                other => panic!("mode {:?} should be rejected, got {:?}", mode, other),
            }
        }
    }

    #[test]
    fn test_from_str() {
        let mode: OpenMode = "ab".parse().unwrap();
        assert!(mode.append && mode.binary);
    }
}
