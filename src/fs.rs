use std::fmt;
use std::io::SeekFrom;
use std::path::Path;

use crate::exceptions::Result;

/// A filesystem rooted somewhere, handing out exclusively-owned handles.
///
/// Every path argument is interpreted relative to the implementation's base
/// path. Implementations hold no per-handle state, so a `&dyn FileSystem` can
/// be shared freely while each handle stays with whoever opened it.
pub trait FileSystem: Send + Sync {
    /// Opens `path` with a C-style mode string (`"r"`, `"wb"`, `"a+"`, ...).
    fn open(&self, path: &Path, mode: &str) -> Result<Box<dyn FileHandle>>;

    fn remove(&self, path: &Path) -> Result<()>;

    fn rename(&self, old_path: &Path, new_path: &Path) -> Result<()>;

    /// Never fails; anything that prevents a positive answer yields `false`.
    fn exists(&self, path: &Path) -> bool;
}

/// One open file stream. Released by [`FileHandle::close`] or on drop.
pub trait FileHandle: Send {
    /// Returns the number of bytes read, `0` at end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Returns the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    fn tell(&mut self) -> Result<u64>;

    fn flush(&mut self) -> Result<()>;

    fn close(self: Box<Self>) -> Result<()>;

    fn putc(&mut self, byte: u8) -> Result<usize> {
        self.write(&[byte])
    }

    fn puts(&mut self, s: &str) -> Result<usize> {
        self.write(s.as_bytes())
    }

    fn printf(&mut self, args: fmt::Arguments) -> Result<usize> {
        match args.as_str() {
            Some(s) => self.puts(s),
            None => self.puts(&args.to_string()),
        }
    }
}

/// `fs_printf!(handle, "{}={}\n", key, value)` writes formatted text to a handle.
#[macro_export]
macro_rules! fs_printf {
    ($handle:expr, $($arg:tt)*) => {
        $handle.printf(format_args!($($arg)*))
    };
}

/// Copies `from` to `to` (truncating) using only the handle operations.
pub fn copy(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<u64> {
    let mut src = fs.open(from, "rb")?;
    let mut dst = fs.open(to, "wb")?;
    let mut buf = [0u8; 8192];
    let mut total = 0u64;
    loop {
        let n = src.read(&mut buf)?;
        if n == 0 {
            break;
        }
        let mut written = 0;
        while written < n {
            written += dst.write(&buf[written..n])?;
        }
        total += n as u64;
    }
    src.close()?;
    dst.close()?;
    Ok(total)
}
