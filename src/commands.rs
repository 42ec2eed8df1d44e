use std::io::{SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::info;
use structopt::StructOpt;

use crate::exceptions::Result;
use crate::fs::{copy, FileHandle, FileSystem};
use crate::fs_printf;
use crate::io_utils;

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(about = "Print the contents of a file")]
    Cat { path: PathBuf },

    #[structopt(about = "Write text to a file, truncating it first")]
    Put { path: PathBuf, text: String },

    #[structopt(about = "Append text to a file")]
    Append { path: PathBuf, text: String },

    #[structopt(about = "Append a single byte to a file")]
    Putc { path: PathBuf, byte: u8 },

    #[structopt(about = "Append a `name=value` line to a file")]
    Printf {
        path: PathBuf,
        name: String,
        value: i64,
    },

    #[structopt(about = "Remove a file")]
    Rm { path: PathBuf },

    #[structopt(about = "Rename a file")]
    Mv { old_path: PathBuf, new_path: PathBuf },

    #[structopt(about = "Copy a file")]
    Cp { from: PathBuf, to: PathBuf },

    #[structopt(about = "Print whether a file exists")]
    Exists { path: PathBuf },

    #[structopt(about = "Print the size of a file in bytes")]
    Size { path: PathBuf },

    #[structopt(about = "List files under the root")]
    Ls {
        #[structopt(
            short = "g",
            long = "glob",
            help = "Only list files matching the pattern, relative to the root. eg '**/*.bin'",
            value_name = "PATTERN"
        )]
        pattern: Option<String>,

        #[structopt(long = "include-hidden", help = "Include hidden files and directories")]
        include_hidden: bool,
    },
}

fn append_with<F>(fs: &dyn FileSystem, path: &Path, f: F) -> Result<usize>
where
    F: FnOnce(&mut dyn FileHandle) -> Result<usize>,
{
    let mut handle = fs.open(path, "ab")?;
    let n = f(handle.as_mut())?;
    handle.close()?;
    Ok(n)
}

/// Runs `command` against `fs`, writing anything it prints to `out`.
pub fn run(command: &Command, fs: &dyn FileSystem, root: &Path, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Cat { path } => {
            let mut handle = fs.open(path, "rb")?;
            let mut buf = [0u8; 8192];
            loop {
                let n = handle.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                out.write_all(&buf[..n])?;
            }
            handle.close()?;
        }
        Command::Put { path, text } => {
            let mut handle = fs.open(path, "wb")?;
            let n = handle.puts(text)?;
            handle.close()?;
            info!("wrote {} bytes to {}", n, path.display());
        }
        Command::Append { path, text } => {
            let n = append_with(fs, path, |h| h.puts(text))?;
            info!("appended {} bytes to {}", n, path.display());
        }
        Command::Putc { path, byte } => {
            append_with(fs, path, |h| h.putc(*byte))?;
        }
        Command::Printf { path, name, value } => {
            append_with(fs, path, |h| fs_printf!(h, "{}={}\n", name, value))?;
        }
        Command::Rm { path } => fs.remove(path)?,
        Command::Mv { old_path, new_path } => fs.rename(old_path, new_path)?,
        Command::Cp { from, to } => {
            let n = copy(fs, from, to)?;
            info!("copied {} bytes", n);
        }
        Command::Exists { path } => writeln!(out, "{}", fs.exists(path))?,
        Command::Size { path } => {
            let mut handle = fs.open(path, "rb")?;
            handle.seek(SeekFrom::End(0))?;
            let size = handle.tell()?;
            handle.close()?;
            writeln!(out, "{}", size)?;
        }
        Command::Ls {
            pattern,
            include_hidden,
        } => {
            for file in io_utils::list_files(root, pattern.as_deref(), *include_hidden)? {
                writeln!(out, "{}", file.display())?;
            }
        }
    }
    Ok(())
}
