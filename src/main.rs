use std::io;
use std::path::PathBuf;

use env_logger::Builder;
use log::{debug, LevelFilter};
use structopt::StructOpt;

use crate::commands::Command;
use crate::exceptions::FsError;
use crate::local::LocalFileSystem;
use crate::resolve::ResolvePolicy;

mod commands;
mod config;
mod exceptions;
mod fs;
mod io_utils;
mod local;
mod mode;
mod resolve;

#[derive(Debug, StructOpt)]
#[structopt(name = "basefs", about = "File operations rooted at a base directory")]
struct Opt {
    #[structopt(
        short = "r",
        long = "root",
        help = "Base directory every path is resolved against",
        value_name = "DIR",
        default_value = "."
    )]
    root: PathBuf,

    #[structopt(
        long = "policy",
        help = "How paths are mapped onto the root: 'join' or 'confined'",
        default_value = "confined"
    )]
    policy: ResolvePolicy,

    #[structopt(short = "v", long = "verbose", help = "Print debug information")]
    verbose: bool,

    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), FsError> {
    let opt = Opt::from_args();
    let config = config::Config {
        root: opt.root,
        policy: opt.policy,
        verbose: opt.verbose,
    };
    if config.verbose {
        Builder::new().filter(None, LevelFilter::Debug).init();
    } else {
        Builder::new().filter(None, LevelFilter::Info).init();
    }

    let lfs = match config.policy {
        ResolvePolicy::Confined => LocalFileSystem::new(&config.root),
        policy => LocalFileSystem::with_policy(&config.root, policy),
    };
    debug!(
        "root: {}, policy: {}",
        lfs.base_path().display(),
        lfs.policy().as_str()
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = commands::run(&opt.command, &lfs, lfs.base_path(), &mut out) {
        eprintln!("Error Encountered:\n{}\n\nExiting.", e);
        std::process::exit(1);
    }

    Ok(())
}
