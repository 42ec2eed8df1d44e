use std::path::PathBuf;

use crate::resolve::ResolvePolicy;

pub struct Config {
    pub root: PathBuf,
    pub policy: ResolvePolicy,
    pub verbose: bool,
}
