use std::env;
use std::io;
use std::path::{Path, PathBuf};

pub trait PathResolver {
    /// Resolves a possibly relative executable path to an absolute one.
    fn resolve(&self, path: &Path) -> PathBuf;
}

/// Resolves relative paths against a fixed working directory.
#[derive(Debug, Clone)]
pub struct WorkingDirectoryResolver {
    base: PathBuf,
}

impl WorkingDirectoryResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl PathResolver for WorkingDirectoryResolver {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}
