use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::path_loader;

type Loader = dyn Fn(&str) -> Result<Option<String>, minijinja::Error> + Send + Sync;

/// Answers whether a template file exists under a directory.
///
/// Names go through the engine's own `path_loader`, so a name resolves here
/// exactly when the engine could load it. A leading `/` or `~/` is ignored.
#[derive(Clone)]
pub struct PhysicalFileProvider {
    root: PathBuf,
    loader: Arc<Loader>,
}

impl fmt::Debug for PhysicalFileProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalFileProvider")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl PhysicalFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let loader = Arc::new(path_loader(root.clone()));
        Self { root, loader }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True for files the engine can load, and for files it found but
    /// could not read (those fail later with the path attached).
    pub fn exists(&self, subpath: &str) -> bool {
        let subpath = trim_root(subpath);
        if subpath.is_empty() {
            return false;
        }

        match (self.loader)(subpath) {
            Ok(found) => found.is_some(),
            // the loader only errors after accepting the name
            Err(_) => self.root.join(subpath).is_file(),
        }
    }
}

/// Strip the app-relative prefixes (`~/`, `/`) from a view path
pub(crate) fn trim_root(subpath: &str) -> &str {
    let subpath = subpath.strip_prefix('~').unwrap_or(subpath);
    subpath.trim_start_matches('/')
}
