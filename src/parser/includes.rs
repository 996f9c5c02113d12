//! `#include` resolution
//!
//! Included files are read through a [`SourceLoader`] and tracked by a single
//! [`IncludeContext`] that every nested parse borrows. Paths are resolved
//! against the entry file's directory, never the including file's.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads source text for a resolved path. Loaders are shared with the
/// worker thread a program runs on.
pub trait SourceLoader: Sync {
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the host file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// In-memory file table, keyed by resolved path
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

/// State shared by the entry parser and every included-file parser
pub struct IncludeContext<'a> {
    base_dir: PathBuf,
    visited: FxHashSet<PathBuf>,
    loader: &'a dyn SourceLoader,
}

impl<'a> IncludeContext<'a> {
    pub fn new(base_dir: impl Into<PathBuf>, loader: &'a dyn SourceLoader) -> Self {
        IncludeContext {
            base_dir: base_dir.into(),
            visited: FxHashSet::default(),
            loader,
        }
    }

    /// Context for an entry file: includes resolve next to it
    pub fn for_entry(entry: &Path, loader: &'a dyn SourceLoader) -> Self {
        let base_dir = match entry.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::new(base_dir, loader)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub fn load(&self, path: &Path) -> io::Result<String> {
        self.loader.load(path)
    }

    /// Record `path`; false if it was already included
    pub fn mark_visited(&mut self, path: &Path) -> bool {
        self.visited.insert(path.to_path_buf())
    }

    pub fn is_visited(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_directory_resolution() {
        let loader = MemoryLoader::new();

        let ctx = IncludeContext::for_entry(Path::new("progs/main.clike"), &loader);
        assert_eq!(ctx.resolve("util.clike"), PathBuf::from("progs/util.clike"));

        let ctx = IncludeContext::for_entry(Path::new("main.clike"), &loader);
        assert_eq!(ctx.base_dir(), Path::new("."));
    }

    #[test]
    fn test_visited_once() {
        let loader = MemoryLoader::new();
        let mut ctx = IncludeContext::new("lib", &loader);
        let path = ctx.resolve("a.clike");

        assert!(ctx.mark_visited(&path));
        assert!(!ctx.mark_visited(&path));
        assert!(ctx.is_visited(&path));
    }

    #[test]
    fn test_memory_loader_not_found() {
        let loader = MemoryLoader::new().with_file("lib/a.clike", "void f() {}");

        assert!(loader.load(Path::new("lib/a.clike")).is_ok());
        let err = loader.load(Path::new("lib/b.clike")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
