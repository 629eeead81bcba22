//! Filesystem entries as navigable tree elements.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{instrument, trace};

use crate::application::error_ext::IoResultExt;
use crate::domain::{ChildrenProducer, DomainResult, NodeData};
use crate::infrastructure::traits::FileSystem;

/// Kind of a directory entry, as seen without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
            EntryKind::Symlink => "symlink",
            EntryKind::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file, directory or link of the navigated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    /// Final path component (the full path for `/`)
    pub name: String,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn from_path(fs: &dyn FileSystem, path: &Path) -> io::Result<Self> {
        let kind = if fs.is_symlink(path) {
            EntryKind::Symlink
        } else if fs.is_dir(path) {
            EntryKind::Dir
        } else if fs.is_file(path) {
            EntryKind::File
        } else if fs.exists(path) {
            EntryKind::Other
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {}", path.display()),
            ));
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            kind,
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}

impl fmt::Display for FsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Children producer over a directory tree.
///
/// Directories yield their entries sorted by name; files and other entries
/// have no children. Symlinked directories are entered only with
/// `follow_symlinks`, and a link pointing back at an ancestor then makes the
/// build loop forever.
#[derive(Clone)]
pub struct FsChildrenProducer {
    fs: Arc<dyn FileSystem>,
    pub include_hidden: bool,
    pub follow_symlinks: bool,
}

impl FsChildrenProducer {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            include_hidden: false,
            follow_symlinks: false,
        }
    }

    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }

    fn is_container(&self, entry: &FsEntry) -> bool {
        match entry.kind {
            EntryKind::Dir => true,
            EntryKind::Symlink => self.follow_symlinks && self.fs.is_dir(&entry.path),
            EntryKind::File | EntryKind::Other => false,
        }
    }

    /// Sorted entries of `entry`, empty for anything that is not a directory.
    #[instrument(level = "trace", skip(self), fields(path = %entry.path.display()))]
    pub fn direct_children(&self, entry: &FsEntry) -> DomainResult<Vec<FsEntry>> {
        if !self.is_container(entry) {
            return Ok(Vec::new());
        }

        let paths = self
            .fs
            .read_dir(&entry.path)
            .producer_context("read directory", &entry.path)?;

        let mut children = Vec::with_capacity(paths.len());
        for path in paths {
            let child = FsEntry::from_path(self.fs.as_ref(), &path)
                .producer_context("inspect entry", &path)?;
            if !self.include_hidden && child.is_hidden() {
                trace!(name = %child.name, "skipping hidden entry");
                continue;
            }
            children.push(child);
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

impl ChildrenProducer<FsEntry> for FsChildrenProducer {
    fn children(&self, node: &NodeData<FsEntry>) -> DomainResult<Vec<FsEntry>> {
        let entry = node.require("node.element")?;
        self.direct_children(entry)
    }
}
