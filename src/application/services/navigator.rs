//! Navigation service
//!
//! Resolves a search root on the filesystem, wires the children producer from
//! settings, and runs the single-stage and cascading searches over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::entry::{FsChildrenProducer, FsEntry};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    build_tree, collect_and_prune, direct_children_matching, extract_nodes, extract_nodes_par,
    first_match, DomainResult, NodeData, SearchCriteria, TreeArena,
};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::{expand_env_vars, relative_to};

/// Filesystem navigation service.
pub struct NavigatorService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl NavigatorService {
    /// Create a new navigator service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Children producer configured from the search settings.
    pub fn producer(&self) -> FsChildrenProducer {
        FsChildrenProducer::new(Arc::clone(&self.fs))
            .include_hidden(self.settings.search.include_hidden)
            .follow_symlinks(self.settings.search.follow_symlinks)
    }

    /// Expand `~`/`$VAR`, canonicalize and inspect the search root.
    pub fn resolve_root(&self, root: &Path) -> ApplicationResult<FsEntry> {
        let expanded = PathBuf::from(expand_env_vars(&root.to_string_lossy()));
        if !self.fs.exists(&expanded) {
            return Err(ApplicationError::InvalidRoot(expanded));
        }
        let canonical = self
            .fs
            .canonicalize(&expanded)
            .with_path_context("resolve root", &expanded)?;
        debug!("resolve_root: {}", canonical.display());
        FsEntry::from_path(self.fs.as_ref(), &canonical).with_path_context("inspect root", &canonical)
    }

    /// Build the full tree below `root`.
    #[instrument(level = "debug", skip(self), fields(root = %root))]
    pub fn tree(&self, root: &FsEntry) -> ApplicationResult<TreeArena<FsEntry>> {
        Ok(build_tree(root.clone(), &self.producer())?)
    }

    /// Cascading search: each stage narrows to matches below the previous stage's matches.
    #[instrument(level = "debug", skip(self, criteria), fields(root = %root))]
    pub fn extract(
        &self,
        root: &FsEntry,
        criteria: Vec<SearchCriteria<FsEntry>>,
    ) -> ApplicationResult<Vec<FsEntry>> {
        let producer = self.producer();
        let found = if self.settings.search.parallel {
            extract_nodes_par(root.clone(), &producer, criteria)?
        } else {
            extract_nodes(root.clone(), &producer, criteria)?
        };
        debug!("extract: {} results", found.len());
        Ok(found)
    }

    /// Shallowest matches on every branch below `root`.
    #[instrument(level = "debug", skip(self, criteria), fields(root = %root))]
    pub fn matches(
        &self,
        root: &FsEntry,
        criteria: &SearchCriteria<FsEntry>,
    ) -> ApplicationResult<Vec<FsEntry>> {
        let tree = self.tree(root)?;
        Ok(collect_and_prune(&tree, criteria)?)
    }

    /// First match below `root` in depth-first order.
    #[instrument(level = "debug", skip(self, criteria), fields(root = %root))]
    pub fn first(
        &self,
        root: &FsEntry,
        criteria: &SearchCriteria<FsEntry>,
    ) -> ApplicationResult<Option<FsEntry>> {
        let tree = self.tree(root)?;
        Ok(first_match(&tree, criteria)?)
    }

    /// Immediate children of `root` that satisfy `criteria`.
    ///
    /// Only the first level is materialized.
    #[instrument(level = "debug", skip(self, criteria), fields(root = %root))]
    pub fn children(
        &self,
        root: &FsEntry,
        criteria: &SearchCriteria<FsEntry>,
    ) -> ApplicationResult<Vec<FsEntry>> {
        let inner = self.producer();
        let root_path = root.path.clone();
        let first_level = move |node: &NodeData<FsEntry>| -> DomainResult<Vec<FsEntry>> {
            let entry = node.require("node.element")?;
            if entry.path == root_path {
                inner.direct_children(entry)
            } else {
                Ok(Vec::new())
            }
        };
        let tree = build_tree(root.clone(), &first_level)?;
        Ok(direct_children_matching(&tree, criteria))
    }

    /// Path to show for `entry`, honoring `display.relative_paths`.
    pub fn display_path(&self, root: &FsEntry, entry: &FsEntry) -> String {
        if self.settings.display.relative_paths {
            relative_to(&entry.path, &root.path).display().to_string()
        } else {
            entry.path.display().to_string()
        }
    }
}
