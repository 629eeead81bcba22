//! Rendering of built trees for terminal output.

use generational_arena::Index;
use termtree::Tree;

use crate::application::entry::{EntryKind, FsEntry};
use crate::domain::TreeArena;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(entry: Option<&FsEntry>) -> String {
    match entry {
        Some(e) if e.kind == EntryKind::Dir => format!("{}/", e.name),
        Some(e) if e.kind == EntryKind::Symlink => format!("{}@", e.name),
        Some(e) => e.name.clone(),
        None => "<nil>".to_string(),
    }
}

impl TreeDisplay for TreeArena<FsEntry> {
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree(arena: &TreeArena<FsEntry>, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(label(child.data.element()));
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let root_label = self
            .root_element()
            .map(|e| e.path.display().to_string())
            .unwrap_or_else(|| label(None));
        let mut tree = Tree::new(root_label);
        build_tree(self, root_idx, &mut tree);
        tree
    }
}
