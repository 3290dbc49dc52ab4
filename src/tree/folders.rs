//! Folder tree from flat paths
//!
//! Query and datasource folders arrive as flat `/`-delimited identifiers.
//! They are built into a trie in a single pass over the input, then
//! materialized top-down into tree nodes. A prefix that is both a leaf and a
//! container in the flat input is rendered as a folder with children.

use crate::models::TreeNode;

/// Prefix trie over path segments, preserving first-observed child order.
#[derive(Debug, Default)]
pub struct FolderTrie {
    children: Vec<(String, FolderTrie)>,
}

impl FolderTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the trie from flat identifiers in one pass.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for path in paths {
            trie.insert(path.as_ref());
        }
        trie
    }

    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let position = node.children.iter().position(|(name, _)| name == segment);
            let index = match position {
                Some(i) => i,
                None => {
                    node.children.push((segment.to_string(), FolderTrie::new()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index].1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Materialize a folder tree from flat paths.
///
/// Inner nodes become folder branches carrying `folder_icon` (indicating the
/// underlying data-source type); terminal segments become leaves whose
/// payload is produced by `leaf_payload` from the full path. When a prefix
/// has deeper paths beneath it, the folder rendering wins.
pub fn folder_tree<I, S, F>(paths: I, folder_icon: &str, leaf_payload: F) -> TreeNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> serde_json::Value,
{
    let trie = FolderTrie::from_paths(paths);
    let children = materialize(&trie, "", folder_icon, &leaf_payload);
    TreeNode::branch("/").with_children(children).expanded()
}

fn materialize<F>(
    node: &FolderTrie,
    prefix: &str,
    folder_icon: &str,
    leaf_payload: &F,
) -> Vec<TreeNode>
where
    F: Fn(&str) -> serde_json::Value,
{
    node.children
        .iter()
        .map(|(segment, child)| {
            let full_path = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{}/{}", prefix, segment)
            };
            if child.is_empty() {
                TreeNode::leaf(segment).with_payload(leaf_payload(&full_path))
            } else {
                TreeNode::branch(segment)
                    .with_icon(folder_icon)
                    .with_children(materialize(child, &full_path, folder_icon, leaf_payload))
            }
        })
        .collect()
}
