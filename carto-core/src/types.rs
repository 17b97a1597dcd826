use serde::{Deserialize, Serialize};

/// One row of the categorized layer table: a path prefix, its depth, a
/// pointer to its parent prefix, and the number of URLs falling under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub path: String,
    pub depth: usize,
    pub parent_path: Option<String>,
    pub leaf_count: u64,
}

/// Role of a rendered vertex, used by the renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The depth-0 node aggregating the whole URL list.
    Root,
    /// A path-prefix node.
    Section,
    /// Synthetic node standing in for children collapsed by the branch limit.
    Overflow,
}

/// A rendered vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub leaf_count: u64,
    pub kind: NodeKind,
}

/// A parent-to-child connection. The weight is the child's subtree URL count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub weight: u64,
}

/// Append a segment to a slash-prefixed path.
pub(crate) fn join_segment(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}
