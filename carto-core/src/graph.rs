// Graph construction: turn the layer table into a bounded, renderable tree.

use crate::error::{MapError, Result};
use crate::types::{CategoryRow, GraphEdge, GraphNode, NodeKind, join_segment};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info};

/// Knobs for one graph build.
pub struct GraphOptions {
    /// Deepest layer to render. Capped to the deepest row present.
    pub depth_limit: usize,
    /// Maximum children per node; the rest collapse into an overflow node.
    /// `None` renders every child.
    pub child_limit: Option<usize>,
    /// Graph title, passed through to the renderer.
    pub title: String,
    /// Opaque size hint for the layout engine.
    pub size_hint: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            depth_limit: 3,
            child_limit: None,
            title: String::new(),
            size_hint: "8,5".to_string(),
        }
    }
}

/// The assembled graph description handed to the renderers.
#[derive(Debug)]
pub struct SiteGraph {
    pub title: String,
    pub size_hint: String,
    pub graph: DiGraph<GraphNode, GraphEdge>,
    pub root: NodeIndex,
}

/// Build the renderable tree from a categorized layer table.
///
/// Parentage is re-derived from the `parent_path` column; a row pointing at
/// a parent that is not in the table aborts the build. When a node has more
/// children than `child_limit`, the heaviest ones are kept (ties broken by
/// path) and the remainder become a single overflow node whose edge carries
/// their summed count, so total weight under each node is preserved.
pub fn build_graph(rows: &[CategoryRow], options: &GraphOptions) -> Result<SiteGraph> {
    if options.child_limit == Some(0) {
        return Err(MapError::Configuration(
            "child limit must be at least 1".to_string(),
        ));
    }

    let by_path: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.path.as_str(), i))
        .collect();

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        if let Some(ref parent) = row.parent_path {
            if !by_path.contains_key(parent.as_str()) {
                return Err(MapError::InconsistentTree {
                    path: row.path.clone(),
                    parent: parent.clone(),
                });
            }
            children.entry(parent.as_str()).or_default().push(i);
        }
    }

    let Some(root_idx) = rows.iter().position(|row| row.parent_path.is_none()) else {
        return Err(MapError::MalformedInput {
            line: 1,
            input: rows.first().map(|row| row.path.clone()).unwrap_or_default(),
            reason: "layer table has no root row".to_string(),
        });
    };

    let max_depth = rows.iter().map(|row| row.depth).max().unwrap_or(0);
    let depth_limit = if options.depth_limit > max_depth {
        info!(
            "Only {} layers available to plot, capping depth at {}",
            max_depth, max_depth
        );
        max_depth
    } else {
        options.depth_limit
    };

    let mut graph = DiGraph::new();
    let root_row = &rows[root_idx];
    let root_title = if options.title.is_empty() {
        root_row.path.as_str()
    } else {
        options.title.as_str()
    };
    let root = graph.add_node(GraphNode {
        id: root_row.path.clone(),
        label: format!("{} ({})", root_title, format_count(root_row.leaf_count)),
        leaf_count: root_row.leaf_count,
        kind: NodeKind::Root,
    });

    let mut queue: VecDeque<(usize, NodeIndex)> = VecDeque::new();
    queue.push_back((root_idx, root));

    while let Some((row_idx, node)) = queue.pop_front() {
        let row = &rows[row_idx];
        if row.depth >= depth_limit {
            continue;
        }

        let Some(kids) = children.get(row.path.as_str()) else {
            continue;
        };

        // Heaviest branches first; path order breaks ties so re-runs agree.
        let mut kids = kids.clone();
        kids.sort_by(|&a, &b| {
            rows[b]
                .leaf_count
                .cmp(&rows[a].leaf_count)
                .then_with(|| rows[a].path.cmp(&rows[b].path))
        });

        let (kept, collapsed) = match options.child_limit {
            Some(limit) if kids.len() > limit => kids.split_at(limit),
            _ => (kids.as_slice(), &[][..]),
        };

        for &child_idx in kept {
            let child = &rows[child_idx];
            let segment = child.path.rsplit('/').next().unwrap_or(child.path.as_str());
            let label = if child.depth == depth_limit && child.leaf_count > 1 {
                // Terminal layer: mark that deeper URLs were folded in here.
                format!("{} ({})", segment, format_count(child.leaf_count))
            } else {
                segment.to_string()
            };

            let child_node = graph.add_node(GraphNode {
                id: child.path.clone(),
                label,
                leaf_count: child.leaf_count,
                kind: NodeKind::Section,
            });
            graph.add_edge(node, child_node, GraphEdge {
                weight: child.leaf_count,
            });
            queue.push_back((child_idx, child_node));
        }

        if !collapsed.is_empty() {
            let total: u64 = collapsed.iter().map(|&i| rows[i].leaf_count).sum();
            debug!(
                "Collapsing {} children of {} into an overflow node",
                collapsed.len(),
                row.path
            );
            let overflow = graph.add_node(GraphNode {
                id: join_segment(&row.path, "+overflow"),
                label: format!("+{} more ({})", collapsed.len(), format_count(total)),
                leaf_count: total,
                kind: NodeKind::Overflow,
            });
            graph.add_edge(node, overflow, GraphEdge { weight: total });
        }
    }

    info!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(SiteGraph {
        title: options.title.clone(),
        size_hint: options.size_hint.clone(),
        graph,
        root,
    })
}

/// Format a count with thousands separators, e.g. 12345 -> "12,345".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
