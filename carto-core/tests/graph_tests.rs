// Tests for graph construction and rendering

use carto_core::error::MapError;
use carto_core::render::{Style, render_dot, render_json};
use carto_core::types::{CategoryRow, NodeKind};
use carto_core::{GraphOptions, build_graph, categorize};

fn urls(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn options(depth_limit: usize, child_limit: Option<usize>) -> GraphOptions {
    GraphOptions {
        depth_limit,
        child_limit,
        ..GraphOptions::default()
    }
}

// ============================================================================
// Graph Shape Tests
// ============================================================================

#[test]
fn test_graph_mirrors_small_tree() {
    let rows = categorize(&urls(&["a.com/x", "a.com/x/y", "a.com/z"]), 2).unwrap();
    let site = build_graph(&rows, &options(2, None)).unwrap();

    assert_eq!(site.graph.node_count(), 4);
    assert_eq!(site.graph.edge_count(), 3);
    assert_eq!(site.graph[site.root].kind, NodeKind::Root);
    assert_eq!(site.graph[site.root].label, "/ (3)");
}

#[test]
fn test_empty_url_list_renders_single_node() {
    let rows = categorize(&[], 3).unwrap();
    let site = build_graph(&rows, &options(3, None)).unwrap();

    assert_eq!(site.graph.node_count(), 1);
    assert_eq!(site.graph.edge_count(), 0);
}

#[test]
fn test_depth_limit_bounds_rendered_nodes() {
    let rows = categorize(&urls(&["a.com/x", "a.com/x/y", "a.com/z"]), 2).unwrap();
    let site = build_graph(&rows, &options(1, None)).unwrap();

    let ids: Vec<&str> = site
        .graph
        .node_indices()
        .map(|i| site.graph[i].id.as_str())
        .collect();
    assert_eq!(ids, vec!["/", "/x", "/z"]);

    // The terminal layer marks how many URLs it folded in.
    let x = site
        .graph
        .node_indices()
        .map(|i| &site.graph[i])
        .find(|n| n.id == "/x")
        .unwrap();
    assert_eq!(x.label, "x (2)");
}

#[test]
fn test_depth_limit_beyond_table_is_capped() {
    let rows = categorize(&urls(&["a.com/x", "a.com/z"]), 1).unwrap();
    let site = build_graph(&rows, &options(10, None)).unwrap();

    assert_eq!(site.graph.node_count(), 3);
}

#[test]
fn test_unset_child_limit_renders_everything() {
    let raw: Vec<String> = (0..20).map(|i| format!("a.com/p{i:02}")).collect();
    let rows = categorize(&raw, 1).unwrap();
    let site = build_graph(&rows, &options(1, None)).unwrap();

    assert_eq!(site.graph.node_count(), 21);
}

// ============================================================================
// Child Limit / Overflow Tests
// ============================================================================

#[test]
fn test_child_limit_keeps_heaviest_and_collapses_rest() {
    let rows = categorize(&urls(&["a.com/x", "a.com/x/y", "a.com/z"]), 2).unwrap();
    let site = build_graph(&rows, &options(2, Some(1))).unwrap();

    let nodes: Vec<&carto_core::GraphNode> =
        site.graph.node_indices().map(|i| &site.graph[i]).collect();

    // /x (count 2) beats /z (count 1); /z collapses into the overflow node.
    assert!(nodes.iter().any(|n| n.id == "/x"));
    assert!(!nodes.iter().any(|n| n.id == "/z"));

    let overflow = nodes.iter().find(|n| n.kind == NodeKind::Overflow).unwrap();
    assert_eq!(overflow.id, "/+overflow");
    assert_eq!(overflow.label, "+1 more (1)");
    assert_eq!(overflow.leaf_count, 1);
}

#[test]
fn test_overflow_preserves_total_child_weight() {
    let raw = urls(&[
        "a.com/a/1",
        "a.com/a/2",
        "a.com/a/3",
        "a.com/b/1",
        "a.com/b/2",
        "a.com/c/1",
    ]);
    let rows = categorize(&raw, 1).unwrap();
    let site = build_graph(&rows, &options(1, Some(1))).unwrap();

    let outgoing: u64 = site
        .graph
        .edges(site.root)
        .map(|e| e.weight().weight)
        .sum();
    assert_eq!(outgoing, site.graph[site.root].leaf_count);
}

#[test]
fn test_child_bound_holds_after_collapsing() {
    let raw: Vec<String> = (0..12).map(|i| format!("a.com/p{i:02}")).collect();
    let rows = categorize(&raw, 1).unwrap();
    let limit = 5;
    let site = build_graph(&rows, &options(1, Some(limit))).unwrap();

    let root_children = site.graph.edges(site.root).count();
    assert!(root_children <= limit + 1);
    assert_eq!(root_children, limit + 1);
}

#[test]
fn test_child_limit_ties_break_by_path() {
    // Equal counts: /a and /b tie; with limit 1 the lexicographically
    // smaller path survives.
    let rows = categorize(&urls(&["a.com/b", "a.com/a"]), 1).unwrap();
    let site = build_graph(&rows, &options(1, Some(1))).unwrap();

    let nodes: Vec<&carto_core::GraphNode> =
        site.graph.node_indices().map(|i| &site.graph[i]).collect();
    assert!(nodes.iter().any(|n| n.id == "/a"));
    assert!(!nodes.iter().any(|n| n.id == "/b"));
}

#[test]
fn test_zero_child_limit_is_rejected() {
    let rows = categorize(&urls(&["a.com/x"]), 1).unwrap();
    let err = build_graph(&rows, &options(1, Some(0))).unwrap_err();

    assert!(matches!(err, MapError::Configuration(_)));
}

// ============================================================================
// Failure Semantics Tests
// ============================================================================

#[test]
fn test_dangling_parent_aborts_build() {
    let rows = vec![
        CategoryRow {
            path: "/".to_string(),
            depth: 0,
            parent_path: None,
            leaf_count: 1,
        },
        CategoryRow {
            path: "/orphan/child".to_string(),
            depth: 2,
            parent_path: Some("/orphan".to_string()),
            leaf_count: 1,
        },
    ];

    let err = build_graph(&rows, &options(2, None)).unwrap_err();
    match err {
        MapError::InconsistentTree { path, parent } => {
            assert_eq!(path, "/orphan/child");
            assert_eq!(parent, "/orphan");
        }
        other => panic!("expected InconsistentTree, got {other:?}"),
    }
}

#[test]
fn test_rootless_table_aborts_build() {
    let rows = vec![CategoryRow {
        path: "/x".to_string(),
        depth: 1,
        parent_path: Some("/".to_string()),
        leaf_count: 1,
    }];

    let err = build_graph(&rows, &options(1, None)).unwrap_err();
    assert!(matches!(err, MapError::InconsistentTree { .. }));
}

// ============================================================================
// Renderer Tests
// ============================================================================

#[test]
fn test_render_dot_structure() {
    let rows = categorize(&urls(&["a.com/x", "a.com/x/y", "a.com/z"]), 2).unwrap();
    let site = build_graph(&rows, &options(2, None)).unwrap();
    let dot = render_dot(&site, Style::Light);

    assert!(dot.starts_with("digraph sitemap {"));
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("size=\"8,5\""));
    assert!(dot.contains("\"/x\""));
    assert!(dot.contains("\"/\" -> \"/x\" [label=\"2\""));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_render_dot_styles() {
    let rows = categorize(&urls(&["a.com/x"]), 1).unwrap();
    let site = build_graph(&rows, &options(1, None)).unwrap();

    let light = render_dot(&site, Style::Light);
    assert!(light.contains("#dbdddd"));
    assert!(!light.contains("bgcolor"));

    let dark = render_dot(&site, Style::Dark);
    assert!(dark.contains("bgcolor=\"#3a3a3a\""));
    assert!(dark.contains("fontcolor=white"));
}

#[test]
fn test_render_dot_is_deterministic() {
    let raw = urls(&["a.com/x/1", "a.com/y/2", "a.com/x/3", "a.com/z"]);
    let rows = categorize(&raw, 2).unwrap();

    let first = render_dot(&build_graph(&rows, &options(2, Some(2))).unwrap(), Style::Dark);
    let second = render_dot(&build_graph(&rows, &options(2, Some(2))).unwrap(), Style::Dark);
    assert_eq!(first, second);
}

#[test]
fn test_render_json_description() {
    let rows = categorize(&urls(&["a.com/x", "a.com/z"]), 1).unwrap();
    let site = build_graph(&rows, &options(1, None)).unwrap();
    let json = render_json(&site).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let sitemap = &value["sitemap"];
    assert_eq!(sitemap["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(sitemap["edges"].as_array().unwrap().len(), 2);
    assert_eq!(sitemap["size"], "8,5");
    assert_eq!(sitemap["edges"][0]["source"], "/");
}

#[test]
fn test_graph_title_becomes_root_label() {
    let rows = categorize(&urls(&["a.com/x"]), 1).unwrap();
    let opts = GraphOptions {
        depth_limit: 1,
        child_limit: None,
        title: "example.com".to_string(),
        size_hint: "8,5".to_string(),
    };
    let site = build_graph(&rows, &opts).unwrap();

    assert_eq!(site.graph[site.root].label, "example.com (1)");
}
