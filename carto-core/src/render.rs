// Renderers: translate a SiteGraph into Graphviz DOT or a JSON description.

use crate::graph::{SiteGraph, format_count};
use crate::types::{GraphNode, NodeKind};
use petgraph::visit::EdgeRef;

/// Color theme for the DOT output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Light,
    Dark,
}

impl Style {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Style::Light),
            "dark" => Some(Style::Dark),
            _ => None,
        }
    }
}

/// Output format of the visualize stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dot,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Some(OutputFormat::Dot),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Render the graph as Graphviz source.
///
/// The root renders as a rectangle and sections as ovals; overflow nodes are
/// dashed. Edge pen widths scale with the share of the site's URLs flowing
/// through them.
pub fn render_dot(site: &SiteGraph, style: Style) -> String {
    let (fg, fill) = match style {
        Style::Light => ("black", "#dbdddd"),
        Style::Dark => ("white", "black"),
    };

    let mut out = String::new();
    out.push_str("digraph sitemap {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str(&format!("  size=\"{}\";\n", dot_escape(&site.size_hint)));
    if style == Style::Dark {
        out.push_str("  bgcolor=\"#3a3a3a\";\n");
    }
    out.push_str(&format!(
        "  graph [label=\"{}\", labelloc=b, fontname=\"Helvetica\", fontsize=18, fontcolor={}];\n",
        dot_escape(&site.title),
        fg
    ));
    out.push_str(&format!(
        "  node [style=filled, color={}, fillcolor=\"{}\", fontname=\"Helvetica\", fontsize=14, fontcolor={}];\n",
        fg, fill, fg
    ));
    out.push_str(&format!(
        "  edge [color={}, arrowhead=open, fontname=\"Helvetica\", fontsize=12, fontcolor={}];\n\n",
        fg, fg
    ));

    for idx in site.graph.node_indices() {
        let node = &site.graph[idx];
        let shape = match node.kind {
            NodeKind::Root => "rectangle",
            NodeKind::Section | NodeKind::Overflow => "oval",
        };
        let extra = if node.kind == NodeKind::Overflow {
            ", style=\"filled,dashed\""
        } else {
            ""
        };
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", shape={}{}];\n",
            dot_escape(&node.id),
            dot_escape(&node.label),
            shape,
            extra
        ));
    }
    out.push('\n');

    let root_count = site.graph[site.root].leaf_count.max(1);
    for edge in site.graph.edge_references() {
        let weight = edge.weight().weight;
        let penwidth = 1.0 + 3.0 * (weight as f64 / root_count as f64);
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", penwidth={:.2}];\n",
            dot_escape(&site.graph[edge.source()].id),
            dot_escape(&site.graph[edge.target()].id),
            format_count(weight),
            penwidth
        ));
    }

    out.push_str("}\n");
    out
}

/// Render the graph as a neutral JSON description: node list, edge list,
/// title and size hint. Field order is fixed, so identical graphs serialize
/// identically.
pub fn render_json(site: &SiteGraph) -> serde_json::Result<String> {
    let nodes: Vec<&GraphNode> = site.graph.node_indices().map(|i| &site.graph[i]).collect();
    let edges: Vec<serde_json::Value> = site
        .graph
        .edge_references()
        .map(|edge| {
            serde_json::json!({
                "source": site.graph[edge.source()].id,
                "target": site.graph[edge.target()].id,
                "weight": edge.weight().weight,
            })
        })
        .collect();

    let description = serde_json::json!({
        "sitemap": {
            "title": site.title,
            "size": site.size_hint,
            "nodes": nodes,
            "edges": edges,
        }
    });

    serde_json::to_string_pretty(&description)
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
