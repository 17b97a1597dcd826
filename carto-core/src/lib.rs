pub mod categorize;
pub mod error;
pub mod graph;
pub mod render;
pub mod table;
pub mod types;

pub use categorize::categorize;
pub use error::{MapError, Result};
pub use graph::{GraphOptions, SiteGraph, build_graph, format_count};
pub use render::{OutputFormat, Style, render_dot, render_json};
pub use types::{CategoryRow, GraphEdge, GraphNode, NodeKind};

/// Print the startup banner.
pub fn print_banner() {
    println!(
        r#"
   ___ __ _ _ __| |_ ___
  / __/ _` | '__| __/ _ \
 | (_| (_| | |  | || (_) |
  \___\__,_|_|   \__\___/   v{}

  sitemap tree visualizer
"#,
        env!("CARGO_PKG_VERSION")
    );
}
