// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, load_urls_from_file, save_url_list};

// Re-export the pipeline entry points from carto-core
pub use carto_core::{CategoryRow, GraphOptions, MapError, build_graph, categorize};
