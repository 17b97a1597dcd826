// URL categorization: fold a flat URL list into a depth-bounded prefix tree.

use crate::error::{MapError, Result};
use crate::types::{CategoryRow, join_segment};
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

/// Split a URL into the non-empty segments of its path.
///
/// Scheme-less inputs like `example.com/blog` are retried with an implied
/// `http://`. Query strings and fragments are discarded along with the rest
/// of the non-path components. Returns `None` when the input is not a
/// parseable URL either way.
pub fn path_segments(raw: &str) -> Option<Vec<String>> {
    let parsed = Url::parse(raw)
        .or_else(|_| Url::parse(&format!("http://{raw}")))
        .ok()?;

    // mailto: and friends carry no path hierarchy
    if parsed.cannot_be_a_base() {
        return None;
    }

    Some(
        parsed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Build the category row table for `urls`, truncated at `depth` path segments.
///
/// Every prefix of every URL's path, up to `depth` segments, becomes one row
/// whose `leaf_count` is the number of input URLs (occurrences, not distinct
/// values) it covers. The root row has path `/` and covers everything. Rows
/// come back sorted by depth, then path, so identical input always yields an
/// identical table.
pub fn categorize(urls: &[String], depth: usize) -> Result<Vec<CategoryRow>> {
    // Arena of rows indexed by path. Parent/child relations are path
    // references, not pointers, so the table can be handed off as-is.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut arena: Vec<CategoryRow> = Vec::new();

    // The root exists even for an empty URL list.
    index.insert("/".to_string(), 0);
    arena.push(CategoryRow {
        path: "/".to_string(),
        depth: 0,
        parent_path: None,
        leaf_count: 0,
    });

    for (lineno, raw) in urls.iter().enumerate() {
        let segments = path_segments(raw).ok_or_else(|| MapError::MalformedInput {
            line: lineno + 1,
            input: raw.clone(),
            reason: "not a parseable URL".to_string(),
        })?;

        debug!("Categorizing {} ({} segments)", raw, segments.len());
        arena[0].leaf_count += 1;

        let mut path = String::from("/");
        for (i, segment) in segments.iter().take(depth).enumerate() {
            let child = join_segment(&path, segment);
            let idx = match index.get(child.as_str()) {
                Some(&idx) => idx,
                None => {
                    let idx = arena.len();
                    index.insert(child.clone(), idx);
                    arena.push(CategoryRow {
                        path: child.clone(),
                        depth: i + 1,
                        parent_path: Some(path.clone()),
                        leaf_count: 0,
                    });
                    idx
                }
            };
            arena[idx].leaf_count += 1;
            path = child;
        }
    }

    arena.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.path.cmp(&b.path)));

    info!("Categorized {} URLs into {} nodes", urls.len(), arena.len());
    Ok(arena)
}
