// Layer-table artifact I/O: the categorize -> visualize hand-off.

use crate::error::{MapError, Result};
use crate::types::CategoryRow;

const HEADER: &str = "path,depth,parent_path,leaf_count";

/// Serialize rows to the layer-table text format, preserving row order.
pub fn write_rows(rows: &[CategoryRow]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&escape_field(&row.path));
        out.push(',');
        out.push_str(&row.depth.to_string());
        out.push(',');
        if let Some(ref parent) = row.parent_path {
            out.push_str(&escape_field(parent));
        }
        out.push(',');
        out.push_str(&row.leaf_count.to_string());
        out.push('\n');
    }

    out
}

/// Parse a layer table back into rows, preserving file order.
pub fn read_rows(text: &str) -> Result<Vec<CategoryRow>> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header == HEADER => {}
        other => {
            return Err(malformed(
                1,
                other.map(|(_, l)| l).unwrap_or(""),
                "missing layer table header",
            ));
        }
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.is_empty() {
            continue;
        }

        let fields =
            split_fields(line).ok_or_else(|| malformed(idx + 1, line, "unbalanced quoting"))?;
        if fields.len() != 4 {
            return Err(malformed(idx + 1, line, "expected 4 columns"));
        }

        let depth = fields[1]
            .parse::<usize>()
            .map_err(|_| malformed(idx + 1, line, "depth is not an integer"))?;
        let leaf_count = fields[3]
            .parse::<u64>()
            .map_err(|_| malformed(idx + 1, line, "leaf_count is not an integer"))?;
        let parent_path = if fields[2].is_empty() {
            None
        } else {
            Some(fields[2].clone())
        };

        rows.push(CategoryRow {
            path: fields[0].clone(),
            depth,
            parent_path,
            leaf_count,
        });
    }

    Ok(rows)
}

fn malformed(line: usize, input: &str, reason: &str) -> MapError {
    MapError::MalformedInput {
        line,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();

    loop {
        match chars.next() {
            None => {
                fields.push(field);
                return Some(fields);
            }
            Some(',') => fields.push(std::mem::take(&mut field)),
            Some('"') => {
                if !field.is_empty() {
                    return None;
                }
                loop {
                    match chars.next() {
                        // unterminated quote
                        None => return None,
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                field.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(c) => field.push(c),
                    }
                }
            }
            Some(c) => field.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<CategoryRow> {
        vec![
            CategoryRow {
                path: "/".to_string(),
                depth: 0,
                parent_path: None,
                leaf_count: 3,
            },
            CategoryRow {
                path: "/blog".to_string(),
                depth: 1,
                parent_path: Some("/".to_string()),
                leaf_count: 2,
            },
            CategoryRow {
                path: "/shop".to_string(),
                depth: 1,
                parent_path: Some("/".to_string()),
                leaf_count: 1,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let rows = sample_rows();
        let text = write_rows(&rows);
        assert_eq!(read_rows(&text).unwrap(), rows);
    }

    #[test]
    fn test_round_trip_with_separator_in_path() {
        let rows = vec![
            CategoryRow {
                path: "/".to_string(),
                depth: 0,
                parent_path: None,
                leaf_count: 1,
            },
            CategoryRow {
                path: "/a,b".to_string(),
                depth: 1,
                parent_path: Some("/".to_string()),
                leaf_count: 1,
            },
        ];
        let text = write_rows(&rows);
        assert_eq!(read_rows(&text).unwrap(), rows);
    }

    #[test]
    fn test_write_is_deterministic() {
        let rows = sample_rows();
        assert_eq!(write_rows(&rows), write_rows(&rows));
    }

    #[test]
    fn test_read_rejects_missing_header() {
        let err = read_rows("/,0,,3\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_read_rejects_bad_column_count() {
        let text = format!("{HEADER}\n/,0,3\n");
        let err = read_rows(&text).unwrap_err();
        assert!(matches!(err, MapError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_read_rejects_non_numeric_count() {
        let text = format!("{HEADER}\n/,0,,many\n");
        let err = read_rows(&text).unwrap_err();
        assert!(matches!(err, MapError::MalformedInput { line: 2, .. }));
    }
}
