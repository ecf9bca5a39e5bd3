//! Display names for documents.
//!
//! Two documents called `mod.rs` are shown as `parser/mod.rs` and
//! `lexer/mod.rs`: each duplicate grows by one parent directory at a time
//! until the names differ or the path runs out of components.

use std::path::{Component as PathComponent, Path};
use unicode_width::UnicodeWidthChar;

const NO_NAME: &str = "[No Name]";
const ELLIPSIS: char = '…';

/// Returns the shortest distinguishing name for every path.
///
/// Unique file names are returned unchanged.
///
/// # Example
///
/// ```
/// use bufbar_core::names::unique_names;
/// use std::path::Path;
///
/// let names = unique_names(&[
///     Path::new("/src/parser/mod.rs"),
///     Path::new("/src/lexer/mod.rs"),
///     Path::new("/src/main.rs"),
/// ]);
/// assert_eq!(names, vec!["parser/mod.rs", "lexer/mod.rs", "main.rs"]);
/// ```
#[must_use]
pub fn unique_names(paths: &[&Path]) -> Vec<String> {
    let parts: Vec<Vec<String>> = paths.iter().map(|path| normal_components(path)).collect();
    let mut depths = vec![1usize; paths.len()];

    loop {
        let names: Vec<String> = parts
            .iter()
            .zip(&depths)
            .map(|(parts, &depth)| suffix(parts, depth))
            .collect();

        let mut grown = false;
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                if names[i] != names[j] {
                    continue;
                }
                for k in [i, j] {
                    if depths[k] < parts[k].len() {
                        depths[k] += 1;
                        grown = true;
                    }
                }
            }
        }

        if !grown {
            return names;
        }
    }
}

/// Shortens `name` to at most `max_width` columns, ending in `…` when cut.
///
/// # Example
///
/// ```
/// use bufbar_core::names::truncate_name;
///
/// assert_eq!(truncate_name("main.rs", 18), "main.rs");
/// assert_eq!(truncate_name("a_very_long_file_name.rs", 8), "a_very_…");
/// ```
#[must_use]
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let width: usize = name.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width || max_width == 0 {
        return name.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            PathComponent::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn suffix(parts: &[String], depth: usize) -> String {
    if parts.is_empty() {
        return NO_NAME.to_string();
    }
    let start = parts.len() - depth.min(parts.len());
    parts[start..].join("/")
}
