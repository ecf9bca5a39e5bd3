//! Ordering of bar components.
//!
//! Sorting is skipped entirely while the user has a custom order. Otherwise
//! buffers are ordered by one of the built-in criteria ([`SortKind`]) or a
//! caller-supplied "less than" function. Components that are not buffers
//! compare equal to everything, so they keep their relative positions.

use crate::component::{BufferElement, Component};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Built-in sort criteria.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    /// Keep host order
    None,
    /// Document id, i.e. opening order
    #[default]
    Id,
    /// Full path
    Path,
    /// File extension
    Extension,
    /// Containing directory
    Directory,
    /// Containing directory relative to the working directory; documents
    /// outside it come last
    RelativeDirectory,
    /// Tab page number; documents not shown in a tab come last
    Tabs,
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKind::None => "none",
            SortKind::Id => "id",
            SortKind::Path => "path",
            SortKind::Extension => "extension",
            SortKind::Directory => "directory",
            SortKind::RelativeDirectory => "relative-directory",
            SortKind::Tabs => "tabs",
        };
        f.write_str(name)
    }
}

/// Caller-supplied "a sorts before b" predicate.
pub type CompareFn = Arc<dyn Fn(&Component, &Component) -> bool + Send + Sync>;

/// How to order components.
#[derive(Clone)]
pub enum SortBy {
    Kind(SortKind),
    Custom(CompareFn),
}

impl fmt::Debug for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Kind(kind) => write!(f, "SortBy::Kind({kind})"),
            SortBy::Custom(_) => f.write_str("SortBy::Custom(..)"),
        }
    }
}

impl From<SortKind> for SortBy {
    fn from(kind: SortKind) -> Self {
        SortBy::Kind(kind)
    }
}

/// Inputs a sort may depend on.
#[derive(Debug, Clone, Copy)]
pub struct SortContext<'a> {
    /// Active custom order; a non-empty order disables sorting
    pub custom_sort: Option<&'a [u64]>,
    /// Host working directory
    pub cwd: &'a Path,
}

/// Sorts `components` in place.
///
/// The sort is a stable insertion sort: it only moves an element past a
/// neighbour it is strictly less than, so an inconsistent predicate yields
/// some order rather than a panic.
pub fn sort(components: &mut [Component], by: &SortBy, ctx: &SortContext<'_>) {
    if ctx.custom_sort.is_some_and(|order| !order.is_empty()) {
        return;
    }
    if matches!(by, SortBy::Kind(SortKind::None)) {
        return;
    }

    let less = |a: &Component, b: &Component| match by {
        SortBy::Custom(compare) => compare(a, b),
        SortBy::Kind(kind) => match (a.as_buffer(), b.as_buffer()) {
            (Some(a), Some(b)) => buffer_ordering(*kind, a, b, ctx.cwd) == Ordering::Less,
            _ => false,
        },
    };

    for i in 1..components.len() {
        let mut j = i;
        while j > 0 && less(&components[j], &components[j - 1]) {
            components.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Reorders `components` by their position in `order`.
///
/// Components whose id is not listed follow the listed ones in their
/// existing order.
#[must_use]
pub fn apply_custom_order(components: Vec<Component>, order: &[u64]) -> Vec<Component> {
    let mut positions = HashMap::with_capacity(order.len());
    for (position, id) in order.iter().enumerate() {
        positions.entry(*id).or_insert(position);
    }

    let mut keyed: Vec<(usize, Component)> = components
        .into_iter()
        .map(|component| {
            let key = component
                .id()
                .raw()
                .and_then(|id| positions.get(&id).copied())
                .unwrap_or(usize::MAX);
            (key, component)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, component)| component).collect()
}

fn buffer_ordering(kind: SortKind, a: &BufferElement, b: &BufferElement, cwd: &Path) -> Ordering {
    match kind {
        SortKind::None => Ordering::Equal,
        SortKind::Id => a.id.cmp(&b.id),
        SortKind::Path => a.path.cmp(&b.path),
        SortKind::Extension => extension(&a.path).cmp(&extension(&b.path)),
        SortKind::Directory => a.path.parent().cmp(&b.path.parent()),
        SortKind::RelativeDirectory => {
            match (relative_dir(&a.path, cwd), relative_dir(&b.path, cwd)) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.path.cmp(&b.path),
            }
        }
        SortKind::Tabs => match (a.tab_number, b.tab_number) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        },
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn relative_dir(path: &Path, cwd: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(cwd).ok()?;
    Some(relative.parent().map(Path::to_path_buf).unwrap_or_default())
}
