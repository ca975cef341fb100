use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// One filesystem search: where to start, what to find, what to skip,
/// and when to give up.
pub struct SearchRequest<'a> {
    pub start: &'a Path,
    /// Base names that count as a hit, whether file or directory.
    pub targets: &'a [&'a str],
    /// Path fragments; a directory whose path contains one is never searched.
    pub exclude: &'a [&'a str],
    /// Names whose presence directly inside a candidate halts the upward walk.
    pub stop_markers: &'a [&'a str],
    /// How many ancestors above `start` to consider; unbounded when `None`.
    pub max_parent_levels: Option<usize>,
}

/// Search `start` and then each of its ancestors, innermost first, for an
/// entry named like one of `targets`. A matching file yields its parent
/// directory, a matching directory yields itself, always absolute.
///
/// Each candidate is walked depth-first with siblings in lexicographic
/// order, so the first hit is reproducible. Subtrees whose path contains an
/// exclude fragment are pruned; unreadable subtrees simply yield no matches.
/// When a candidate holds no match but contains a stop marker, the search
/// ends there with `None` instead of climbing further.
pub fn locate(req: &SearchRequest) -> Result<Option<PathBuf>> {
    let start = req.start.canonicalize().with_context(|| {
        format!("search start directory {} does not exist", req.start.display())
    })?;

    let levels = req.max_parent_levels.map_or(usize::MAX, |k| k.saturating_add(1));

    for candidate in start.ancestors().take(levels) {
        if !contains_fragment(candidate, req.exclude) {
            if let Some(found) = search_below(candidate, req) {
                return Ok(Some(found));
            }
        }
        // Excluded candidates are not searched but still honor stop markers.
        if req.stop_markers.iter().any(|m| candidate.join(m).exists()) {
            return Ok(None);
        }
    }

    Ok(None)
}

fn search_below(dir: &Path, req: &SearchRequest) -> Option<PathBuf> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !contains_fragment(e.path(), req.exclude));

    for entry in walker.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy();
        if req.targets.iter().any(|t| *t == name) {
            let found = if entry.file_type().is_dir() {
                entry.path().to_path_buf()
            } else {
                entry.path().parent().unwrap_or(dir).to_path_buf()
            };
            return Some(found);
        }
    }

    None
}

fn contains_fragment(path: &Path, fragments: &[&str]) -> bool {
    let repr = path.to_string_lossy();
    fragments.iter().any(|f| repr.contains(f))
}
