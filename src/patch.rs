use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Replace every occurrence of `flag` in the file. A file without the flag
/// is left untouched, so re-running on an already-substituted file is a
/// no-op rather than an error.
pub fn set_flag(path: &Path, flag: &str, value: &str) -> Result<()> {
    let content = read(path)?;
    if content.contains(flag) {
        write(path, &content.replace(flag, value))?;
    }
    Ok(())
}

/// Insert `insertion` as its own line right after the line holding `anchor`.
/// The anchor must occur exactly once; zero or several occurrences abort
/// rather than patching the wrong spot.
pub fn insert_after(path: &Path, anchor: &str, insertion: &str) -> Result<()> {
    let content = read(path)?;
    let pos = find_once(path, &content, anchor)?;
    let line_end = content[pos..].find('\n').map_or(content.len(), |i| pos + i + 1);

    let mut patched = String::with_capacity(content.len() + insertion.len() + 2);
    patched.push_str(&content[..line_end]);
    if !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(insertion);
    patched.push('\n');
    patched.push_str(&content[line_end..]);
    write(path, &patched)
}

/// Literal replacement with the same exactly-once precondition.
pub fn replace_once(path: &Path, from: &str, to: &str) -> Result<()> {
    let content = read(path)?;
    find_once(path, &content, from)?;
    write(path, &content.replacen(from, to, 1))
}

fn find_once(path: &Path, content: &str, needle: &str) -> Result<usize> {
    match content.matches(needle).count() {
        1 => Ok(content.find(needle).unwrap_or(0)),
        0 => bail!("anchor {needle:?} not found in {}", path.display()),
        n => bail!("anchor {needle:?} found {n} times in {}", path.display()),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
