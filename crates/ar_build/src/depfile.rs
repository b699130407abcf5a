//! `.d` to `.ad` dependency rewriting.
//!
//! The compiler's `.d` file is copied verbatim, followed by an empty rule
//! for every prerequisite (so deleted headers do not break make), and one
//! rule per library the target uses, pointing at a `NAME-VERSION.alib`
//! stamp. A library upgrade then rebuilds exactly the objects that used it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ar_model::Library;
use tracing::{debug, warn};

use crate::error::{BuildError, Result};

pub const AD_EXTENSION: &str = ".ad";
pub const LIBDEP_EXTENSION: &str = "alib";

/// Default `.ad` path for a `.d` path: a trailing `.d` is replaced,
/// anything else gets `.ad` appended.
pub fn ad_path_for(dpath: &Path) -> PathBuf {
    let text = dpath.to_string_lossy();
    match text.strip_suffix(".d") {
        Some(stem) => PathBuf::from(format!("{stem}{AD_EXTENSION}")),
        None => PathBuf::from(format!("{text}{AD_EXTENSION}")),
    }
}

/// Split a library directory name into name and version.
///
/// `Servo-1.1.2` gives `("Servo", "1.1.2")`. The version starts after the
/// last `-` that is followed by a digit; without one the version is empty.
pub fn library_identity(dir_name: &str) -> (String, String) {
    let split = dir_name
        .match_indices('-')
        .map(|(i, _)| i)
        .filter(|&i| dir_name[i + 1..].starts_with(|c: char| c.is_ascii_digit()))
        .last();

    match split {
        Some(i) if i > 0 => (dir_name[..i].to_string(), dir_name[i + 1..].to_string()),
        _ => (dir_name.to_string(), String::new()),
    }
}

/// Rewrite `dpath` into `adpath` (or [`ad_path_for`]).
///
/// Returns `Ok(None)` without writing anything when `dpath` is not a file.
/// Fails with [`BuildError::VersionConflict`] before writing when the
/// target depends on two versions of a configured library.
pub fn convert_depfile(
    dpath: &Path,
    adpath: Option<&Path>,
    libraries: &BTreeMap<String, Library>,
) -> Result<Option<PathBuf>> {
    if !dpath.is_file() {
        debug!("{} was not found.", dpath.display());
        return Ok(None);
    }

    let adpath = adpath.map(Path::to_path_buf).unwrap_or_else(|| ad_path_for(dpath));
    let content = std::fs::read_to_string(dpath).map_err(BuildError::io(dpath))?;
    let rewritten = rewrite(&content, libraries)?;

    std::fs::write(&adpath, rewritten).map_err(BuildError::io(&adpath))?;
    debug!(dpath = %dpath.display(), adpath = %adpath.display(), "wrote dependency file");
    Ok(Some(adpath))
}

fn rewrite(content: &str, libraries: &BTreeMap<String, Library>) -> Result<String> {
    let mut out = String::from(content);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    let mut target: Option<String> = None;
    let mut used: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for raw in content.split_inclusive('\n') {
        if raw.trim_start().starts_with('#') {
            continue;
        }

        let mut line = raw;
        if target.is_none() {
            let recipe: Vec<&str> = raw.split(':').collect();
            if let [name, prerequisites] = recipe.as_slice() {
                target = Some((*name).to_string());
                line = *prerequisites;
            }
        }

        for item in line.split(' ').map(clean_item).filter(|item| !item.is_empty()) {
            if item.ends_with(".h") {
                let (name, version) = header_library(Path::new(item));
                used.entry(name).or_default().insert(version);
            }
            out.push_str(item);
            out.push_str(":\n");
        }
    }

    let Some(target) = target else {
        if !used.is_empty() {
            warn!("no build target found; library dependencies skipped");
        }
        return Ok(out);
    };

    for (name, library) in libraries {
        let Some(found) = used.get(name) else {
            continue;
        };
        // An unversioned library directory takes the registry's version.
        let versions: BTreeSet<&str> = found
            .iter()
            .map(|v| if v.is_empty() { library.version.as_str() } else { v.as_str() })
            .collect();
        if versions.len() > 1 {
            return Err(BuildError::VersionConflict {
                target,
                count: versions.len(),
                library: name.clone(),
            });
        }
        if let Some(version) = versions.first() {
            out.push_str(&stamp_rule(&target, name, version));
        }
    }

    Ok(out)
}

fn stamp_rule(target: &str, name: &str, version: &str) -> String {
    if version.is_empty() {
        format!("{target} : {name}.{LIBDEP_EXTENSION}\n")
    } else {
        format!("{target} : {name}-{version}.{LIBDEP_EXTENSION}\n")
    }
}

/// Strip a `#` comment and a trailing `\` continuation from one item.
/// Whole comment lines never get this far.
fn clean_item(item: &str) -> &str {
    if item.trim_start().starts_with('#') {
        return "";
    }
    match item.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\\').unwrap_or(rest).trim_end(),
        None => item,
    }
}

/// Library identity of the directory holding `header`, following symlinks
/// when the header exists.
fn header_library(header: &Path) -> (String, String) {
    let resolved = std::fs::canonicalize(header).unwrap_or_else(|_| header.to_path_buf());
    let dir_name = resolved
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    library_identity(&dir_name)
}
