use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ar_model::SketchSyntax;
use tracing::info;

use crate::preprocess;

/// Name of the generated file: the sketch's base name with its last
/// extension (if made of word characters) replaced by `.cpp`.
pub fn output_file_name(sketch: &Path) -> String {
    let base = sketch
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = match base.rsplit_once('.') {
        Some((stem, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_') =>
        {
            stem
        }
        _ => base.as_str(),
    };
    format!("{stem}.cpp")
}

/// Preprocess one sketch into `output_dir`, returning the written path.
///
/// The sketch is read in full before the output is created, so a missing
/// input leaves nothing behind. `output_dir` must already exist.
pub fn preprocess_sketch_file(sketch: &Path, output_dir: &Path, syntax: &SketchSyntax) -> Result<PathBuf> {
    let source = std::fs::read_to_string(sketch)
        .with_context(|| format!("failed to read sketch {}", sketch.display()))?;

    let sketch_name = sketch.display().to_string();
    let output = preprocess::preprocess(&source, &sketch_name, syntax);

    let output_path = output_dir.join(output_file_name(sketch));
    std::fs::write(&output_path, output)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    info!(sketch = %sketch.display(), output = %output_path.display(), "preprocessed sketch");
    Ok(output_path)
}

/// Preprocess several sketches in order, creating `output_dir` first.
///
/// Stops at the first sketch that fails.
pub fn preprocess_sketches(sketches: &[PathBuf], output_dir: &Path, syntax: &SketchSyntax) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    sketches
        .iter()
        .map(|sketch| preprocess_sketch_file(sketch, output_dir, syntax))
        .collect()
}
