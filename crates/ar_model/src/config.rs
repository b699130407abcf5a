//! Resolved project configuration.
//!
//! The configuration is produced elsewhere (board and library resolution)
//! and handed over as a JSON document. Everything here is read-only once
//! loaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::SketchSyntax;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub core_headers: Vec<PathBuf>,
    pub variant_headers: Vec<PathBuf>,
}

/// A library resolved for this build. Its name is the registry key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Library {
    pub version: String,
    pub headers: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub headers: Vec<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub board: Board,
    /// Library registry keyed by library name.
    pub libraries: BTreeMap<String, Library>,
    pub sketch: SketchSyntax,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            headers: Vec::new(),
            sources: Vec::new(),
            board: Board::default(),
            libraries: BTreeMap::new(),
            sketch: SketchSyntax::default(),
        }
    }
}

impl ProjectConfig {
    /// Load a configuration file. Relative paths inside it are taken
    /// relative to the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: ProjectConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_against(base);
        Ok(config)
    }

    fn resolve_against(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.project_dir);
        join(&mut self.build_dir);
        self.headers.iter_mut().for_each(join);
        self.sources.iter_mut().for_each(join);
        self.board.core_headers.iter_mut().for_each(join);
        self.board.variant_headers.iter_mut().for_each(join);
        for library in self.libraries.values_mut() {
            library.headers.iter_mut().for_each(join);
        }
    }

    /// Project, core, variant and library headers, in that order.
    pub fn all_headers(&self) -> Vec<&Path> {
        let mut headers: Vec<&Path> = Vec::new();
        headers.extend(self.headers.iter().map(PathBuf::as_path));
        headers.extend(self.board.core_headers.iter().map(PathBuf::as_path));
        headers.extend(self.board.variant_headers.iter().map(PathBuf::as_path));
        for library in self.libraries.values() {
            headers.extend(library.headers.iter().map(PathBuf::as_path));
        }
        headers
    }
}
