//! Listings printed for make to consume.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use ar_model::ProjectConfig;

use crate::error::{BuildError, Result};

/// Directories holding any configured header, relative to the project.
pub fn header_folders(config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    let project = absolute(&config.project_dir)?;
    let mut folders = BTreeSet::new();

    for header in config.all_headers() {
        let dir = absolute(header.parent().unwrap_or_else(|| Path::new("")))?;
        folders.insert(relative_path(&dir, &project));
    }

    Ok(folders.into_iter().collect())
}

/// Configured sources relative to the project, in configured order.
pub fn source_files(config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    let project = absolute(&config.project_dir)?;
    config
        .sources
        .iter()
        .map(|source| -> Result<PathBuf> { Ok(relative_path(&absolute(source)?, &project)) })
        .collect()
}

/// Create `path` and any missing parents. Existing directories are fine.
pub fn mkdirs(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(BuildError::io(path))
}

/// Lexical relative path from `base` to `path`, like `os.path.relpath`.
///
/// Both paths should be absolute, or both relative to the same directory;
/// otherwise `path` is returned unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() != base.is_absolute() {
        return path.to_path_buf();
    }

    let path_parts = normalized(path);
    let base_parts = normalized(base);
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for part in path.components() {
        match part {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(BuildError::io("."))?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_model::Library;

    #[test]
    fn relative_path_walks_up_and_down() {
        assert_eq!(relative_path(Path::new("/p/src/lib"), Path::new("/p")), PathBuf::from("src/lib"));
        assert_eq!(relative_path(Path::new("/opt/core"), Path::new("/p/app")), PathBuf::from("../../opt/core"));
        assert_eq!(relative_path(Path::new("/p/./a/../b"), Path::new("/p")), PathBuf::from("b"));
        assert_eq!(relative_path(Path::new("/p"), Path::new("/p")), PathBuf::from("."));
    }

    #[test]
    fn header_folders_are_unique_and_sorted() {
        let root = PathBuf::from("/work/blink");
        let mut config = ProjectConfig {
            project_dir: root.clone(),
            ..ProjectConfig::default()
        };
        config.headers = vec![root.join("src/a.h"), root.join("src/b.h")];
        config.board.core_headers = vec!["/opt/arduino/cores/arduino/Arduino.h".into()];
        config.board.variant_headers = vec!["/opt/arduino/variants/standard/pins_arduino.h".into()];
        config.libraries.insert(
            "Servo".into(),
            Library {
                version: "1.1.2".into(),
                headers: vec![root.join("libs/Servo-1.1.2/Servo.h")],
            },
        );

        assert_eq!(
            header_folders(&config).unwrap(),
            vec![
                PathBuf::from("../../opt/arduino/cores/arduino"),
                PathBuf::from("../../opt/arduino/variants/standard"),
                PathBuf::from("libs/Servo-1.1.2"),
                PathBuf::from("src"),
            ]
        );
    }

    #[test]
    fn source_files_keep_configured_order() {
        let config = ProjectConfig {
            project_dir: "/work/blink".into(),
            sources: vec!["/work/blink/src/z.cpp".into(), "/work/blink/build/Blink.cpp".into()],
            ..ProjectConfig::default()
        };
        assert_eq!(
            source_files(&config).unwrap(),
            vec![PathBuf::from("src/z.cpp"), PathBuf::from("build/Blink.cpp")]
        );
    }

    #[test]
    fn mkdirs_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        mkdirs(&nested).unwrap();
        mkdirs(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
