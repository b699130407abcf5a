use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One build target pulls in headers from two versions of a library.
    #[error("{target} required {count} different versions of the {library} library")]
    VersionConflict {
        target: String,
        count: usize,
        library: String,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BuildError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
