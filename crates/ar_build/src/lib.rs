//! Build support used by the generated makefiles.
//!
//! - header folder and source listings over a resolved [`ProjectConfig`]
//! - portable `mkdir -p`
//! - rewriting a compiler `.d` file into an `.ad` file that also tracks
//!   library versions
//!
//! [`ProjectConfig`]: ar_model::ProjectConfig

pub mod depfile;
pub mod error;
pub mod listing;

pub use depfile::{ad_path_for, convert_depfile, library_identity};
pub use error::{BuildError, Result};
pub use listing::{header_folders, mkdirs, relative_path, source_files};
