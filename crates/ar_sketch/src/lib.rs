//! Arduino sketch preprocessor.
//!
//! Turns a sketch (top-level statements and function definitions without
//! forward declarations) into a translation unit a C++ compiler accepts:
//!
//! - `#include <Arduino.h>` is prepended
//! - top-level includes are hoisted above everything else
//! - a prototype is synthesized for every top-level function definition
//!
//! The analysis is a best-effort approximation over redacted text, not a
//! C++ parser.

pub mod generate;
pub mod preprocess;

pub use generate::{output_file_name, preprocess_sketch_file, preprocess_sketches};
pub use preprocess::{preprocess, translate, Translation};
