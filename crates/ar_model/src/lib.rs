//! Shared data model for arturo.
//!
//! Holds the types passed between the sketch pipeline stages and the
//! project configuration consumed by the build-support commands:
//! - [`SketchSyntax`] options steering the preprocessor
//! - [`Prototype`] and [`IncludeLine`] produced while scanning a sketch
//! - [`ProjectConfig`] and [`Library`] describing a resolved build

pub mod config;

pub use config::{Board, Library, ProjectConfig};

use serde::{Deserialize, Serialize};

/// Options controlling how a sketch is turned into a translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchSyntax {
    /// Header named by the master include placed at the top of the output.
    pub umbrella_header: String,
    /// Emit `#line 1 "<sketch>"` before the body. When off, a comment of the
    /// same shape is written instead so the body keeps its position.
    pub line_marker: bool,
    /// Copy every `}` while collapsing braces, even ones closing a nested
    /// block. Older toolchains did this and some accepted outputs rely on it.
    pub compat_brace_leak: bool,
}

impl Default for SketchSyntax {
    fn default() -> Self {
        Self {
            umbrella_header: "Arduino.h".to_string(),
            line_marker: true,
            compat_brace_leak: false,
        }
    }
}

/// A forward declaration synthesized from a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prototype {
    /// The signature exactly as it appears in the collapsed source.
    pub signature: String,
}

impl Prototype {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }
}

impl std::fmt::Display for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.signature)
    }
}

/// Delimiter style of an include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncludeStyle {
    /// `#include <Foo.h>`, searched on the system include path.
    Angle,
    /// `#include "Foo.h"`, searched next to the including file first.
    Quote,
}

/// A top-level include directive found in a sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeLine {
    /// The original line, verbatim.
    pub text: String,
    /// Zero-based line index in the sketch.
    pub index: usize,
    /// Path between the delimiters.
    pub path: String,
    pub style: IncludeStyle,
}

impl std::fmt::Display for IncludeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prototype_displays_with_terminator() {
        assert_eq!(Prototype::new("void setup()").to_string(), "void setup();");
    }

    #[test]
    fn include_displays_verbatim() {
        let include = IncludeLine {
            text: "  #include \"pins.h\" // local".into(),
            index: 3,
            path: "pins.h".into(),
            style: IncludeStyle::Quote,
        };
        assert_eq!(include.to_string(), "  #include \"pins.h\" // local");
    }

    #[test]
    fn syntax_defaults_to_arduino_header() {
        let syntax = SketchSyntax::default();
        assert_eq!(syntax.umbrella_header, "Arduino.h");
        assert!(syntax.line_marker);
        assert!(!syntax.compat_brace_leak);
    }

    #[test]
    fn syntax_fills_missing_fields_from_default() {
        let syntax: SketchSyntax = serde_json::from_str(r#"{"umbrella_header": "WProgram.h"}"#).unwrap();
        assert_eq!(syntax.umbrella_header, "WProgram.h");
        assert!(syntax.line_marker);
    }
}
