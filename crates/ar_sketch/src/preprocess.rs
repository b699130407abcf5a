//! Text-level pipeline that rewrites a sketch into a translation unit.
//!
//! Processing order:
//! 1. Redact literals, comments and directives (`ar_lexer`)
//! 2. Collapse brace-delimited blocks
//! 3. Extract prototypes from what is left at top level
//! 4. Hoist includes out of the original lines and assemble the output
//!
//! Step 4 works on the untouched source lines; steps 1-3 only feed it the
//! prototype list.

use ar_model::{IncludeLine, Prototype, SketchSyntax};
use tracing::debug;

mod assemble;
mod collapse;
mod include_pass;
mod prototype_pass;

pub use assemble::line_marker;
pub use collapse::collapse_braces;
pub use include_pass::hoist_includes;
pub use prototype_pass::{extract_prototypes, is_signature};

/// Everything the assembler needs for one sketch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub includes: Vec<IncludeLine>,
    pub prototypes: Vec<Prototype>,
    /// Original lines with each hoisted include commented out.
    pub body: Vec<String>,
}

impl Translation {
    /// Render the final `.cpp` text. `sketch_name` is what the origin
    /// marker points diagnostics at.
    pub fn render(&self, sketch_name: &str, syntax: &SketchSyntax) -> String {
        assemble::assemble(self, sketch_name, syntax)
    }
}

/// Run the analysis stages over a sketch without rendering.
pub fn translate(source: &str, syntax: &SketchSyntax) -> Translation {
    let prototypes = find_prototypes(source, syntax);

    // TODO: accept CRLF sketches by splitting on `\r\n` as well.
    let lines: Vec<&str> = source.split('\n').collect();
    let (includes, body) = hoist_includes(&lines);

    debug!(
        lines = lines.len(),
        includes = includes.len(),
        prototypes = prototypes.len(),
        "translated sketch"
    );

    Translation {
        includes,
        prototypes,
        body,
    }
}

/// Preprocess a sketch source string into compilable C++.
pub fn preprocess(source: &str, sketch_name: &str, syntax: &SketchSyntax) -> String {
    translate(source, syntax).render(sketch_name, syntax)
}

fn find_prototypes(source: &str, syntax: &SketchSyntax) -> Vec<Prototype> {
    let redacted = ar_lexer::redact(source);
    let collapsed = collapse_braces(&redacted, syntax.compat_brace_leak);
    extract_prototypes(&collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signatures(source: &str) -> Vec<String> {
        translate(source, &SketchSyntax::default())
            .prototypes
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn setup_and_loop() {
        let input = "void setup() {\n  int x = 1;\n}\nvoid loop() {}";
        assert_eq!(signatures(input), vec!["void setup();", "void loop();"]);
    }

    #[test]
    fn braces_in_string_do_not_confuse_depth() {
        let input = "const char* s = \"{not a brace}\";\nint f(int a) {\n  return a;\n}\n";
        assert_eq!(signatures(input), vec!["int f(int a);"]);
    }

    #[test]
    fn definitions_in_comments_are_ignored() {
        let input = "// void ghost() {}\n/* int phantom(int x) {\n} */\nvoid real() {}\n";
        assert_eq!(signatures(input), vec!["void real();"]);
    }

    #[test]
    fn calls_inside_bodies_are_ignored() {
        let input = "void loop() {\n  if (ready()) {\n    blink(13);\n  }\n}\nbool ready() { return true; }\n";
        assert_eq!(signatures(input), vec!["void loop();", "bool ready();"]);
    }

    #[test]
    fn directive_braces_are_ignored() {
        let input = "#define BLOCK(x) { x; }\nvoid setup() {}\n";
        assert_eq!(signatures(input), vec!["void setup();"]);
    }

    #[test]
    fn duplicate_definitions_are_kept() {
        let input = "#ifdef A\nvoid f() {}\n#else\nvoid f() {}\n#endif\n";
        assert_eq!(signatures(input), vec!["void f();", "void f();"]);
    }

    #[test]
    fn body_keeps_line_count() {
        let input = "#include <Servo.h>\n#include \"pins.h\"\nServo s;\nvoid setup(){}\n";
        let translation = translate(input, &SketchSyntax::default());
        assert_eq!(translation.body.len(), input.split('\n').count());
        assert_eq!(translation.includes.len(), 2);
    }
}
