//! Output assembly.

use ar_model::SketchSyntax;

use super::Translation;

/// The marker placed right before the body. `#line` makes the compiler
/// report body diagnostics against the sketch itself.
pub fn line_marker(sketch_name: &str, syntax: &SketchSyntax) -> String {
    if syntax.line_marker {
        let escaped = sketch_name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("#line 1 \"{escaped}\"")
    } else {
        format!("// line 1 {sketch_name}")
    }
}

/// Master include, hoisted includes, prototypes, marker, then the body.
pub(super) fn assemble(translation: &Translation, sketch_name: &str, syntax: &SketchSyntax) -> String {
    let mut out = format!("#include <{}>\n", syntax.umbrella_header);

    for include in &translation.includes {
        out.push_str(&include.to_string());
        out.push('\n');
    }
    for prototype in &translation.prototypes {
        out.push_str(&prototype.to_string());
        out.push('\n');
    }

    out.push_str(&line_marker(sketch_name, syntax));
    out.push('\n');
    out.push_str(&translation.body.join("\n"));
    out
}
