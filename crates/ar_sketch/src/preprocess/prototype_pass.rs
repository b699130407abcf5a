//! Prototype extraction.
//!
//! Looks for `<type> <declarator>(<params>)` spans followed by `{` in
//! collapsed text. Only word characters, `&`, `[`, `]`, `*` and whitespace
//! may appear in each part, which keeps out expressions and most
//! statements but not everything: a top-level `name name(args) {` shape is
//! always taken for a function.

use ar_model::Prototype;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

const SIGNATURE: &str = r"[\w\[\]\*]+\s+[&\[\]\*\w\s]+\([&,\[\]\*\w\s]*\)";

static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?P<signature>{SIGNATURE})\s*\{{"))
        .expect("definition pattern compiles")
});

static SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:{SIGNATURE})$")).expect("signature pattern compiles"));

/// Collect a prototype for every function definition, in source order.
///
/// Matches never overlap. Repeated signatures are all kept.
pub fn extract_prototypes(collapsed: &str) -> Vec<Prototype> {
    DEFINITION_RE
        .captures_iter(collapsed)
        .filter_map(|caps| caps.name("signature"))
        .map(|m| {
            trace!(signature = m.as_str(), "found definition");
            Prototype::new(m.as_str())
        })
        .collect()
}

/// True when `text` is exactly one signature as recognised above.
pub fn is_signature(text: &str) -> bool {
    SIGNATURE_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(collapsed: &str) -> Vec<String> {
        extract_prototypes(collapsed)
            .into_iter()
            .map(|p| p.signature)
            .collect()
    }

    #[test]
    fn pointer_reference_and_array_parameters() {
        let collapsed = "char* name(int &a, byte buf[], long *p) {}";
        assert_eq!(extract(collapsed), vec!["char* name(int &a, byte buf[], long *p)"]);
    }

    #[test]
    fn qualifiers_are_part_of_the_type() {
        let collapsed = "static unsigned long millis2() {}";
        assert_eq!(extract(collapsed), vec!["static unsigned long millis2()"]);
    }

    #[test]
    fn signature_may_span_lines() {
        let collapsed = "int\nadd(int a,\n    int b)\n{}";
        assert_eq!(extract(collapsed), vec!["int\nadd(int a,\n    int b)"]);
    }

    #[test]
    fn declarations_without_body_are_skipped() {
        assert!(extract("void f();\nint x = g(1);\n").is_empty());
    }

    #[test]
    fn single_token_before_parens_is_not_a_definition() {
        assert!(extract("loop() {}").is_empty());
    }

    #[test]
    fn default_arguments_are_not_matched() {
        assert!(extract("void f(int a = 3) {}").is_empty());
    }

    #[test]
    fn extracted_signatures_round_trip() {
        let collapsed = "void setup() {}\nint *get(char c[]) {}\nbool\nready() {}";
        for prototype in extract_prototypes(collapsed) {
            let text = prototype.to_string();
            assert!(is_signature(text.strip_suffix(';').unwrap()), "{text}");
        }
    }
}
