//! Include hoisting.
//!
//! Top-level `#include` lines are collected for the output header and
//! commented out in place, so the body keeps the sketch's line numbering
//! and nothing is included twice.

use ar_model::{IncludeLine, IncludeStyle};
use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#include\s*(?P<open>[<"])(?P<path>\S+)[">]"#)
        .expect("include pattern compiles")
});

/// Split `lines` into the hoisted includes and the neutralized body.
///
/// The body always has exactly as many lines as the input. Matching is per
/// line; a directive continued with `\` is left where it is.
pub fn hoist_includes(lines: &[&str]) -> (Vec<IncludeLine>, Vec<String>) {
    let mut includes = Vec::new();
    let mut body = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        match parse_include(line, index) {
            Some(include) => {
                body.push(format!("//{line}"));
                includes.push(include);
            }
            None => body.push((*line).to_string()),
        }
    }

    (includes, body)
}

fn parse_include(line: &str, index: usize) -> Option<IncludeLine> {
    let caps = INCLUDE_RE.captures(line)?;
    let style = match &caps["open"] {
        "<" => IncludeStyle::Angle,
        _ => IncludeStyle::Quote,
    };
    Some(IncludeLine {
        text: line.to_string(),
        index,
        path: caps["path"].to_string(),
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_and_quote_includes_are_hoisted() {
        let lines = ["#include <Servo.h>", "Servo s;", "  #include \"pins.h\" // local"];
        let (includes, body) = hoist_includes(&lines);

        assert_eq!(includes.len(), 2);
        assert_eq!(includes[0].path, "Servo.h");
        assert_eq!(includes[0].style, IncludeStyle::Angle);
        assert_eq!(includes[0].index, 0);
        assert_eq!(includes[1].path, "pins.h");
        assert_eq!(includes[1].style, IncludeStyle::Quote);
        assert_eq!(includes[1].text, "  #include \"pins.h\" // local");

        assert_eq!(
            body,
            vec![
                "//#include <Servo.h>",
                "Servo s;",
                "//  #include \"pins.h\" // local"
            ]
        );
    }

    #[test]
    fn other_directives_stay_in_body() {
        let lines = ["#define LED 13", "#include_next <x.h>", "// #include <y.h>"];
        let (includes, body) = hoist_includes(&lines);
        assert!(includes.is_empty());
        assert_eq!(body, lines);
    }

    #[test]
    fn spacing_inside_directive_is_tolerated() {
        let (includes, _) = hoist_includes(&["\t#include<Wire.h>"]);
        assert_eq!(includes[0].path, "Wire.h");
    }

    #[test]
    fn continued_include_is_left_alone() {
        let lines = ["#include \\", "  <Servo.h>"];
        let (includes, body) = hoist_includes(&lines);
        assert!(includes.is_empty());
        assert_eq!(body, lines);
    }
}
