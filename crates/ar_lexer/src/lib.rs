//! Region scanner for sketch source.
//!
//! Splits a C++ sketch into spans of ordinary code and spans whose content
//! must not take part in structural matching:
//!
//! - character literals (`'x'`, `'\n'`)
//! - string literals (`"..."`, escapes honoured)
//! - line comments (`// ...`)
//! - block comments (`/* ... */`, not nested)
//! - preprocessor directives (`#...` at line start, with `\` continuations)
//!
//! [`redact`] replaces every non-code span with a single space. The result
//! is only ever scanned, never emitted.

/// Placeholder written in place of each redacted region.
pub const PLACEHOLDER: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Code,
    CharLiteral,
    StringLiteral,
    LineComment,
    BlockComment,
    Directive,
}

/// A half-open span of the source, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn is_code(&self) -> bool {
        self.kind == RegionKind::Code
    }
}

/// Partition `source` into consecutive regions covering every character.
///
/// The first region kind that can start at a position wins. An unterminated
/// string or block comment runs to the end of input.
pub fn scan_regions(source: &str) -> Vec<Region> {
    let chars: Vec<char> = source.chars().collect();
    let mut regions = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < chars.len() {
        let Some((kind, end)) = skip_non_code(&chars, i) else {
            i += 1;
            continue;
        };

        if code_start < i {
            regions.push(Region {
                kind: RegionKind::Code,
                start: code_start,
                end: i,
            });
        }
        regions.push(Region { kind, start: i, end });
        i = end;
        code_start = end;
    }

    if code_start < chars.len() {
        regions.push(Region {
            kind: RegionKind::Code,
            start: code_start,
            end: chars.len(),
        });
    }

    regions
}

/// Replace every literal, comment and directive with [`PLACEHOLDER`].
pub fn redact(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());

    for region in scan_regions(source) {
        if region.is_code() {
            out.extend(&chars[region.start..region.end]);
        } else {
            out.push(PLACEHOLDER);
        }
    }

    out
}

/// If a non-code region starts at `i`, return its kind and end offset.
fn skip_non_code(chars: &[char], i: usize) -> Option<(RegionKind, usize)> {
    if at_line_start(chars, i) {
        if let Some(end) = scan_directive(chars, i) {
            return Some((RegionKind::Directive, end));
        }
    }

    match chars[i] {
        '\'' => scan_char_literal(chars, i).map(|end| (RegionKind::CharLiteral, end)),
        '"' => Some((RegionKind::StringLiteral, scan_string(chars, i))),
        '/' if chars.get(i + 1) == Some(&'/') => {
            let mut j = i + 2;
            while j < chars.len() && chars[j] != '\n' {
                j += 1;
            }
            Some((RegionKind::LineComment, j))
        }
        '/' if chars.get(i + 1) == Some(&'*') => {
            let mut j = i + 2;
            while j + 1 < chars.len() {
                if chars[j] == '*' && chars[j + 1] == '/' {
                    return Some((RegionKind::BlockComment, j + 2));
                }
                j += 1;
            }
            Some((RegionKind::BlockComment, chars.len()))
        }
        _ => None,
    }
}

fn at_line_start(chars: &[char], i: usize) -> bool {
    i == 0 || chars[i - 1] == '\n'
}

/// A directive is optional horizontal whitespace, `#`, then the rest of the
/// line. A backslash before the newline continues it onto the next line.
fn scan_directive(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    while j < chars.len() && chars[j] != '\n' && chars[j].is_whitespace() {
        j += 1;
    }
    if chars.get(j) != Some(&'#') {
        return None;
    }

    while j < chars.len() && chars[j] != '\n' {
        if chars[j] == '\\' && continues_line(chars, j + 1) {
            // Step onto the newline; the loop below moves past it.
            while chars[j] != '\n' {
                j += 1;
            }
        }
        j += 1;
    }
    Some(j)
}

/// True when only an optional `\r` separates `j` from a newline.
fn continues_line(chars: &[char], j: usize) -> bool {
    match chars.get(j) {
        Some('\n') => true,
        Some('\r') => chars.get(j + 1) == Some(&'\n'),
        _ => false,
    }
}

/// A character literal must close on its own line; otherwise the quote is
/// left as code.
fn scan_char_literal(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i + 1;
    loop {
        match chars.get(j)? {
            '\n' => return None,
            '\\' => {
                if matches!(chars.get(j + 1), None | Some('\n')) {
                    return None;
                }
                j += 2;
            }
            '\'' => return Some(j + 1),
            _ => j += 1,
        }
    }
}

fn scan_string(chars: &[char], i: usize) -> usize {
    let mut j = i + 1;
    while j < chars.len() && chars[j] != '"' {
        if chars[j] == '\\' {
            j += 1;
        }
        j += 1;
    }
    if j < chars.len() {
        j + 1
    } else {
        chars.len()
    }
}
