//! Relaxed JSON request-body parsing
//!
//! Bodies typed on a command line are easier to write with comments and
//! trailing commas. This module strips that relaxed syntax down to strict
//! JSON before the body is transmitted.

use serde_json::Value;

/// Parses a request body written in relaxed JSON
///
/// Line comments (`//`), block comments (`/* */`), and trailing commas
/// before a closing `]` or `}` are tolerated and removed; the remainder
/// must be strict JSON. Comment markers and commas inside string literals
/// are left untouched.
pub fn parse_relaxed(text: &str) -> Result<Value, serde_json::Error> {
    let stripped = strip_comments(text);
    let strict = strip_trailing_commas(&stripped);
    serde_json::from_str(&strict)
}

/// Removes `//` and `/* */` comments outside string literals
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Removes commas whose next significant character closes an array or object
fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}
