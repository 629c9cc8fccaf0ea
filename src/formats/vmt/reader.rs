//! Best-effort VMT parsing
//!
//! VMT files are Valve KeyValues text: a shader name, braces, and quoted
//! `key value` pairs. Real-world skin VMTs are frequently sloppy (missing
//! quotes, stray directives, Windows separators), so the parser extracts what
//! it can and records anything suspicious as a warning instead of failing.

use super::VmtDescriptor;

pub(super) fn parse(text: &str) -> VmtDescriptor {
    let mut descriptor = VmtDescriptor::default();
    let mut depth: u32 = 0;

    for (line_no, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        if line == "{" {
            depth += 1;
            continue;
        }
        if line == "}" {
            depth = depth.saturating_sub(1);
            continue;
        }

        let tokens = tokenize(line);
        match tokens.as_slice() {
            [name] if depth == 0 && descriptor.shader.is_none() => {
                descriptor.shader = Some(name.clone());
            }
            [key, value, ..] => {
                let key = key.trim_start_matches('$').to_ascii_lowercase();
                match key.as_str() {
                    "basetexture" => descriptor.base_texture = Some(normalize(value)),
                    "bumpmap" => descriptor.normal_map = Some(normalize(value)),
                    _ => {}
                }
            }
            [lone] if depth > 0 => {
                descriptor
                    .warnings
                    .push(format!("line {}: directive '{lone}' has no value", line_no + 1));
            }
            _ => {}
        }
    }

    if depth != 0 {
        descriptor.warnings.push("unbalanced braces".to_string());
    }

    descriptor
}

fn normalize(value: &str) -> String {
    value.replace('\\', "/")
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(before, _)| before)
}

/// Split a line into tokens, honoring double quotes.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                if in_quotes {
                    tokens.push(std::mem::take(&mut current));
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
