// src/core/html.rs
//! Tolerant, allocation-light HTML scanning. No DOM; blocks are located by
//! case-insensitive tag search and returned as slices of the input.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercase. Byte offsets stay valid against the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Position of the next `<tag` whose name is exactly `tag` (so `th` does not
/// match `<thead`). `lc` must be the lowercased haystack.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag);
    let mut pos = from;
    loop {
        let at = lc.get(pos..)?.find(&pat)? + pos;
        let after = at + pat.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = after,
        }
    }
}

/// Next `<tag ...>...</tag>` block at or after `from`, as a byte range.
fn next_element_lc(s: &str, lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open(lc, tag, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let close = join!("</", tag, ">");
    let end = lc[open_end..].find(&close)? + open_end + close.len();
    Some((start, end))
}

/// Every `<tag>` block in document order. Not nesting-aware: a `<table>`
/// inside a `<table>` ends the outer one early.
pub fn elements_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((a, b)) = next_element_lc(s, &lc, &tag, pos) {
        out.push(&s[a..b]);
        pos = b;
    }
    out
}

/// Opening tags only (`<a href=...>`), for elements whose body we do not need.
pub fn open_tags_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lc, &tag, pos) {
        let Some(end) = s[start..].find('>').map(|e| start + e + 1) else { break };
        out.push(&s[start..end]);
        pos = end;
    }
    out
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Tags become word breaks, so `<td>1<br>2</td>` reads `1 2`.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a cell block, entities decoded and whitespace collapsed.
pub fn cell_text(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

/// Value of `name="..."` (or single-quoted, or bare) inside an opening tag.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let pat = join!(&to_lower(name), "=");
    let mut pos = 0usize;
    let at = loop {
        let at = lc.get(pos..)?.find(&pat)? + pos;
        // attribute names are preceded by whitespace
        if at > 0 && lc.as_bytes()[at - 1].is_ascii_whitespace() {
            break at;
        }
        pos = at + pat.len();
    };
    let rest = &open_tag[at + pat.len()..];
    let value = match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let body = &rest[1..];
            &body[..body.find(q)?]
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    Some(normalize_entities(value))
}
