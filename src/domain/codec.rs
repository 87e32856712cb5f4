//! Decoder/encoder for the two textual pattern interchange formats:
//! run-length encoding (`.rle`) and the plain-cell format (`.cells`).
//!
//! Both are line-oriented. Decoding normalizes alive cells to their
//! bounding box so `decode(encode(p))` reproduces `p` structurally; a
//! zero-population pattern decodes only when the text carries explicit
//! dimensions (an RLE header, or a block of `.` rows).

use std::path::Path;

use thiserror::Error;

use super::Pattern;

/// Recognized pattern file formats
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PatternFormat {
    /// Run-length encoded, `.rle`
    Rle,
    /// One character per cell, `.cells`
    PlainCells,
}

impl PatternFormat {
    /// Detect the format from a file extension, case-insensitive
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "rle" => Some(PatternFormat::Rle),
            "cells" => Some(PatternFormat::PlainCells),
            _ => None,
        }
    }
}

/// Malformed pattern text. Always attributable to one line of the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

fn parse_err(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError {
        line,
        reason: reason.into(),
    }
}

/// Decode pattern text in the given format
pub fn decode(text: &str, format: PatternFormat) -> Result<Pattern, ParseError> {
    match format {
        PatternFormat::Rle => decode_rle(text),
        PatternFormat::PlainCells => decode_cells(text),
    }
}

/// Encode a pattern in the given format
pub fn encode(pattern: &Pattern, format: PatternFormat) -> String {
    match format {
        PatternFormat::Rle => encode_rle(pattern),
        PatternFormat::PlainCells => encode_cells(pattern),
    }
}

#[derive(Default)]
struct Metadata {
    name: String,
    author: String,
    comment: String,
    rule: Option<String>,
}

impl Metadata {
    fn push_comment(&mut self, text: &str) {
        if !self.comment.is_empty() {
            self.comment.push(' ');
        }
        self.comment.push_str(text);
    }
}

/// Shift alive cells so their bounding box starts at (0, 0) and build the
/// pattern around them.
fn normalized(cells: Vec<(usize, usize)>, meta: Metadata) -> Pattern {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let shifted = cells
        .into_iter()
        .map(|(x, y)| (x - min_x, y - min_y))
        .collect();
    let mut pattern = Pattern::new(meta.name, shifted);
    pattern.author = meta.author;
    pattern.comment = meta.comment;
    pattern.rule = meta.rule;
    pattern
}

/// Parse the `x = W, y = H[, rule = ...]` RLE header line
fn parse_rle_header(line: &str, line_no: usize) -> Result<(usize, usize, Option<String>), ParseError> {
    let mut width = None;
    let mut height = None;
    let mut rule = None;
    for part in line.split(',') {
        let Some((key, value)) = part.split_once('=') else {
            return Err(parse_err(line_no, format!("malformed header entry {:?}", part.trim())));
        };
        let value = value.trim();
        match key.trim() {
            "x" => {
                width = Some(value.parse::<usize>().map_err(|_| {
                    parse_err(line_no, format!("header width {value:?} is not a number"))
                })?);
            }
            "y" => {
                height = Some(value.parse::<usize>().map_err(|_| {
                    parse_err(line_no, format!("header height {value:?} is not a number"))
                })?);
            }
            "rule" => rule = Some(value.to_string()),
            other => {
                return Err(parse_err(line_no, format!("unknown header key {other:?}")));
            }
        }
    }
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h, rule)),
        _ => Err(parse_err(line_no, "header is missing x or y")),
    }
}

fn decode_rle(text: &str) -> Result<Pattern, ParseError> {
    let mut meta = Metadata::default();
    let mut dims: Option<(usize, usize)> = None;
    let mut cells: Vec<(usize, usize)> = Vec::new();
    let (mut x, mut y) = (0usize, 0usize);
    let mut run: Option<usize> = None;
    let mut terminated = false;
    let mut last_content_line = 1;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        // Header comments carry metadata on recognized sub-tags
        if let Some(tagged) = line.strip_prefix('#') {
            let body = tagged.get(1..).unwrap_or("").trim();
            match tagged.chars().next() {
                Some('N') => meta.name = body.to_string(),
                Some('O') => meta.author = body.to_string(),
                Some('C') | Some('c') => meta.push_comment(body),
                Some('r') => meta.rule = Some(body.to_string()),
                _ => {} // other sub-tags are not ours to reject
            }
            continue;
        }

        if dims.is_none() && cells.is_empty() && x == 0 && y == 0 && run.is_none() {
            // The first non-comment line may be the dimension header
            if line.trim_start().starts_with('x') {
                let (w, h, rule) = parse_rle_header(line, line_no)?;
                dims = Some((w, h));
                if rule.is_some() {
                    meta.rule = rule;
                }
                last_content_line = line_no;
                continue;
            }
        }

        last_content_line = line_no;
        for c in line.chars() {
            if terminated {
                break;
            }
            match c {
                '0'..='9' => {
                    let digit = c as usize - '0' as usize;
                    let next = run
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or_else(|| parse_err(line_no, "run count overflow"))?;
                    run = Some(next);
                }
                'b' => {
                    x += run.take().unwrap_or(1);
                }
                'o' => {
                    let count = run.take().unwrap_or(1);
                    if let Some((w, h)) = dims {
                        if x + count > w || y >= h {
                            return Err(parse_err(
                                line_no,
                                format!("cell run at ({x}, {y}) exceeds declared {w}x{h} bounds"),
                            ));
                        }
                    }
                    for i in 0..count {
                        cells.push((x + i, y));
                    }
                    x += count;
                }
                '$' => {
                    y += run.take().unwrap_or(1);
                    x = 0;
                }
                '!' => {
                    if run.take().is_some() {
                        return Err(parse_err(line_no, "dangling run count before '!'"));
                    }
                    terminated = true;
                }
                ' ' | '\t' => {}
                other => {
                    return Err(parse_err(line_no, format!("unrecognized tag character {other:?}")));
                }
            }
        }
        if terminated {
            break;
        }
    }

    if !terminated {
        return Err(parse_err(last_content_line, "missing '!' terminator"));
    }
    if cells.is_empty() {
        let Some((w, h)) = dims else {
            return Err(parse_err(
                last_content_line,
                "empty pattern without explicit dimensions",
            ));
        };
        let mut pattern = normalized(cells, meta);
        pattern.width = w;
        pattern.height = h;
        return Ok(pattern);
    }
    Ok(normalized(cells, meta))
}

fn decode_cells(text: &str) -> Result<Pattern, ParseError> {
    let mut meta = Metadata::default();
    let mut rows: Vec<(usize, &str)> = Vec::new(); // (line_no, content)

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r').trim_end();
        if let Some(comment) = line.strip_prefix('!') {
            let comment = comment.trim();
            if let Some(name) = strip_prefix_ci(comment, "Name:") {
                meta.name = name.trim().to_string();
            } else if let Some(author) = strip_prefix_ci(comment, "Author:") {
                meta.author = author.trim().to_string();
            } else if !comment.is_empty() {
                meta.push_comment(comment);
            }
        } else if !line.is_empty() {
            rows.push((line_no, line));
        }
    }

    let Some(&(first_line, first_row)) = rows.first() else {
        let line = text.lines().count().max(1);
        return Err(parse_err(line, "pattern has no cell rows"));
    };
    let width = first_row.chars().count();

    let mut cells = Vec::new();
    for (row_idx, &(line_no, row)) in rows.iter().enumerate() {
        let row_len = row.chars().count();
        if row_len != width {
            return Err(parse_err(
                line_no,
                format!(
                    "row is {row_len} cells wide, expected {width} (as on line {first_line})"
                ),
            ));
        }
        for (col, c) in row.chars().enumerate() {
            match c {
                '.' => {}
                'O' | '*' => cells.push((col, row_idx)),
                other => {
                    return Err(parse_err(line_no, format!("unrecognized cell character {other:?}")));
                }
            }
        }
    }

    if cells.is_empty() {
        // All-dead rows still give explicit dimensions
        let mut pattern = normalized(cells, meta);
        pattern.width = width;
        pattern.height = rows.len();
        return Ok(pattern);
    }
    Ok(normalized(cells, meta))
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

const RLE_LINE_WIDTH: usize = 70;

fn encode_rle(pattern: &Pattern) -> String {
    let mut out = String::new();
    if !pattern.name.is_empty() {
        out.push_str(&format!("#N {}\n", pattern.name));
    }
    if !pattern.author.is_empty() {
        out.push_str(&format!("#O {}\n", pattern.author));
    }
    for chunk in wrap_words(&pattern.comment, RLE_LINE_WIDTH - 3) {
        out.push_str(&format!("#C {chunk}\n"));
    }
    out.push_str(&format!("x = {}, y = {}", pattern.width, pattern.height));
    if let Some(rule) = &pattern.rule {
        out.push_str(&format!(", rule = {rule}"));
    }
    out.push('\n');

    let alive: std::collections::HashSet<(usize, usize)> = pattern.cells.iter().copied().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut blank_rows = 0usize;
    for y in 0..pattern.height {
        let mut row_tokens: Vec<String> = Vec::new();
        let mut x = 0;
        while x < pattern.width {
            let state = alive.contains(&(x, y));
            let mut end = x + 1;
            while end < pattern.width && alive.contains(&(end, y)) == state {
                end += 1;
            }
            let count = end - x;
            // Trailing dead cells in a row are implied
            if !(end == pattern.width && !state) {
                row_tokens.push(run_token(count, if state { 'o' } else { 'b' }));
            }
            x = end;
        }
        if row_tokens.is_empty() {
            blank_rows += 1;
            continue;
        }
        if y > 0 {
            tokens.push(run_token(blank_rows + 1, '$'));
        }
        blank_rows = 0;
        tokens.append(&mut row_tokens);
    }
    tokens.push("!".to_string());

    // Fold the run tokens into lines of bounded width
    let mut line_len = 0;
    for (i, token) in tokens.iter().enumerate() {
        if line_len + token.len() > RLE_LINE_WIDTH && line_len > 0 {
            out.push('\n');
            line_len = 0;
        }
        out.push_str(token);
        line_len += token.len();
        if i == tokens.len() - 1 {
            out.push('\n');
        }
    }
    out
}

fn run_token(count: usize, tag: char) -> String {
    if count > 1 {
        format!("{count}{tag}")
    } else {
        tag.to_string()
    }
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn encode_cells(pattern: &Pattern) -> String {
    let mut out = String::new();
    if !pattern.name.is_empty() {
        out.push_str(&format!("!Name: {}\n", pattern.name));
    }
    if !pattern.author.is_empty() {
        out.push_str(&format!("!Author: {}\n", pattern.author));
    }
    for line in pattern.comment.lines() {
        out.push_str(&format!("!{line}\n"));
    }

    let alive: std::collections::HashSet<(usize, usize)> = pattern.cells.iter().copied().collect();
    for y in 0..pattern.height {
        for x in 0..pattern.width {
            out.push(if alive.contains(&(x, y)) { 'O' } else { '.' });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pattern::presets;

    #[test]
    fn test_decode_rle_glider() {
        let text = "#N Glider\n#C The smallest spaceship\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";
        let p = decode(text, PatternFormat::Rle).unwrap();
        assert_eq!(p.name, "Glider");
        assert_eq!(p.comment, "The smallest spaceship");
        assert_eq!(p.rule.as_deref(), Some("B3/S23"));
        assert_eq!((p.width, p.height), (3, 3));
        assert_eq!(p.cells, vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_decode_rle_counted_blank_rows() {
        // Two cells separated by three empty rows
        let p = decode("x = 1, y = 5\no4$o!", PatternFormat::Rle).unwrap();
        assert_eq!((p.width, p.height), (1, 5));
        assert_eq!(p.cells, vec![(0, 0), (0, 4)]);
    }

    #[test]
    fn test_decode_rle_trims_margin() {
        // Alive cells offset inside the declared box normalize to (0,0)
        let p = decode("x = 5, y = 5\n$2b2o$2b2o!", PatternFormat::Rle).unwrap();
        assert_eq!((p.width, p.height), (2, 2));
        assert_eq!(p.cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_decode_rle_without_header() {
        let p = decode("3o!", PatternFormat::Rle).unwrap();
        assert_eq!((p.width, p.height), (3, 1));
    }

    #[test]
    fn test_decode_rle_missing_terminator_cites_last_line() {
        let err = decode("x = 3, y = 1\n3o", PatternFormat::Rle).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains('!'), "reason was {:?}", err.reason);
    }

    #[test]
    fn test_decode_rle_rejects_unknown_tag() {
        let err = decode("x = 2, y = 1\noz!", PatternFormat::Rle).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("'z'"));
    }

    #[test]
    fn test_decode_rle_rejects_bad_header() {
        assert!(decode("x = two, y = 1\no!", PatternFormat::Rle).is_err());
        assert!(decode("x = 2\no!", PatternFormat::Rle).is_err());
    }

    #[test]
    fn test_decode_rle_rejects_run_past_declared_width() {
        let err = decode("x = 2, y = 1\n3o!", PatternFormat::Rle).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_empty_rle_needs_explicit_dimensions() {
        let p = decode("x = 4, y = 2\n!", PatternFormat::Rle).unwrap();
        assert_eq!((p.width, p.height), (4, 2));
        assert!(p.is_empty());

        assert!(decode("!", PatternFormat::Rle).is_err());
    }

    #[test]
    fn test_decode_cells_basic() {
        let text = "!Name: Tub\n!A small still life\n.O.\nO.O\n.O.\n";
        let p = decode(text, PatternFormat::PlainCells).unwrap();
        assert_eq!(p.name, "Tub");
        assert_eq!(p.comment, "A small still life");
        assert_eq!((p.width, p.height), (3, 3));
        assert_eq!(p.cells, presets::tub().cells);
    }

    #[test]
    fn test_decode_cells_accepts_star_marker() {
        let p = decode("*.\n.*\n", PatternFormat::PlainCells).unwrap();
        assert_eq!(p.cells, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_decode_cells_rejects_ragged_rows() {
        let err = decode("OO\nO\n", PatternFormat::PlainCells).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("wide"));
    }

    #[test]
    fn test_decode_cells_rejects_unknown_marker() {
        let err = decode("O#\n", PatternFormat::PlainCells).unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_decode_cells_all_dead_keeps_block_dimensions() {
        let p = decode("...\n...\n", PatternFormat::PlainCells).unwrap();
        assert_eq!((p.width, p.height), (3, 2));
        assert!(p.is_empty());

        assert!(decode("!just a comment\n", PatternFormat::PlainCells).is_err());
    }

    #[test]
    fn test_roundtrip_all_presets_both_formats() {
        for p in presets::all_patterns() {
            for format in [PatternFormat::Rle, PatternFormat::PlainCells] {
                let text = encode(&p, format);
                let decoded = decode(&text, format).unwrap_or_else(|e| {
                    panic!("{} failed to re-decode as {format:?}: {e}", p.name)
                });
                assert_eq!(decoded, p, "{} did not round-trip via {format:?}", p.name);
            }
        }
    }

    #[test]
    fn test_roundtrip_preserves_rule_specifier() {
        let mut p = presets::blinker();
        p.rule = Some("B36/S23".to_string());
        let decoded = decode(&encode(&p, PatternFormat::Rle), PatternFormat::Rle).unwrap();
        assert_eq!(decoded.rule.as_deref(), Some("B36/S23"));
    }

    #[test]
    fn test_encode_rle_coalesces_blank_rows() {
        let p = decode("x = 1, y = 5\no4$o!", PatternFormat::Rle).unwrap();
        let text = encode(&p, PatternFormat::Rle);
        assert!(text.contains("o4$o!"), "encoded as {text:?}");
    }

    #[test]
    fn test_encode_rle_wraps_long_lines() {
        let cells = (0..200).map(|i| (i * 2, 0)).collect();
        let p = Pattern::new("stripes", cells);
        let text = encode(&p, PatternFormat::Rle);
        for line in text.lines() {
            assert!(line.len() <= RLE_LINE_WIDTH + 4, "line too long: {line:?}");
        }
        let decoded = decode(&text, PatternFormat::Rle).unwrap();
        assert_eq!(decoded.cells, p.cells);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            PatternFormat::from_path(Path::new("gun.rle")),
            Some(PatternFormat::Rle)
        );
        assert_eq!(
            PatternFormat::from_path(Path::new("a/b/ship.CELLS")),
            Some(PatternFormat::PlainCells)
        );
        assert_eq!(PatternFormat::from_path(Path::new("notes.txt")), None);
    }
}
