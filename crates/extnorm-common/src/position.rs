//! Byte offset to line/column conversion.
//!
//! The tree records byte offsets; diagnostics are rendered with 1-based
//! line and column numbers.

use serde::Serialize;

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column, counted in chars
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for efficient offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            } else if b == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
                // Lone \r (old Mac); \r\n is handled by the \n
                line_starts.push((i + 1) as u32);
            }
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let character = source
            .get(start..clamped_end)
            .map_or(0, |slice| slice.chars().count() as u32);

        Position {
            line: line as u32,
            character,
        }
    }

    /// Text of the 0-indexed line, without its terminator.
    pub fn line_text<'a>(&self, line: u32, source: &'a str) -> Option<&'a str> {
        let start = *self.line_starts.get(line as usize)? as usize;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(source.len(), |&next| next as usize);
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_position() {
        let source = "var a;\nExt.define();\n";
        let map = LineMap::build(source);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
        assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(11, source), Position::new(1, 4));
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "a\r\nb\rc";
        let map = LineMap::build(source);
        assert_eq!(map.offset_to_position(3, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(5, source), Position::new(2, 0));
        assert_eq!(map.line_text(0, source), Some("a"));
        assert_eq!(map.line_text(1, source), Some("b"));
        assert_eq!(map.line_text(2, source), Some("c"));
    }
}
