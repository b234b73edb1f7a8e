//! Unihan dictionary tables: stroke counts and four-corner codes.

use crate::{HanziError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Unihan field holding the total stroke count (`Unihan_IRGSources.txt`).
pub const TOTAL_STROKES_FIELD: &str = "kTotalStrokes";
/// Unihan field holding the four-corner code (`Unihan_DictionaryLikeData.txt`).
pub const FOUR_CORNER_FIELD: &str = "kFourCornerCode";

/// Calls `f(line_no, char, value)` for every entry of `field` in a Unihan text file.
fn for_each_entry<R: BufRead>(
    reader: R,
    field: &str,
    mut f: impl FnMut(usize, char, &str) -> Result<()>,
) -> Result<()> {
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 3 || parts[1] != field {
            continue;
        }
        let ch = parse_code_point(parts[0]).ok_or_else(|| HanziError::DataFormat {
            line: i + 1,
            message: format!("invalid code point '{}'", parts[0]),
        })?;
        f(i + 1, ch, parts[2])?;
    }
    Ok(())
}

/// Parse a `U+4E2D` style key.
fn parse_code_point(key: &str) -> Option<char> {
    let hex = key.strip_prefix("U+")?;
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

/// Character → total stroke count.
#[derive(Debug, Clone, Default)]
pub struct StrokeCountIndex {
    counts: HashMap<char, u32>,
}

impl StrokeCountIndex {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut counts = HashMap::new();
        for_each_entry(reader, TOTAL_STROKES_FIELD, |line, ch, value| {
            // Some entries list alternative counts ("8 9"); the first is canonical.
            let first = value.split_whitespace().next().unwrap_or_default();
            let count = first.parse::<u32>().map_err(|_| HanziError::DataFormat {
                line,
                message: format!("invalid stroke count '{value}' for {ch}"),
            })?;
            counts.insert(ch, count);
            Ok(())
        })?;
        Ok(Self { counts })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn get(&self, ch: char) -> Option<u32> {
        self.counts.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

impl FromIterator<(char, u32)> for StrokeCountIndex {
    fn from_iter<I: IntoIterator<Item = (char, u32)>>(iter: I) -> Self {
        Self { counts: iter.into_iter().collect() }
    }
}

/// Character → raw four-corner code string, e.g. `"5000.6"` or `"4480.1 4490.6"`.
#[derive(Debug, Clone, Default)]
pub struct CornerCodeIndex {
    codes: HashMap<char, String>,
}

impl CornerCodeIndex {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut codes = HashMap::new();
        for_each_entry(reader, FOUR_CORNER_FIELD, |_, ch, value| {
            codes.insert(ch, value.to_string());
            Ok(())
        })?;
        Ok(Self { codes })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn get(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for CornerCodeIndex {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self { codes: iter.into_iter().map(|(c, s)| (c, s.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRG: &str = "# Unihan_IRGSources.txt\n\
        U+4E00\tkTotalStrokes\t1\n\
        U+4E2D\tkTotalStrokes\t4\n\
        U+4E2D\tkRSUnicode\t2.3\n\
        U+5341\tkTotalStrokes\t2 3\n\
        malformed line\n";

    #[test]
    fn stroke_index_reads_requested_field_only() {
        let index = StrokeCountIndex::from_reader(IRG.as_bytes()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get('一'), Some(1));
        assert_eq!(index.get('中'), Some(4));
        assert_eq!(index.get('十'), Some(2));
        assert_eq!(index.get('人'), None);
    }

    #[test]
    fn bad_stroke_count_reports_line() {
        let text = "U+4E00\tkTotalStrokes\t1\nU+4E01\tkTotalStrokes\tx\n";
        match StrokeCountIndex::from_reader(text.as_bytes()) {
            Err(HanziError::DataFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected data format error, got {other:?}"),
        }
    }

    #[test]
    fn bad_code_point_is_rejected() {
        let text = "U+ZZZZ\tkFourCornerCode\t1234.5\n";
        assert!(matches!(
            CornerCodeIndex::from_reader(text.as_bytes()),
            Err(HanziError::DataFormat { line: 1, .. })
        ));
    }

    #[test]
    fn corner_codes_keep_raw_value() {
        let text = "U+4E2D\tkFourCornerCode\t5000.6\nU+4E00\tkFourCornerCode\t1000.0 1010.0\n";
        let index = CornerCodeIndex::from_reader(text.as_bytes()).unwrap();
        assert_eq!(index.get('中'), Some("5000.6"));
        assert_eq!(index.get('一'), Some("1000.0 1010.0"));
    }
}
