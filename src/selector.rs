//! Glyph selection: random sampling without replacement from a stroke bucket.

use crate::bucket::StrokeBucketCache;
use crate::brightness::argmax;
use crate::dictionary::CornerCodeIndex;
use crate::{HanziError, Result};
use rand::Rng;

/// Ideographic space, returned whenever no candidate fits.
pub const BLANK: char = '\u{3000}';

/// Corner code of characters with no usable corner data.
pub const UNIVERSAL_CORNER_CODE: &str = "0000.0";

/// Code points with more than four hex digits or any `F` digit are skipped;
/// they are the ones most often missing from CJK fonts.
pub fn is_displayable(ch: char) -> bool {
    let hex = format!("{:X}", ch as u32);
    hex.len() <= 4 && !hex.contains('F')
}

/// Digits of the integer part of the leading corner code, most significant first.
///
/// `"1234.5"` → `[1, 2, 3, 4]`. Leading zeros vanish with the integer
/// conversion (`"0123.4"` → `[1, 2, 3]`); a zero integer part yields `[0]`.
pub fn corner_digits(code: &str) -> Option<Vec<u8>> {
    let lead = code.split_whitespace().next()?;
    let value: f64 = lead.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value >= 1e18 {
        return None;
    }
    let digits = (value.trunc() as u64).to_string().bytes().map(|b| b - b'0').collect();
    Some(digits)
}

/// Position of the heaviest corner, ties resolved to the lowest position.
pub fn heaviest_corner(ch: char, code: &str) -> Result<usize> {
    corner_digits(code)
        .and_then(|d| argmax(&d))
        .ok_or_else(|| HanziError::CornerCode { ch, code: code.to_string() })
}

/// Stroke count only.
pub fn select_fast<R: Rng + ?Sized>(cache: &StrokeBucketCache, strokes: i32, rng: &mut R) -> char {
    if strokes <= 1 {
        return BLANK;
    }
    let mut candidates = cache.bucket(strokes).to_vec();
    while !candidates.is_empty() {
        let i = rng.gen_range(0..candidates.len());
        let ch = candidates[i];
        if is_displayable(ch) {
            return ch;
        }
        candidates.swap_remove(i);
    }
    BLANK
}

/// Stroke count plus a match between the block's brightest sub-pixel and the
/// character's heaviest corner. Errors only on a malformed corner code.
pub fn select_complex<R: Rng + ?Sized>(
    cache: &StrokeBucketCache,
    corners: &CornerCodeIndex,
    strokes: i32,
    brightest: usize,
    rng: &mut R,
) -> Result<char> {
    if strokes < 1 {
        return Ok(BLANK);
    }
    let mut candidates = cache.bucket(strokes).to_vec();
    while !candidates.is_empty() {
        let i = rng.gen_range(0..candidates.len());
        let ch = candidates[i];
        let accept = match corners.get(ch) {
            None => false,
            Some(code) if code == UNIVERSAL_CORNER_CODE || strokes == 1 => is_displayable(ch),
            Some(code) => heaviest_corner(ch, code)? == brightest && is_displayable(ch),
        };
        if accept {
            return Ok(ch);
        }
        candidates.swap_remove(i);
    }
    Ok(BLANK)
}
