//! Characters grouped by stroke count, built once per render.

use crate::dictionary::StrokeCountIndex;

/// Highest configurable stroke count; the densest encoded Han characters stay below it.
pub const MAX_STROKE_COUNT: u32 = 64;

pub struct StrokeBucketCache {
    /// `buckets[s - 1]` holds every character with exactly `s` strokes, sorted.
    buckets: Vec<Vec<char>>,
}

impl StrokeBucketCache {
    /// Single pass over the index. Characters above `max_stroke_count` are left out.
    /// `max_stroke_count` is clamped to `[1, MAX_STROKE_COUNT]`.
    pub fn build(index: &StrokeCountIndex, max_stroke_count: u32) -> Self {
        let max = max_stroke_count.clamp(1, MAX_STROKE_COUNT) as usize;
        let mut buckets = vec![Vec::new(); max];
        for (ch, count) in index.iter() {
            if (1..=max).contains(&(count as usize)) {
                buckets[count as usize - 1].push(ch);
            }
        }
        // Sorted so a seeded generator picks the same characters on every run.
        for bucket in &mut buckets {
            bucket.sort_unstable();
        }
        Self { buckets }
    }

    pub fn max_stroke_count(&self) -> u32 {
        self.buckets.len() as u32
    }

    /// Bucket for `strokes`, clamped to `[1, max_stroke_count]`.
    pub fn bucket(&self, strokes: i32) -> &[char] {
        let idx = strokes.clamp(1, self.buckets.len() as i32) as usize - 1;
        &self.buckets[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[char]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
