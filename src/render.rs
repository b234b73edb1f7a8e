//! Image preparation and the per-cell render loop.

use crate::brightness::{argmax, brightness, stroke_count, ChannelBias};
use crate::bucket::StrokeBucketCache;
use crate::dictionary::CornerCodeIndex;
use crate::selector::{select_complex, select_fast};
use crate::Result;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Resize to `width` pixels wide keeping the aspect ratio, at least `min_height` tall.
pub fn prepare(image: &DynamicImage, width: u32, min_height: u32, grayscale: bool) -> RgbImage {
    let (w, h) = (image.width().max(1) as u64, image.height() as u64);
    let height = (width as u64 * h / w).max(min_height as u64) as u32;
    let resized = image.resize_exact(width, height, FilterType::Triangle);
    if grayscale {
        resized.grayscale().to_rgb8()
    } else {
        resized.to_rgb8()
    }
}

/// Shared, read-only state for one render.
pub struct RenderLoop<'a> {
    pub cache: &'a StrokeBucketCache,
    pub corners: &'a CornerCodeIndex,
    pub bias: ChannelBias,
    pub inverted: bool,
    pub progress: bool,
}

impl RenderLoop<'_> {
    fn brightness_at(&self, img: &RgbImage, x: u32, y: u32) -> u8 {
        brightness(img.get_pixel(x, y).0, self.bias, self.inverted)
    }

    fn strokes(&self, brightness: u8) -> i32 {
        stroke_count(brightness, self.cache.max_stroke_count()) as i32
    }

    fn report(&self, row: u32, rows: u32) {
        if self.progress {
            log::debug!("building row {} of {}", row + 1, rows);
        }
    }

    /// One glyph per pixel. Row `y` draws from a generator seeded with `seed + y`.
    pub fn fast(&self, img: &RgbImage, seed: u64) -> Vec<String> {
        let (w, h) = img.dimensions();
        (0..h)
            .into_par_iter()
            .map(|y| {
                self.report(y, h);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(y as u64));
                let mut row: String = (0..w)
                    .map(|x| {
                        let strokes = self.strokes(self.brightness_at(img, x, y));
                        select_fast(self.cache, strokes, &mut rng)
                    })
                    .collect();
                row.push('\n');
                row
            })
            .collect()
    }

    /// One glyph per 2×2 block; a trailing odd row or column is dropped.
    pub fn complex(&self, img: &RgbImage, seed: u64) -> Result<Vec<String>> {
        let (cols, rows) = (img.width() / 2, img.height() / 2);
        (0..rows)
            .into_par_iter()
            .map(|cy| {
                self.report(cy, rows);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(cy as u64));
                let mut row = String::with_capacity(cols as usize * 3 + 1);
                for cx in 0..cols {
                    let (x, y) = (cx * 2, cy * 2);
                    let block = [
                        self.brightness_at(img, x, y),
                        self.brightness_at(img, x + 1, y),
                        self.brightness_at(img, x, y + 1),
                        self.brightness_at(img, x + 1, y + 1),
                    ];
                    let mean = (block.iter().map(|&b| u32::from(b)).sum::<u32>() / 4) as u8;
                    let brightest = argmax(&block).unwrap_or(0);
                    let strokes = self.strokes(mean);
                    row.push(select_complex(self.cache, self.corners, strokes, brightest, &mut rng)?);
                }
                row.push('\n');
                Ok(row)
            })
            .collect()
    }
}
