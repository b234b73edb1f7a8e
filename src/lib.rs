//! Image to Han character art: each glyph's stroke count tracks the brightness it replaces.

pub mod brightness;
pub mod bucket;
pub mod config;
pub mod dictionary;
pub mod render;
pub mod selector;

pub use brightness::ChannelBias;
pub use bucket::StrokeBucketCache;
pub use config::{BuildMode, RenderConfig};
pub use dictionary::{CornerCodeIndex, StrokeCountIndex};
pub use selector::BLANK;

use rand::Rng;
use render::RenderLoop;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HanziError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Dictionary line {line}: {message}")]
    DataFormat { line: usize, message: String },
    #[error("Malformed four-corner code '{code}' for {ch}")]
    CornerCode { ch: char, code: String },
}

pub type Result<T> = std::result::Result<T, HanziError>;

/// Main converter: dictionaries plus the stroke buckets derived from them.
pub struct HanziArt {
    strokes: StrokeCountIndex,
    corners: CornerCodeIndex,
    cache: StrokeBucketCache,
    config: RenderConfig,
}

impl HanziArt {
    pub fn new(strokes: StrokeCountIndex, corners: CornerCodeIndex) -> Self {
        let config = RenderConfig::default();
        let cache = StrokeBucketCache::build(&strokes, config.max_stroke_count);
        Self { strokes, corners, cache, config }
    }

    /// Load both Unihan files: `kTotalStrokes` from the IRG sources,
    /// `kFourCornerCode` from the dictionary-like data.
    pub fn from_unihan(
        irg_sources_path: impl AsRef<std::path::Path>,
        dictionary_like_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let strokes = StrokeCountIndex::from_path(irg_sources_path)?;
        let corners = CornerCodeIndex::from_path(dictionary_like_path)?;
        log::info!("loaded {} stroke counts, {} corner codes", strokes.len(), corners.len());
        Ok(Self::new(strokes, corners))
    }

    /// Replace the whole configuration. Buckets are rebuilt when the max stroke count changes.
    pub fn with_config(mut self, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        if config.max_stroke_count != self.cache.max_stroke_count() {
            self.cache = StrokeBucketCache::build(&self.strokes, config.max_stroke_count);
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn with_max_stroke_count(mut self, max: u32) -> Self {
        self.config.max_stroke_count = max;
        if max >= 1 {
            self.cache = StrokeBucketCache::build(&self.strokes, max);
        }
        self
    }

    pub fn with_bias(mut self, bias: ChannelBias) -> Self {
        self.config.bias = bias;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.config.inverted = inverted;
        self
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn with_grayscale(mut self, enabled: bool) -> Self {
        self.config.grayscale = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.config.progress = enabled;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn buckets(&self) -> &StrokeBucketCache {
        &self.cache
    }

    /// Fails fast on an invalid configuration, or in complex mode on any corner
    /// code the selector could parse that does not. Bucket 1 is accepted without
    /// parsing, so its codes are not checked.
    fn check(&self) -> Result<()> {
        self.config.validate()?;
        if self.config.mode == BuildMode::Complex {
            for &ch in self.cache.iter().skip(1).flatten() {
                if let Some(code) = self.corners.get(ch) {
                    if code != selector::UNIVERSAL_CORNER_CODE {
                        selector::heaviest_corner(ch, code)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn looper(&self) -> RenderLoop<'_> {
        RenderLoop {
            cache: &self.cache,
            corners: &self.corners,
            bias: self.config.bias,
            inverted: self.config.inverted,
            progress: self.config.progress,
        }
    }

    /// Render an already-sized buffer: one glyph per pixel in fast mode,
    /// one per 2×2 block in complex mode. Each row ends with `'\n'`.
    pub fn render(&self, pixels: &image::RgbImage) -> Result<Vec<String>> {
        self.check()?;
        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::info!(
            "rendering {}x{} pixels in {} mode, {} glyphs in {} buckets",
            pixels.width(),
            pixels.height(),
            self.config.mode,
            self.cache.total(),
            self.cache.max_stroke_count()
        );
        match self.config.mode {
            BuildMode::Fast => Ok(self.looper().fast(pixels, seed)),
            BuildMode::Complex => self.looper().complex(pixels, seed),
        }
    }

    /// Resize `image` to the configured width and render it.
    pub fn convert(&self, image: &image::DynamicImage) -> Result<String> {
        self.check()?;
        let width = self.config.width;
        let pixels = match self.config.mode {
            BuildMode::Fast => render::prepare(image, width, 1, self.config.grayscale),
            BuildMode::Complex => render::prepare(image, width * 2, 2, self.config.grayscale),
        };
        Ok(self.render(&pixels)?.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn art() -> HanziArt {
        let strokes: StrokeCountIndex =
            [('一', 1), ('中', 4), ('\u{9EA4}', 25), ('\u{9F8F}', 25)].into_iter().collect();
        let corners: CornerCodeIndex =
            [('中', "5000.6"), ('\u{9EA4}', "7211.7")].into_iter().collect();
        HanziArt::new(strokes, corners).with_seed(5)
    }

    fn pixel(value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([value; 3])))
    }

    #[test]
    fn white_pixel_is_blank() {
        let out = art().with_width(1).convert(&pixel(255)).unwrap();
        assert_eq!(out, "\u{3000}\n");
    }

    #[test]
    fn black_pixel_is_densest() {
        let art = art().with_width(1);
        let out = art.convert(&pixel(0)).unwrap();
        // U+9F8F shares the bucket but carries an F digit.
        assert_eq!(out, "\u{9EA4}\n");
        let glyph = out.chars().next().unwrap();
        assert!(selector::is_displayable(glyph));
        assert_eq!(art.strokes.get(glyph), Some(25));
    }

    #[test]
    fn inverted_swaps_density() {
        let out = art().with_width(1).with_inverted(true).convert(&pixel(0)).unwrap();
        assert_eq!(out, "\u{3000}\n");
    }

    #[test]
    fn invalid_config_fails_before_render() {
        let err = art().with_width(0).convert(&pixel(0)).unwrap_err();
        assert!(matches!(err, HanziError::Config(_)));
        let err = art().with_max_stroke_count(0).convert(&pixel(0)).unwrap_err();
        assert!(matches!(err, HanziError::Config(_)));
    }

    #[test]
    fn max_stroke_count_rebuilds_buckets() {
        let art = art().with_max_stroke_count(4);
        assert_eq!(art.buckets().max_stroke_count(), 4);
        assert_eq!(art.buckets().bucket(4), &['中']);
        let art = art
            .with_config(RenderConfig { max_stroke_count: 25, ..RenderConfig::default() })
            .unwrap();
        assert_eq!(art.buckets().total(), 4);
    }

    #[test]
    fn complex_mode_checks_corner_codes_up_front() {
        let strokes: StrokeCountIndex = [('中', 4)].into_iter().collect();
        let corners: CornerCodeIndex = [('中', "oops")].into_iter().collect();
        let art = HanziArt::new(strokes, corners).with_mode(BuildMode::Complex);
        // Stroke count 25 never reaches 中, the corner check still rejects the dictionary.
        let err = art.convert(&pixel(0)).unwrap_err();
        assert!(matches!(err, HanziError::CornerCode { ch: '中', .. }));
    }

    #[test]
    fn complex_mode_ignores_single_stroke_corner_codes() {
        let strokes: StrokeCountIndex = [('一', 1), ('中', 4)].into_iter().collect();
        let corners: CornerCodeIndex = [('一', "bad"), ('中', "5000.6")].into_iter().collect();
        let art = HanziArt::new(strokes, corners).with_mode(BuildMode::Complex).with_seed(2);
        let out = art.with_width(1).convert(&pixel(255)).unwrap();
        assert_eq!(out, "一\n");
    }

    #[test]
    fn complex_mode_block_grid() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        let out = art().with_width(3).with_mode(BuildMode::Complex).convert(&img).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        // All sub-pixels equal: brightest index 0, and U+9EA4 (7211 → heaviest at 0) matches.
        assert!(rows.iter().all(|r| *r == "\u{9EA4}\u{9EA4}\u{9EA4}"));
    }
}
