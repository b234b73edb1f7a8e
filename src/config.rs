//! Render configuration.

use crate::brightness::ChannelBias;
use crate::bucket::MAX_STROKE_COUNT;
use crate::{HanziError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// One glyph per pixel, matched on stroke count.
    #[default]
    Fast,
    /// One glyph per 2×2 block, matched on stroke count and heaviest corner.
    Complex,
}

impl FromStr for BuildMode {
    type Err = HanziError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" | "0" => Ok(Self::Fast),
            "complex" | "1" => Ok(Self::Complex),
            other => Err(HanziError::Config(format!("'{other}' is an invalid build mode"))),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fast => "fast",
            Self::Complex => "complex",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in glyphs.
    pub width: u32,
    /// 1-25 is sensible; higher gives more detail and slower selection.
    pub max_stroke_count: u32,
    pub bias: ChannelBias,
    pub inverted: bool,
    pub mode: BuildMode,
    /// Convert to grayscale after resizing.
    pub grayscale: bool,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
    /// Log a line per rendered row.
    pub progress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 30,
            max_stroke_count: 25,
            bias: ChannelBias::default(),
            inverted: false,
            mode: BuildMode::Fast,
            grayscale: true,
            seed: None,
            progress: false,
        }
    }
}

impl RenderConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(HanziError::Config("output width must be at least 1".into()));
        }
        if self.max_stroke_count == 0 {
            return Err(HanziError::Config("max stroke count must be at least 1".into()));
        }
        if self.max_stroke_count > MAX_STROKE_COUNT {
            return Err(HanziError::Config(format!(
                "max stroke count must be at most {MAX_STROKE_COUNT}, got {}",
                self.max_stroke_count
            )));
        }
        if !self.bias.is_valid() {
            return Err(HanziError::Config(format!(
                "channel bias must be finite and non-negative, got {:?}",
                self.bias
            )));
        }
        Ok(())
    }
}
