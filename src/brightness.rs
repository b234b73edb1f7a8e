//! Pixel brightness and brightness → stroke count translation.

use serde::{Deserialize, Serialize};

/// Per-channel weights applied before averaging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelBias {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Default for ChannelBias {
    fn default() -> Self {
        Self { red: 1.0, green: 1.0, blue: 1.0 }
    }
}

impl ChannelBias {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub fn is_valid(&self) -> bool {
        [self.red, self.green, self.blue].iter().all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Weighted channel mean in `[0, 255]`, flipped when `inverted`.
pub fn brightness(rgb: [u8; 3], bias: ChannelBias, inverted: bool) -> u8 {
    let [r, g, b] = rgb.map(f64::from);
    let value = ((r * bias.red + g * bias.green + b * bias.blue) / 3.0).clamp(0.0, 255.0) as u8;
    if inverted {
        255 - value
    } else {
        value
    }
}

/// Darker pixels get denser glyphs: 0 → `max_stroke_count`, 255 → 1.
pub fn stroke_count(brightness: u8, max_stroke_count: u32) -> u32 {
    let max = u64::from(max_stroke_count.max(1));
    let drop = u64::from(brightness) * (max - 1) / 255;
    (max - drop).clamp(1, max) as u32
}

/// Index of the largest value; ties go to the lowest index. `None` when empty.
pub fn argmax<T: PartialOrd + Copy>(values: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_bias_is_plain_mean() {
        let bias = ChannelBias::default();
        assert_eq!(brightness([255, 255, 255], bias, false), 255);
        assert_eq!(brightness([0, 0, 0], bias, false), 0);
        assert_eq!(brightness([30, 60, 90], bias, false), 60);
    }

    #[test]
    fn bias_saturates_and_inverts() {
        let bias = ChannelBias::new(1.0, 1.0, 3.0);
        assert_eq!(brightness([200, 200, 200], bias, false), 255);
        assert_eq!(brightness([200, 200, 200], bias, true), 0);
        assert_eq!(brightness([10, 10, 10], ChannelBias::default(), true), 245);
    }

    #[test]
    fn rejects_negative_or_nan_bias() {
        assert!(ChannelBias::default().is_valid());
        assert!(!ChannelBias::new(-0.1, 1.0, 1.0).is_valid());
        assert!(!ChannelBias::new(1.0, f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn stroke_count_endpoints() {
        assert_eq!(stroke_count(0, 25), 25);
        assert_eq!(stroke_count(255, 25), 1);
        assert_eq!(stroke_count(0, 1), 1);
        assert_eq!(stroke_count(255, 1), 1);
    }

    #[test]
    fn stroke_count_handles_huge_max() {
        assert_eq!(stroke_count(255, 20_000_000), 1);
        assert_eq!(stroke_count(0, u32::MAX), u32::MAX);
        assert_eq!(stroke_count(255, u32::MAX), 1);
    }

    #[test]
    fn stroke_count_in_range_and_non_increasing() {
        for max in 1..=30 {
            let mut prev = u32::MAX;
            for b in 0..=255u8 {
                let s = stroke_count(b, max);
                assert!((1..=max).contains(&s));
                assert!(s <= prev, "b={b} max={max}");
                prev = s;
            }
        }
    }

    #[test]
    fn argmax_prefers_first() {
        assert_eq!(argmax(&[3u8, 9, 9, 1]), Some(1));
        assert_eq!(argmax(&[7u8, 7, 7, 7]), Some(0));
        assert_eq!(argmax(&[1u8, 2, 3, 4]), Some(3));
        assert_eq!(argmax::<u8>(&[]), None);
    }
}
