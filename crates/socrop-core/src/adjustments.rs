//! Tonal and color adjustments.
//!
//! Every adjustment is an integer slider value. Signed adjustments range over
//! `-100..=100`, unsigned ones (vignette, grain, fade) over `0..=100`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Identifies one of the twelve adjustment sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKey {
    Brightness,
    Contrast,
    Saturation,
    Warmth,
    Sharpness,
    Highlights,
    Shadows,
    Vignette,
    Grain,
    Fade,
    Tint,
    Exposure,
}

impl AdjustmentKey {
    /// All keys, in storage order.
    pub const ALL: [AdjustmentKey; 12] = [
        AdjustmentKey::Brightness,
        AdjustmentKey::Contrast,
        AdjustmentKey::Saturation,
        AdjustmentKey::Warmth,
        AdjustmentKey::Sharpness,
        AdjustmentKey::Highlights,
        AdjustmentKey::Shadows,
        AdjustmentKey::Vignette,
        AdjustmentKey::Grain,
        AdjustmentKey::Fade,
        AdjustmentKey::Tint,
        AdjustmentKey::Exposure,
    ];

    /// All keys, in the order the adjustment panel lists its sliders.
    pub const SLIDER_ORDER: [AdjustmentKey; 12] = [
        AdjustmentKey::Exposure,
        AdjustmentKey::Brightness,
        AdjustmentKey::Contrast,
        AdjustmentKey::Saturation,
        AdjustmentKey::Warmth,
        AdjustmentKey::Tint,
        AdjustmentKey::Highlights,
        AdjustmentKey::Shadows,
        AdjustmentKey::Sharpness,
        AdjustmentKey::Vignette,
        AdjustmentKey::Grain,
        AdjustmentKey::Fade,
    ];

    /// Whether the slider is centered on zero (can go negative).
    pub fn is_signed(self) -> bool {
        !matches!(
            self,
            AdjustmentKey::Vignette | AdjustmentKey::Grain | AdjustmentKey::Fade
        )
    }

    pub fn min(self) -> i32 {
        if self.is_signed() { -100 } else { 0 }
    }

    pub fn max(self) -> i32 {
        100
    }

    pub fn range(self) -> RangeInclusive<i32> {
        self.min()..=self.max()
    }

    /// Slider granularity.
    pub fn step(self) -> i32 {
        1
    }

    pub fn contains(self, value: i32) -> bool {
        self.range().contains(&value)
    }

    /// Clamp a value into this key's valid range.
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min(), self.max())
    }

    /// Machine name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            AdjustmentKey::Brightness => "brightness",
            AdjustmentKey::Contrast => "contrast",
            AdjustmentKey::Saturation => "saturation",
            AdjustmentKey::Warmth => "warmth",
            AdjustmentKey::Sharpness => "sharpness",
            AdjustmentKey::Highlights => "highlights",
            AdjustmentKey::Shadows => "shadows",
            AdjustmentKey::Vignette => "vignette",
            AdjustmentKey::Grain => "grain",
            AdjustmentKey::Fade => "fade",
            AdjustmentKey::Tint => "tint",
            AdjustmentKey::Exposure => "exposure",
        }
    }

    /// Display name for UI.
    pub fn label(self) -> &'static str {
        match self {
            AdjustmentKey::Brightness => "Brightness",
            AdjustmentKey::Contrast => "Contrast",
            AdjustmentKey::Saturation => "Saturation",
            AdjustmentKey::Warmth => "Warmth",
            AdjustmentKey::Sharpness => "Sharpness",
            AdjustmentKey::Highlights => "Highlights",
            AdjustmentKey::Shadows => "Shadows",
            AdjustmentKey::Vignette => "Vignette",
            AdjustmentKey::Grain => "Grain",
            AdjustmentKey::Fade => "Fade",
            AdjustmentKey::Tint => "Tint",
            AdjustmentKey::Exposure => "Exposure",
        }
    }
}

impl fmt::Display for AdjustmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full set of adjustment values. Every key is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustments {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub warmth: i32,
    pub sharpness: i32,
    pub highlights: i32,
    pub shadows: i32,
    pub vignette: i32,
    pub grain: i32,
    pub fade: i32,
    pub tint: i32,
    pub exposure: i32,
}

impl Adjustments {
    /// All sliders at zero.
    pub const NEUTRAL: Adjustments = Adjustments {
        brightness: 0,
        contrast: 0,
        saturation: 0,
        warmth: 0,
        sharpness: 0,
        highlights: 0,
        shadows: 0,
        vignette: 0,
        grain: 0,
        fade: 0,
        tint: 0,
        exposure: 0,
    };

    pub fn get(&self, key: AdjustmentKey) -> i32 {
        match key {
            AdjustmentKey::Brightness => self.brightness,
            AdjustmentKey::Contrast => self.contrast,
            AdjustmentKey::Saturation => self.saturation,
            AdjustmentKey::Warmth => self.warmth,
            AdjustmentKey::Sharpness => self.sharpness,
            AdjustmentKey::Highlights => self.highlights,
            AdjustmentKey::Shadows => self.shadows,
            AdjustmentKey::Vignette => self.vignette,
            AdjustmentKey::Grain => self.grain,
            AdjustmentKey::Fade => self.fade,
            AdjustmentKey::Tint => self.tint,
            AdjustmentKey::Exposure => self.exposure,
        }
    }

    pub fn set(&mut self, key: AdjustmentKey, value: i32) {
        *self.slot_mut(key) = value;
    }

    fn slot_mut(&mut self, key: AdjustmentKey) -> &mut i32 {
        match key {
            AdjustmentKey::Brightness => &mut self.brightness,
            AdjustmentKey::Contrast => &mut self.contrast,
            AdjustmentKey::Saturation => &mut self.saturation,
            AdjustmentKey::Warmth => &mut self.warmth,
            AdjustmentKey::Sharpness => &mut self.sharpness,
            AdjustmentKey::Highlights => &mut self.highlights,
            AdjustmentKey::Shadows => &mut self.shadows,
            AdjustmentKey::Vignette => &mut self.vignette,
            AdjustmentKey::Grain => &mut self.grain,
            AdjustmentKey::Fade => &mut self.fade,
            AdjustmentKey::Tint => &mut self.tint,
            AdjustmentKey::Exposure => &mut self.exposure,
        }
    }

    /// Iterate `(key, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (AdjustmentKey, i32)> + '_ {
        AdjustmentKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Keys whose stored value lies outside the key's range.
    pub fn out_of_range(&self) -> Vec<AdjustmentKey> {
        self.iter()
            .filter(|(key, value)| !key.contains(*value))
            .map(|(key, _)| key)
            .collect()
    }

    /// Scale every value by `intensity` percent.
    ///
    /// Halves round toward positive infinity, so `-2.5` becomes `-2`.
    pub fn scaled(&self, intensity: i32) -> Adjustments {
        let factor = f64::from(intensity) / 100.0;
        let mut out = Adjustments::NEUTRAL;
        for (key, value) in self.iter() {
            out.set(key, round_half_up(f64::from(value) * factor));
        }
        out
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// How the store treats values handed to its setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentPolicy {
    /// Store exactly what the caller passes; sliders clamp before calling.
    #[default]
    Trust,
    /// Clamp adjustments and filter intensity into their ranges on write.
    Clamp,
}

impl AdjustmentPolicy {
    pub fn adjustment(self, key: AdjustmentKey, value: i32) -> i32 {
        match self {
            AdjustmentPolicy::Trust => value,
            AdjustmentPolicy::Clamp => key.clamp(value),
        }
    }

    pub fn intensity(self, value: i32) -> i32 {
        match self {
            AdjustmentPolicy::Trust => value,
            AdjustmentPolicy::Clamp => value.clamp(0, 100),
        }
    }
}
