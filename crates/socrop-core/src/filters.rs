//! Filter presets.
//!
//! A preset is a named bundle of adjustment deltas plus a cosmetic overlay
//! tint. Applying a preset writes its deltas, scaled by the filter intensity,
//! into the state's adjustments.

use crate::adjustments::Adjustments;
use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Id of the preset that stands for "no filter".
pub const ORIGINAL_ID: &str = "original";
/// Category that lists every preset.
pub const ALL_CATEGORY: &str = "All";
/// Intensity a freshly selected filter is applied at.
pub const DEFAULT_INTENSITY: i32 = 100;

/// Browsing categories, in the order the filter strip shows them.
pub const CATEGORIES: &[&str] = &[
    ALL_CATEGORY,
    "Color",
    "Warm",
    "Cool",
    "Mono",
    "Film",
    "Vintage",
    "Soft",
    "Dark",
];

/// A named filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Translucent wash drawn over the preview.
    pub overlay_color: SerializableColor,
    /// Deltas at full intensity.
    pub adjustments: Adjustments,
}

impl FilterPreset {
    pub fn is_original(&self) -> bool {
        self.id == ORIGINAL_ID
    }

    /// The preset's deltas at `intensity` percent.
    pub fn adjustments_at(&self, intensity: i32) -> Adjustments {
        self.adjustments.scaled(intensity)
    }
}

/// An ordered collection of filter presets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCatalog {
    presets: Vec<FilterPreset>,
}

impl FilterCatalog {
    pub fn new(presets: Vec<FilterPreset>) -> Self {
        Self { presets }
    }

    /// The presets shipped with the editor.
    pub fn builtin() -> Self {
        let presets = BUILTIN
            .iter()
            .map(|def| FilterPreset {
                id: def.id.to_string(),
                name: def.name.to_string(),
                category: def.category.to_string(),
                overlay_color: match def.overlay {
                    Some(([r, g, b], alpha)) => SerializableColor::rgb(r, g, b).with_alpha(alpha),
                    None => SerializableColor::transparent(),
                },
                adjustments: def.adjustments,
            })
            .collect();
        Self { presets }
    }

    pub fn get(&self, id: &str) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn categories(&self) -> &'static [&'static str] {
        CATEGORIES
    }

    /// Presets shown under `category`. "Original" is listed everywhere.
    pub fn in_category(&self, category: &str) -> Vec<&FilterPreset> {
        if category == ALL_CATEGORY {
            return self.presets.iter().collect();
        }
        self.presets
            .iter()
            .filter(|p| p.is_original() || p.category == category)
            .collect()
    }
}

struct PresetDef {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    overlay: Option<([u8; 3], f64)>,
    adjustments: Adjustments,
}

const N: Adjustments = Adjustments::NEUTRAL;

const BUILTIN: &[PresetDef] = &[
    PresetDef {
        id: ORIGINAL_ID,
        name: "Original",
        category: "Basic",
        overlay: None,
        adjustments: N,
    },
    PresetDef {
        id: "vivid",
        name: "Vivid",
        category: "Color",
        overlay: Some(([255, 100, 50], 0.06)),
        adjustments: Adjustments { brightness: 5, contrast: 15, saturation: 35, exposure: 5, sharpness: 10, ..N },
    },
    PresetDef {
        id: "warm_glow",
        name: "Warm Glow",
        category: "Warm",
        overlay: Some(([255, 160, 50], 0.12)),
        adjustments: Adjustments { brightness: 8, contrast: 5, saturation: 10, warmth: 35, highlights: 15, exposure: 5, ..N },
    },
    PresetDef {
        id: "cool_breeze",
        name: "Cool",
        category: "Cool",
        overlay: Some(([50, 130, 255], 0.1)),
        adjustments: Adjustments { brightness: 3, contrast: 8, saturation: 5, warmth: -30, sharpness: 5, tint: -15, ..N },
    },
    PresetDef {
        id: "bw_classic",
        name: "B&W",
        category: "Mono",
        overlay: Some(([0, 0, 0], 0.05)),
        adjustments: Adjustments { saturation: -100, contrast: 20, sharpness: 15, highlights: 10, shadows: -10, ..N },
    },
    PresetDef {
        id: "cinematic",
        name: "Cinema",
        category: "Film",
        overlay: Some(([20, 30, 80], 0.15)),
        adjustments: Adjustments { brightness: -5, contrast: 25, saturation: -15, warmth: 10, shadows: -20, vignette: 30, tint: 10, ..N },
    },
    PresetDef {
        id: "moody",
        name: "Moody",
        category: "Dark",
        overlay: Some(([10, 10, 40], 0.18)),
        adjustments: Adjustments { brightness: -12, contrast: 22, saturation: -20, warmth: -8, shadows: -25, vignette: 40, fade: 5, ..N },
    },
    PresetDef {
        id: "retro",
        name: "Retro",
        category: "Vintage",
        overlay: Some(([200, 150, 80], 0.12)),
        adjustments: Adjustments { brightness: 5, contrast: -8, saturation: -25, warmth: 25, fade: 20, grain: 15, vignette: 20, ..N },
    },
    PresetDef {
        id: "golden_hour",
        name: "Golden",
        category: "Warm",
        overlay: Some(([255, 180, 30], 0.14)),
        adjustments: Adjustments { brightness: 10, contrast: 10, saturation: 15, warmth: 40, highlights: 20, exposure: 8, ..N },
    },
    PresetDef {
        id: "fade_out",
        name: "Fade",
        category: "Film",
        overlay: Some(([180, 180, 200], 0.08)),
        adjustments: Adjustments { brightness: 10, contrast: -15, saturation: -20, fade: 35, highlights: 20, shadows: 20, ..N },
    },
    PresetDef {
        id: "noir",
        name: "Noir",
        category: "Mono",
        overlay: Some(([0, 0, 0], 0.12)),
        adjustments: Adjustments { brightness: -8, contrast: 40, saturation: -100, sharpness: 20, shadows: -30, vignette: 45, ..N },
    },
    PresetDef {
        id: "pastel",
        name: "Pastel",
        category: "Soft",
        overlay: Some(([220, 200, 255], 0.1)),
        adjustments: Adjustments { brightness: 15, contrast: -12, saturation: -15, warmth: 8, fade: 15, highlights: 25, tint: 10, ..N },
    },
    PresetDef {
        id: "dramatic",
        name: "Drama",
        category: "Dark",
        overlay: Some(([30, 10, 50], 0.12)),
        adjustments: Adjustments { brightness: -5, contrast: 35, saturation: 10, warmth: -10, sharpness: 15, shadows: -25, vignette: 30, ..N },
    },
    PresetDef {
        id: "sunset",
        name: "Sunset",
        category: "Warm",
        overlay: Some(([255, 120, 40], 0.14)),
        adjustments: Adjustments { brightness: 5, contrast: 10, saturation: 25, warmth: 45, highlights: 15, vignette: 15, tint: 15, ..N },
    },
    PresetDef {
        id: "arctic",
        name: "Arctic",
        category: "Cool",
        overlay: Some(([100, 180, 255], 0.12)),
        adjustments: Adjustments { brightness: 10, contrast: 5, saturation: -15, warmth: -40, sharpness: 10, highlights: 20, tint: -20, ..N },
    },
    PresetDef {
        id: "chrome",
        name: "Chrome",
        category: "Color",
        overlay: Some(([200, 220, 255], 0.06)),
        adjustments: Adjustments { brightness: 5, contrast: 18, saturation: 8, sharpness: 25, highlights: 15, shadows: -10, exposure: 3, ..N },
    },
    PresetDef {
        id: "lomo",
        name: "Lomo",
        category: "Film",
        overlay: Some(([180, 100, 50], 0.1)),
        adjustments: Adjustments { contrast: 25, saturation: 30, warmth: 15, shadows: -15, vignette: 45, grain: 10, ..N },
    },
    PresetDef {
        id: "sepia",
        name: "Sepia",
        category: "Vintage",
        overlay: Some(([180, 130, 70], 0.18)),
        adjustments: Adjustments { brightness: 5, contrast: 5, saturation: -65, warmth: 40, fade: 10, vignette: 15, grain: 8, ..N },
    },
    PresetDef {
        id: "matte",
        name: "Matte",
        category: "Film",
        overlay: Some(([200, 200, 200], 0.06)),
        adjustments: Adjustments { brightness: 8, contrast: -8, saturation: -10, fade: 25, highlights: 15, shadows: 25, ..N },
    },
    PresetDef {
        id: "punch",
        name: "Punch",
        category: "Color",
        overlay: Some(([255, 50, 50], 0.04)),
        adjustments: Adjustments { contrast: 30, saturation: 40, sharpness: 15, highlights: 5, shadows: -15, exposure: 3, ..N },
    },
    PresetDef {
        id: "dreamy",
        name: "Dream",
        category: "Soft",
        overlay: Some(([255, 220, 255], 0.08)),
        adjustments: Adjustments { brightness: 12, contrast: -12, saturation: 5, warmth: 15, fade: 18, highlights: 25, tint: 15, ..N },
    },
    PresetDef {
        id: "urban",
        name: "Urban",
        category: "Dark",
        overlay: Some(([40, 40, 60], 0.1)),
        adjustments: Adjustments { brightness: -5, contrast: 18, saturation: -12, warmth: -5, sharpness: 12, vignette: 20, grain: 5, ..N },
    },
    PresetDef {
        id: "vintage",
        name: "Vintage",
        category: "Vintage",
        overlay: Some(([160, 120, 60], 0.14)),
        adjustments: Adjustments { brightness: 5, contrast: -8, saturation: -35, warmth: 30, fade: 20, vignette: 25, grain: 20, ..N },
    },
    PresetDef {
        id: "neon",
        name: "Neon",
        category: "Color",
        overlay: Some(([120, 0, 255], 0.08)),
        adjustments: Adjustments { contrast: 22, saturation: 45, warmth: -15, sharpness: 10, highlights: 10, tint: -25, exposure: 3, ..N },
    },
    PresetDef {
        id: "emerald",
        name: "Emerald",
        category: "Color",
        overlay: Some(([0, 200, 100], 0.08)),
        adjustments: Adjustments { brightness: 3, contrast: 10, saturation: 15, warmth: -10, tint: 20, highlights: 10, ..N },
    },
    PresetDef {
        id: "rose",
        name: "Rose",
        category: "Soft",
        overlay: Some(([255, 100, 150], 0.1)),
        adjustments: Adjustments { brightness: 8, contrast: -5, saturation: 5, warmth: 10, tint: 30, fade: 10, highlights: 15, ..N },
    },
    PresetDef {
        id: "midnight",
        name: "Midnight",
        category: "Dark",
        overlay: Some(([10, 10, 50], 0.2)),
        adjustments: Adjustments { brightness: -15, contrast: 20, saturation: -10, warmth: -20, shadows: -30, vignette: 50, tint: -10, ..N },
    },
    PresetDef {
        id: "sahara",
        name: "Sahara",
        category: "Warm",
        overlay: Some(([200, 150, 50], 0.12)),
        adjustments: Adjustments { brightness: 8, contrast: 8, saturation: -10, warmth: 35, grain: 10, fade: 8, vignette: 10, ..N },
    },
    PresetDef {
        id: "blueprint",
        name: "Blueprint",
        category: "Cool",
        overlay: Some(([0, 80, 200], 0.12)),
        adjustments: Adjustments { brightness: -3, contrast: 12, saturation: -20, warmth: -35, tint: -30, sharpness: 8, vignette: 15, ..N },
    },
    PresetDef {
        id: "portra",
        name: "Portra",
        category: "Film",
        overlay: Some(([220, 180, 140], 0.08)),
        adjustments: Adjustments { brightness: 5, contrast: -3, saturation: -5, warmth: 15, highlights: 10, shadows: 8, fade: 8, grain: 5, ..N },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog() {
        let catalog = FilterCatalog::builtin();
        assert_eq!(catalog.len(), 30);

        let ids: HashSet<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 30, "preset ids must be unique");

        let original = catalog.get(ORIGINAL_ID).unwrap();
        assert!(original.adjustments.is_neutral());
        assert!(original.overlay_color.is_transparent());
    }

    #[test]
    fn test_builtin_deltas_in_range() {
        for preset in FilterCatalog::builtin().iter() {
            assert!(
                preset.adjustments.out_of_range().is_empty(),
                "{} has out-of-range deltas",
                preset.id
            );
        }
    }

    #[test]
    fn test_overlay_alpha() {
        let catalog = FilterCatalog::builtin();
        let midnight = catalog.get("midnight").unwrap();
        assert_eq!(midnight.overlay_color, SerializableColor::new(10, 10, 50, 51));
    }

    #[test]
    fn test_categories() {
        let catalog = FilterCatalog::builtin();
        assert_eq!(catalog.categories()[0], ALL_CATEGORY);
        assert_eq!(catalog.in_category(ALL_CATEGORY).len(), 30);

        let mono = catalog.in_category("Mono");
        let ids: Vec<_> = mono.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["original", "bw_classic", "noir"]);

        // Every category still offers a way back to no filter.
        for category in catalog.categories() {
            assert!(catalog.in_category(category).iter().any(|p| p.is_original()));
        }
        assert_eq!(catalog.in_category("Nope").len(), 1);
    }

    #[test]
    fn test_adjustments_at() {
        let catalog = FilterCatalog::builtin();
        let vivid = catalog.get("vivid").unwrap();
        let half = vivid.adjustments_at(50);
        assert_eq!(half.contrast, 8);
        assert_eq!(half.saturation, 18);
        assert_eq!(half.brightness, 3);
        assert_eq!(vivid.adjustments_at(DEFAULT_INTENSITY), vivid.adjustments);
    }
}
