use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category badge colours
// ---------------------------------------------------------------------------

/// Maps each category to a distinct badge colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    /// Build a colour map from the distinct categories.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let categories: Vec<&str> = categories.into_iter().collect();
        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
