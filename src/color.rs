use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Viridis-style palette
// ---------------------------------------------------------------------------

/// Anchor colours of the viridis colour map (dark purple → yellow).
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Sample `n` colours evenly along the viridis gradient.
pub fn viridis_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![viridis_at(0.5)],
        _ => (0..n).map(|i| viridis_at(i as f32 / (n - 1) as f32)).collect(),
    }
}

/// Colour at position `t` in `[0, 1]` on the gradient, mixed in linear RGB.
fn viridis_at(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let local = pos - idx as f32;

    let to_linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = to_linear(VIRIDIS[idx]).mix(to_linear(VIRIDIS[idx + 1]), local);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Category colours: label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (seasons, weather conditions) to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<&'static str, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Assign palette colours to labels in the order given.
    pub fn new(labels: &[&'static str]) -> Self {
        let mapping = labels
            .iter()
            .copied()
            .zip(viridis_palette(labels.len()))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_endpoints_match_viridis() {
        let colors = viridis_palette(5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Color32::from_rgb(68, 1, 84));
        assert_eq!(colors[4], Color32::from_rgb(253, 231, 37));
        assert!(viridis_palette(0).is_empty());
    }

    #[test]
    fn unknown_label_gets_default() {
        let colors = CategoryColors::new(&["Spring", "Summer"]);
        assert_ne!(colors.color_for("Spring"), colors.color_for("Summer"));
        assert_eq!(colors.color_for("Monsoon"), Color32::GRAY);
    }
}
