use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::ordering::FilterGroup;

// ---------------------------------------------------------------------------
// Group accents: one hue per filter group
// ---------------------------------------------------------------------------

// Hue step between consecutive groups (golden angle).
const GOLDEN_ANGLE: f32 = 137.508;
const ACCENT_SATURATION: f32 = 0.85;
const ACCENT_LIGHTNESS: f32 = 0.5;

/// Accent colour for the `index`-th filter group. Depends on `index` only,
/// so appending groups never recolours existing ones.
pub fn group_accent(index: usize) -> Color32 {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    let rgb: Srgb = Hsl::new(hue, ACCENT_SATURATION, ACCENT_LIGHTNESS).into_color();
    let [r, g, b] = [rgb.red, rgb.green, rgb.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// Accent colour for each filter group, used for hover highlights.
#[derive(Debug, Clone, Default)]
pub struct GroupColors {
    colors: Vec<Color32>,
}

impl GroupColors {
    pub fn new(groups: &[FilterGroup]) -> Self {
        GroupColors {
            colors: (0..groups.len()).map(group_accent).collect(),
        }
    }

    /// Colour of the group at `index`; grey when out of range.
    pub fn color_for(&self, index: usize) -> Color32 {
        self.colors.get(index).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_distinct_and_stable() {
        let accents: Vec<Color32> = (0..6).map(group_accent).collect();
        for i in 0..accents.len() {
            for j in (i + 1)..accents.len() {
                assert_ne!(accents[i], accents[j]);
            }
        }
        // Adding groups leaves the existing accents untouched.
        let three = GroupColors::new(&vec![FilterGroup { name: String::new(), keys: Vec::new() }; 3]);
        for i in 0..3 {
            assert_eq!(three.color_for(i), accents[i]);
        }
    }

    #[test]
    fn test_group_colors_fallback() {
        let groups = vec![
            FilterGroup { name: "A".into(), keys: Vec::new() },
            FilterGroup { name: "B".into(), keys: Vec::new() },
        ];
        let colors = GroupColors::new(&groups);
        assert_ne!(colors.color_for(0), colors.color_for(1));
        assert_eq!(colors.color_for(5), Color32::GRAY);
    }
}
