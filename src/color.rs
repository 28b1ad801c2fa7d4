use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::data::model::PitchType;

/// Fallback for a selected pitch type the map does not know.
pub const DEFAULT_COLOR: Color32 = Color32::BLACK;

/// "Rest of Arsenal" density curves.
pub const REST_OF_ARSENAL_COLOR: Color32 = Color32::GRAY;

/// Opacity of movement-ellipse fills.
pub const ELLIPSE_FILL_ALPHA: f32 = 0.3;

// ---------------------------------------------------------------------------
// Fixed pitch-type palette
// ---------------------------------------------------------------------------

fn hex_for(pitch_type: PitchType) -> &'static str {
    match pitch_type {
        PitchType::Fastball | PitchType::FourSeam => "#ff007d",
        PitchType::Sinker => "#98165D",
        PitchType::Slider => "#67E18D",
        PitchType::Sweeper => "#1BB999",
        PitchType::Curveball => "#3025CE",
        PitchType::ChangeUp => "#F79E70",
        PitchType::Splitter => "#90EE32",
        PitchType::Cutter => "#BE5FA0",
        PitchType::Undefined => "#9C8975",
        PitchType::PitchOut => "#472C30",
    }
}

/// Parse `#rrggbb` / `#rgb` into a colour.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Same colour at the given opacity (0.0..=1.0).
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

// ---------------------------------------------------------------------------
// Colour mapping: pitch-type label → Color32
// ---------------------------------------------------------------------------

/// Maps known pitch types to their display colours.
#[derive(Debug, Clone)]
pub struct PitchColorMap {
    mapping: BTreeMap<PitchType, Color32>,
    default_color: Color32,
}

impl Default for PitchColorMap {
    fn default() -> Self {
        let mapping = PitchType::ALL
            .into_iter()
            .map(|pt| {
                let color = parse_hex(hex_for(pt)).unwrap_or_else(|| {
                    log::warn!("invalid colour {} for {pt}", hex_for(pt));
                    DEFAULT_COLOR
                });
                (pt, color)
            })
            .collect();

        PitchColorMap {
            mapping,
            default_color: DEFAULT_COLOR,
        }
    }
}

impl PitchColorMap {
    pub fn color_for(&self, pitch_type: PitchType) -> Color32 {
        self.mapping
            .get(&pitch_type)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour for a raw label; `None` for labels outside the map.
    pub fn lookup(&self, label: &str) -> Option<Color32> {
        PitchType::from_label(label).map(|pt| self.color_for(pt))
    }

    /// Colour for a raw label, falling back to the default colour.
    pub fn color_or_default(&self, label: &str) -> Color32 {
        self.lookup(label).unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_codes_parse() {
        assert_eq!(parse_hex("#ff007d"), Some(Color32::from_rgb(0xff, 0x00, 0x7d)));
        assert_eq!(parse_hex("#98165D"), Some(Color32::from_rgb(0x98, 0x16, 0x5d)));
        assert_eq!(parse_hex("not a colour"), None);
    }

    #[test]
    fn every_known_type_has_its_own_colour_except_four_seam() {
        let map = PitchColorMap::default();
        assert_eq!(
            map.color_for(PitchType::Fastball),
            map.color_for(PitchType::FourSeam)
        );
        assert_eq!(map.lookup("Slider"), Some(Color32::from_rgb(0x67, 0xe1, 0x8d)));
        assert_ne!(map.color_for(PitchType::Slider), map.color_for(PitchType::Sweeper));
    }

    #[test]
    fn unknown_labels_fall_back_only_where_asked() {
        let map = PitchColorMap::default();
        assert_eq!(map.lookup("Knuckleball"), None);
        assert_eq!(map.color_or_default("Knuckleball"), DEFAULT_COLOR);
        assert_eq!(
            map.color_or_default("Cutter"),
            Color32::from_rgb(0xbe, 0x5f, 0xa0)
        );
    }

    #[test]
    fn alpha_is_applied_without_touching_rgb() {
        let c = with_alpha(Color32::from_rgb(10, 20, 30), ELLIPSE_FILL_ALPHA);
        assert_eq!(c.a(), 77);
        let back = with_alpha(Color32::from_rgb(10, 20, 30), 1.0);
        assert_eq!(back, Color32::from_rgb(10, 20, 30));
    }
}
