//! Colors and gradients for StyleAI
//!
//! Slide backgrounds and button fills are described with design token names
//! such as `"purple-600"`. This module resolves those names to hex colors so
//! a front-end can draw them without knowing the token table.
//!
//! # Usage
//!
//! ```rust
//! use app_core::models::GradientStops;
//! use app_ui::theme::Gradient;
//!
//! let stops = GradientStops::new("purple-600", "pink-600", "red-600");
//! let gradient = Gradient::from_tokens(&stops).unwrap();
//! assert_eq!(gradient.stops[0].color, "#9333EA");
//! ```

use app_core::models::GradientStops;
use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Relative luminance in 0..=1, used to pick swatch label colors
pub fn luminance(hex: &str) -> Option<f32> {
    let (r, g, b) = parse_hex_color(hex)?;
    Some((0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0)
}

// =============================================================================
// Brand Colors
// =============================================================================

/// StyleAI brand colors
pub mod brand {
    /// Primary pink
    pub const PINK: &str = "#EC4899";

    /// Primary purple
    pub const PURPLE: &str = "#A855F7";

    /// Accent cyan
    pub const CYAN: &str = "#06B6D4";

    /// Confirmation green
    pub const GREEN: &str = "#22C55E";

    /// Pure white
    pub const WHITE: &str = "#FFFFFF";

    /// Pure black
    pub const BLACK: &str = "#000000";
}

/// Resolve a design token name ("pink-600") to a hex color
pub fn token_color(token: &str) -> Option<&'static str> {
    let color = match token {
        "pink-500" => "#EC4899",
        "pink-600" => "#DB2777",
        "purple-500" => "#A855F7",
        "purple-600" => "#9333EA",
        "red-500" => "#EF4444",
        "red-600" => "#DC2626",
        "orange-500" => "#F97316",
        "orange-600" => "#EA580C",
        "blue-500" => "#3B82F6",
        "blue-600" => "#2563EB",
        "cyan-500" => "#06B6D4",
        "cyan-600" => "#0891B2",
        "green-500" => "#22C55E",
        "green-600" => "#16A34A",
        "emerald-500" => "#10B981",
        "indigo-600" => "#4F46E5",
        "rose-500" => "#F43F5E",
        _ => return None,
    };
    Some(color)
}

// =============================================================================
// Gradients
// =============================================================================

/// A gradient stop with position and color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position from 0.0 to 1.0
    pub position: f32,
    /// Color at this position
    pub color: Color,
}

/// A gradient definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Gradient stops
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create a new gradient with stops
    pub fn new(stops: Vec<(f32, &str)>) -> Self {
        Self {
            stops: stops
                .into_iter()
                .map(|(pos, color)| GradientStop {
                    position: pos,
                    color: color.to_string(),
                })
                .collect(),
        }
    }

    /// Resolve a three-stop token gradient
    ///
    /// Returns `None` if any token is unknown.
    pub fn from_tokens(stops: &GradientStops) -> Option<Self> {
        Some(Self::new(vec![
            (0.0, token_color(&stops.from)?),
            (0.5, token_color(&stops.via)?),
            (1.0, token_color(&stops.to)?),
        ]))
    }
}

/// Gradient presets used by the screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradients {
    /// Analyze button and header text
    pub primary: Gradient,
    /// Assistant suggestion and selected size
    pub assistant: Gradient,
    /// Add to cart and match badges
    pub confirm: Gradient,
    /// Season result badge
    pub season: Gradient,
}

impl Default for Gradients {
    fn default() -> Self {
        Self {
            primary: Gradient::new(vec![
                (0.0, "#EC4899"),
                (0.5, "#A855F7"),
                (1.0, "#06B6D4"),
            ]),
            assistant: Gradient::new(vec![(0.0, "#A855F7"), (1.0, "#EC4899")]),
            confirm: Gradient::new(vec![(0.0, "#22C55E"), (1.0, "#10B981")]),
            season: Gradient::new(vec![(0.0, "#F97316"), (1.0, "#EF4444")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::catalog::{CatalogProvider, MockCatalog};

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#D2691E"), Some((0xD2, 0x69, 0x1E)));
        assert_eq!(parse_hex_color("FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(0xD2, 0x69, 0x1E), "#D2691E");
    }

    #[test]
    fn test_luminance_orders_colors() {
        let white = luminance(brand::WHITE).unwrap();
        let black = luminance(brand::BLACK).unwrap();
        assert!((white - 1.0).abs() < 1e-6);
        assert_eq!(black, 0.0);
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(token_color("teal-900"), None);
        let stops = GradientStops::new("purple-600", "mystery", "red-600");
        assert!(Gradient::from_tokens(&stops).is_none());
    }

    #[test]
    fn test_every_slide_background_resolves() {
        let catalog = MockCatalog::new();
        for slide in catalog.wrapped_slides() {
            let gradient = Gradient::from_tokens(slide.background());
            assert!(gradient.is_some(), "unresolved background on {}", slide.kind());
            assert_eq!(gradient.unwrap().stops.len(), 3);
        }
    }

    #[test]
    fn test_preset_colors_are_hex() {
        let gradients = Gradients::default();
        for gradient in [
            &gradients.primary,
            &gradients.assistant,
            &gradients.confirm,
            &gradients.season,
        ] {
            for stop in &gradient.stops {
                assert!(parse_hex_color(&stop.color).is_some());
            }
        }
    }
}
