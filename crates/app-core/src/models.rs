//! Data model for the styling app
//!
//! Every record here is immutable mock content handed out by a
//! [`CatalogProvider`](crate::catalog::CatalogProvider). Screens only read
//! them; the only mutable state in the app is UI state owned by the screens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier
pub type ProductId = u32;

/// Community post identifier
pub type PostId = u32;

/// Upper bound for match scores and tag positions
pub const PERCENT_MAX: u8 = 100;

/// Check that a string is a `#RRGGBB` hex color
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

// =============================================================================
// Products
// =============================================================================

/// A product shown in the discover stack and the try-on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID
    pub id: ProductId,
    /// Image reference
    pub image: String,
    /// Brand name
    pub brand: String,
    /// Price as displayed ("$89")
    pub price: String,
    /// Display-only suitability score (0-100)
    pub match_score: u8,
    /// Product title
    pub title: String,
    /// Free-form tags ("Casual", "Cotton", ...)
    pub tags: Vec<String>,
    /// Color name or hex value
    pub color: String,
}

impl Product {
    /// Match score formatted for badges ("95%")
    pub fn match_label(&self) -> String {
        format!("{}%", self.match_score)
    }
}

// =============================================================================
// Color seasons
// =============================================================================

/// The fixed set of color seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonName {
    /// Autumn Warm
    #[serde(rename = "Autumn Warm")]
    AutumnWarm,
    /// Spring Bright
    #[serde(rename = "Spring Bright")]
    SpringBright,
    /// Summer Cool
    #[serde(rename = "Summer Cool")]
    SummerCool,
    /// Winter Deep
    #[serde(rename = "Winter Deep")]
    WinterDeep,
}

impl SeasonName {
    /// All seasons in display order
    pub fn all() -> [SeasonName; 4] {
        [
            SeasonName::AutumnWarm,
            SeasonName::SpringBright,
            SeasonName::SummerCool,
            SeasonName::WinterDeep,
        ]
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonName::AutumnWarm => "Autumn Warm",
            SeasonName::SpringBright => "Spring Bright",
            SeasonName::SummerCool => "Summer Cool",
            SeasonName::WinterDeep => "Winter Deep",
        }
    }
}

impl fmt::Display for SeasonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named palette assigned by the color analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSeason {
    /// Season name
    pub name: SeasonName,
    /// Ordered palette of `#RRGGBB` colors
    pub colors: Vec<String>,
    /// Short description shown with the result
    pub description: String,
}

// =============================================================================
// Community
// =============================================================================

/// Author of a community post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,
    /// Handle including the leading `@`
    pub handle: String,
    /// Avatar image reference
    pub avatar: String,
}

impl Author {
    /// First character of the name, used when the avatar is missing
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// A product pinned onto a post image
///
/// `x` and `y` are percentages of the image size, so overlays can be placed
/// independently of the rendered resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTag {
    /// Product name
    pub name: String,
    /// Price as displayed
    pub price: String,
    /// Horizontal position (0-100)
    pub x: u8,
    /// Vertical position (0-100)
    pub y: u8,
}

impl ProductTag {
    /// Tooltip label ("Zara Sweater - $89")
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.price)
    }
}

/// A post in the community feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    /// Post ID
    pub id: PostId,
    /// Author
    pub user: Author,
    /// Outfit image reference
    pub image: String,
    /// Caption text
    pub caption: String,
    /// Like count (excluding the local viewer)
    pub likes: u32,
    /// Comment count
    pub comments: u32,
    /// Relative age ("2h")
    pub time_ago: String,
    /// Products pinned onto the image
    pub products: Vec<ProductTag>,
    /// Whether the author earned affiliate credit from this post
    pub earned: bool,
}

// =============================================================================
// Wrapped
// =============================================================================

/// Three-stop background gradient using design token names ("purple-600")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStops {
    /// Start color token
    pub from: String,
    /// Middle color token
    pub via: String,
    /// End color token
    pub to: String,
}

impl GradientStops {
    /// Create gradient stops
    pub fn new(from: &str, via: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            via: via.to_string(),
            to: to.to_string(),
        }
    }
}

/// A brand entry on the top-brands slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandStat {
    /// Brand name
    pub name: String,
    /// Number of purchases
    pub purchases: u32,
    /// Single-letter logo
    pub logo: String,
}

/// Icon shown next to an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatIcon {
    /// Lightning bolt
    Zap,
    /// Trophy
    Trophy,
    /// Palette
    Palette,
}

/// An achievement on the stats slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: u32,
    /// Icon
    pub icon: StatIcon,
}

/// One slide of the year-in-review slideshow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WrappedSlide {
    /// Opening slide
    Cover {
        /// Title
        title: String,
        /// Subtitle
        subtitle: String,
        /// Background
        background: GradientStops,
    },
    /// Top brands, best first
    Brands {
        /// Title
        title: String,
        /// Brands in rank order
        brands: Vec<BrandStat>,
        /// Background
        background: GradientStops,
    },
    /// Most-worn color
    Color {
        /// Title
        title: String,
        /// Hex color
        color: String,
        /// Color name
        #[serde(rename = "colorName")]
        color_name: String,
        /// Times worn this year
        wears: u32,
        /// Background
        background: GradientStops,
    },
    /// Achievements
    Stats {
        /// Title
        title: String,
        /// Entries
        stats: Vec<StatEntry>,
        /// Background
        background: GradientStops,
    },
    /// Closing slide with the share action
    Share {
        /// Title
        title: String,
        /// Subtitle
        subtitle: String,
        /// Background
        background: GradientStops,
    },
}

impl WrappedSlide {
    /// Slide title
    pub fn title(&self) -> &str {
        match self {
            WrappedSlide::Cover { title, .. }
            | WrappedSlide::Brands { title, .. }
            | WrappedSlide::Color { title, .. }
            | WrappedSlide::Stats { title, .. }
            | WrappedSlide::Share { title, .. } => title,
        }
    }

    /// Slide background
    pub fn background(&self) -> &GradientStops {
        match self {
            WrappedSlide::Cover { background, .. }
            | WrappedSlide::Brands { background, .. }
            | WrappedSlide::Color { background, .. }
            | WrappedSlide::Stats { background, .. }
            | WrappedSlide::Share { background, .. } => background,
        }
    }

    /// Variant name as serialized in the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            WrappedSlide::Cover { .. } => "cover",
            WrappedSlide::Brands { .. } => "brands",
            WrappedSlide::Color { .. } => "color",
            WrappedSlide::Stats { .. } => "stats",
            WrappedSlide::Share { .. } => "share",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#8B4513"));
        assert!(is_hex_color("#abcdef"));
        assert!(!is_hex_color("8B4513"));
        assert!(!is_hex_color("#8B451"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color("Burnt Orange"));
    }

    #[test]
    fn test_season_name_serialization() {
        let json = serde_json::to_string(&SeasonName::AutumnWarm).unwrap();
        assert_eq!(json, "\"Autumn Warm\"");
        let parsed: SeasonName = serde_json::from_str("\"Winter Deep\"").unwrap();
        assert_eq!(parsed, SeasonName::WinterDeep);
        assert_eq!(SeasonName::SummerCool.to_string(), "Summer Cool");
    }

    #[test]
    fn test_product_tag_label() {
        let tag = ProductTag {
            name: "Zara Sweater".to_string(),
            price: "$89".to_string(),
            x: 30,
            y: 40,
        };
        assert_eq!(tag.label(), "Zara Sweater - $89");
    }

    #[test]
    fn test_wrapped_slide_tagging() {
        let slide = WrappedSlide::Color {
            title: "Your Signature Color".to_string(),
            color: "#D2691E".to_string(),
            color_name: "Autumn Orange".to_string(),
            wears: 24,
            background: GradientStops::new("orange-600", "red-600", "pink-600"),
        };
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value["type"], "color");
        assert_eq!(value["colorName"], "Autumn Orange");
        assert_eq!(slide.kind(), "color");
        assert_eq!(slide.background().from, "orange-600");
    }

    #[test]
    fn test_author_initial() {
        let author = Author {
            name: "StyleQueen".to_string(),
            handle: "@stylequeen".to_string(),
            avatar: String::new(),
        };
        assert_eq!(author.initial(), Some('S'));
    }
}
