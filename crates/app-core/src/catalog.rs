//! Catalog data provider
//!
//! Screens never reach for global constants; they receive a
//! [`CatalogProvider`] and read products, seasons, posts and wrapped slides
//! through it. [`MockCatalog`] is the built-in provider with the demo content.

use crate::models::{
    is_hex_color, Author, BrandStat, ColorSeason, CommunityPost, GradientStops, Product,
    ProductId, ProductTag, SeasonName, StatEntry, StatIcon, WrappedSlide, PERCENT_MAX,
};
use thiserror::Error;

/// Catalog validation errors
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Match score above 100
    #[error("Product {id} has match score {score} (max 100)")]
    MatchScoreOutOfRange {
        /// Product ID
        id: ProductId,
        /// Offending score
        score: u8,
    },

    /// Duplicate product ID
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Palette entry that is not `#RRGGBB`
    #[error("Season {season} has invalid color {color:?}")]
    InvalidPaletteColor {
        /// Season
        season: SeasonName,
        /// Offending value
        color: String,
    },

    /// Tag placed outside the image
    #[error("Tag {name:?} on post {post} is outside the image ({x}, {y})")]
    TagOutOfBounds {
        /// Post ID
        post: u32,
        /// Tag name
        name: String,
        /// Horizontal position
        x: u8,
        /// Vertical position
        y: u8,
    },

    /// Wrapped slideshow without slides
    #[error("Wrapped slideshow is empty")]
    NoSlides,
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Source of all read-only content shown by the screens
pub trait CatalogProvider: Send + Sync {
    /// Products for the discover stack, in stack order
    fn products(&self) -> &[Product];

    /// All color seasons
    fn seasons(&self) -> &[ColorSeason];

    /// Community feed posts, newest first
    fn posts(&self) -> &[CommunityPost];

    /// Wrapped slides in presentation order
    fn wrapped_slides(&self) -> &[WrappedSlide];

    /// Look up a product by ID
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|p| p.id == id)
    }

    /// Look up a season by name
    fn season(&self, name: SeasonName) -> Option<&ColorSeason> {
        self.seasons().iter().find(|s| s.name == name)
    }
}

/// Check the invariants the screens rely on
pub fn validate(catalog: &dyn CatalogProvider) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for product in catalog.products() {
        if product.match_score > PERCENT_MAX {
            return Err(CatalogError::MatchScoreOutOfRange {
                id: product.id,
                score: product.match_score,
            });
        }
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }
    }

    for season in catalog.seasons() {
        if let Some(bad) = season.colors.iter().find(|c| !is_hex_color(c)) {
            return Err(CatalogError::InvalidPaletteColor {
                season: season.name,
                color: bad.clone(),
            });
        }
    }

    for post in catalog.posts() {
        for tag in &post.products {
            if tag.x > PERCENT_MAX || tag.y > PERCENT_MAX {
                return Err(CatalogError::TagOutOfBounds {
                    post: post.id,
                    name: tag.name.clone(),
                    x: tag.x,
                    y: tag.y,
                });
            }
        }
    }

    if catalog.wrapped_slides().is_empty() {
        return Err(CatalogError::NoSlides);
    }

    Ok(())
}

/// Built-in demo content
#[derive(Debug, Clone)]
pub struct MockCatalog {
    products: Vec<Product>,
    seasons: Vec<ColorSeason>,
    posts: Vec<CommunityPost>,
    slides: Vec<WrappedSlide>,
}

impl MockCatalog {
    /// Create the demo catalog
    pub fn new() -> Self {
        Self {
            products: mock_products(),
            seasons: mock_seasons(),
            posts: mock_posts(),
            slides: mock_slides(),
        }
    }

    /// Replace the product list (used to build custom stacks in tests and demos)
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for MockCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn seasons(&self) -> &[ColorSeason] {
        &self.seasons
    }

    fn posts(&self) -> &[CommunityPost] {
        &self.posts
    }

    fn wrapped_slides(&self) -> &[WrappedSlide] {
        &self.slides
    }
}

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=300";
const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn product(
    id: ProductId,
    brand: &str,
    price: &str,
    match_score: u8,
    title: &str,
    tags: &[&str],
    color: &str,
) -> Product {
    Product {
        id,
        image: PLACEHOLDER_IMAGE.to_string(),
        brand: brand.to_string(),
        price: price.to_string(),
        match_score,
        title: title.to_string(),
        tags: strings(tags),
        color: color.to_string(),
    }
}

fn mock_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Zara",
            "$89",
            95,
            "Autumn Knit Sweater",
            &["Casual", "Cotton", "Sustainable"],
            "Burnt Orange",
        ),
        product(
            2,
            "H&M",
            "$45",
            88,
            "Warm Tone Blazer",
            &["Work", "Polyester", "Classic"],
            "Deep Brown",
        ),
        product(
            3,
            "Uniqlo",
            "$65",
            92,
            "Cozy Cardigan",
            &["Comfort", "Wool", "Eco-friendly"],
            "Golden Yellow",
        ),
    ]
}

fn mock_seasons() -> Vec<ColorSeason> {
    vec![
        ColorSeason {
            name: SeasonName::AutumnWarm,
            colors: strings(&[
                "#8B4513", "#CD853F", "#D2691E", "#FF8C00", "#DAA520", "#B8860B", "#A0522D",
                "#8B0000",
            ]),
            description: "Rich, warm tones that complement your natural coloring.".to_string(),
        },
        ColorSeason {
            name: SeasonName::SpringBright,
            colors: strings(&[
                "#FF69B4", "#FF1493", "#00CED1", "#32CD32", "#FFD700", "#FF6347", "#9370DB",
                "#00FA9A",
            ]),
            description: "Vibrant, clear colors that enhance your natural glow.".to_string(),
        },
        ColorSeason {
            name: SeasonName::SummerCool,
            colors: strings(&[
                "#6495ED", "#DDA0DD", "#F0E68C", "#98FB98", "#FFB6C1", "#87CEEB", "#D8BFD8",
                "#B0E0E6",
            ]),
            description: "Soft, cool tones that harmonize with your complexion.".to_string(),
        },
        ColorSeason {
            name: SeasonName::WinterDeep,
            colors: strings(&[
                "#000080", "#8B008B", "#DC143C", "#228B22", "#FF1493", "#4B0082", "#B22222",
                "#2F4F4F",
            ]),
            description: "Bold, dramatic colors that make you shine.".to_string(),
        },
    ]
}

fn tag(name: &str, price: &str, x: u8, y: u8) -> ProductTag {
    ProductTag {
        name: name.to_string(),
        price: price.to_string(),
        x,
        y,
    }
}

fn mock_posts() -> Vec<CommunityPost> {
    vec![
        CommunityPost {
            id: 1,
            user: Author {
                name: "StyleQueen".to_string(),
                handle: "@stylequeen".to_string(),
                avatar: PLACEHOLDER_AVATAR.to_string(),
            },
            image: PLACEHOLDER_IMAGE.to_string(),
            caption: "Loving this autumn color palette! 🍂✨".to_string(),
            likes: 234,
            comments: 18,
            time_ago: "2h".to_string(),
            products: vec![
                tag("Zara Sweater", "$89", 30, 40),
                tag("H&M Jeans", "$45", 60, 70),
            ],
            earned: true,
        },
        CommunityPost {
            id: 2,
            user: Author {
                name: "FashionGuru".to_string(),
                handle: "@fashionguru".to_string(),
                avatar: PLACEHOLDER_AVATAR.to_string(),
            },
            image: PLACEHOLDER_IMAGE.to_string(),
            caption: "Perfect match for my color season! 💫".to_string(),
            likes: 189,
            comments: 12,
            time_ago: "4h".to_string(),
            products: vec![tag("Uniqlo Cardigan", "$65", 45, 35)],
            earned: false,
        },
    ]
}

fn mock_slides() -> Vec<WrappedSlide> {
    let brand = |name: &str, purchases: u32, logo: &str| BrandStat {
        name: name.to_string(),
        purchases,
        logo: logo.to_string(),
    };
    let stat = |label: &str, value: u32, icon: StatIcon| StatEntry {
        label: label.to_string(),
        value,
        icon,
    };

    vec![
        WrappedSlide::Cover {
            title: "Your 2025 Style Wrapped".to_string(),
            subtitle: "🎬 A year of amazing fashion discoveries".to_string(),
            background: GradientStops::new("purple-600", "pink-600", "red-600"),
        },
        WrappedSlide::Brands {
            title: "Your Top 3 Brands".to_string(),
            brands: vec![brand("Zara", 12, "Z"), brand("H&M", 8, "H"), brand("Uniqlo", 6, "U")],
            background: GradientStops::new("blue-600", "purple-600", "pink-600"),
        },
        WrappedSlide::Color {
            title: "Your Signature Color".to_string(),
            color: "#D2691E".to_string(),
            color_name: "Autumn Orange".to_string(),
            wears: 24,
            background: GradientStops::new("orange-600", "red-600", "pink-600"),
        },
        WrappedSlide::Stats {
            title: "Style Achievements".to_string(),
            stats: vec![
                stat("Virtual Try-Ons", 47, StatIcon::Zap),
                stat("Style Quests Completed", 12, StatIcon::Trophy),
                stat("Community Posts", 8, StatIcon::Palette),
            ],
            background: GradientStops::new("green-600", "blue-600", "purple-600"),
        },
        WrappedSlide::Share {
            title: "Share Your Style Journey".to_string(),
            subtitle: "Show off your amazing fashion year!".to_string(),
            background: GradientStops::new("pink-600", "purple-600", "indigo-600"),
        },
    ]
}
