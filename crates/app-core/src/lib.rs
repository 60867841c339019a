//! Core data for StyleAI
//!
//! This crate holds the read-only data model, the catalog provider that
//! supplies it, local interaction state and application configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod interactions;
pub mod models;

pub use catalog::{CatalogError, CatalogProvider, MockCatalog};
pub use config::{AppConfig, ConfigError};
pub use interactions::LikeSet;
pub use models::{
    Author, BrandStat, ColorSeason, CommunityPost, GradientStops, PostId, Product, ProductId,
    ProductTag, SeasonName, StatEntry, StatIcon, WrappedSlide,
};
