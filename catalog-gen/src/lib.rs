pub mod assets;
pub mod caption;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod style;

pub use assets::ImageAsset;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use generator::{CatalogJob, CatalogReport, CoverKind, ImageFailure};
