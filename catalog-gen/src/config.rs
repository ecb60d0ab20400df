use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CatalogError;

/// Run settings. Every field has a default, so a missing `catalog.json`
/// or a partial one still produces the stock catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory scanned (non-recursively) for product photos.
    pub image_dir: PathBuf,
    pub output: PathBuf,
    /// File extension of product photos, without the dot.
    pub extension: String,
    /// File name of the cover image inside `image_dir`. Empty disables it.
    pub cover_image: String,
    pub cover_title: String,
    pub cover_subtitle: String,
    /// Second caption line under every product name.
    pub item_subtitle: String,
    pub compress: bool,
    pub metadata: Metadata,
    pub caption: CaptionConfig,
}

/// Document info dictionary entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
}

/// How a file stem becomes a display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Characters replaced by a space.
    pub separators: Vec<char>,
    /// Token replaced by `label` after separators are spaced out.
    pub placeholder: String,
    pub label: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            image_dir: PathBuf::from("images"),
            output: PathBuf::from("product-catalog.pdf"),
            extension: "jpeg".to_string(),
            cover_image: "Jigar Prajapati catalogue.png".to_string(),
            cover_title: "MOMAI TRADERS".to_string(),
            cover_subtitle: "Product Catalog 2025".to_string(),
            item_subtitle: "Housekeeping Product".to_string(),
            compress: true,
            metadata: Metadata::default(),
            caption: CaptionConfig::default(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            title: "Momai Traders - Product Catalog 2025".to_string(),
            author: "Momai Traders".to_string(),
            subject: "Wholesale Housekeeping & Hygiene Products Catalog".to_string(),
            keywords: "housekeeping, cleaning materials, hygiene products, wholesale".to_string(),
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        CaptionConfig {
            separators: vec!['-'],
            placeholder: "product ".to_string(),
            label: "Product #".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Looked up in the working directory by the binary.
    pub const FILE_NAME: &'static str = "catalog.json";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map_err(|source| CatalogError::Config {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn cover_path(&self) -> Option<PathBuf> {
        if self.cover_image.is_empty() {
            None
        } else {
            Some(self.image_dir.join(&self.cover_image))
        }
    }
}
