use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::caption::display_name;
use crate::config::CaptionConfig;

/// One product photo on disk. Pixel dimensions are not read here;
/// the PDF engine reads them when the image is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    path: PathBuf,
}

impl ImageAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ImageAsset { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn caption(&self, rules: &CaptionConfig) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        display_name(&stem, rules)
    }
}

/// List the files directly inside `dir` whose extension matches
/// `extension` (ASCII case-insensitive), sorted by file name.
///
/// `exclude` is a path to leave out even if it matches, so a cover
/// image never doubles as a product. It is compared as a whole path:
/// a cover in a subdirectory does not hide a product of the same name.
/// A missing or unreadable directory yields an empty list.
pub fn discover(dir: &Path, extension: &str, exclude: Option<&Path>) -> Vec<ImageAsset> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            // Camera and Windows exports spell it `.JPEG` as often as `.jpeg`.
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        })
        .filter(|entry| Some(entry.path()) != exclude)
        .map(|entry| ImageAsset::new(entry.into_path()))
        .collect()
}
