pub mod objects;
pub mod writer;
pub mod document;
pub mod fonts;
pub mod graphics;
pub mod images;

pub use document::PdfDocument;
pub use fonts::{BuiltinFont, FontMetrics};
pub use graphics::{Color, Rect};
pub use images::{ImageError, ImageId, Placement};
