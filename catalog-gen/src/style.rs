//! Colors, fonts and line weights used on catalog pages.

use catalog_pdf::BuiltinFont;

pub const PAGE_BORDER_COLOR: u32 = 0x374151;
pub const PAGE_BORDER_WIDTH: f64 = 1.5;

pub const BOX_BORDER_COLOR: u32 = 0xd1d5db;
pub const BOX_BORDER_WIDTH: f64 = 1.0;
pub const CAPTION_FILL: u32 = 0xf3f4f6;

pub const NAME_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const NAME_SIZE: f64 = 10.0;
pub const SUBTITLE_FONT: BuiltinFont = BuiltinFont::Helvetica;
pub const SUBTITLE_SIZE: f64 = 8.0;
pub const SUBTITLE_COLOR: u32 = 0x6b7280;

pub const FOOTER_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const FOOTER_SIZE: f64 = 10.0;

pub const COVER_BAND_COLOR: u32 = 0x0ea5e9;
pub const COVER_TITLE_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const COVER_TITLE_SIZE: f64 = 32.0;
pub const COVER_SUBTITLE_SIZE: f64 = 20.0;
