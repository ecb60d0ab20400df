//! Fixed page geometry for the catalog.
//!
//! All values are PDF points (1/72 in) with the origin at the bottom-left
//! of the page. Nothing here changes at runtime: the grid is computed once
//! from the page size and the constants below.

use catalog_pdf::Rect;

pub const INCH: f64 = 72.0;

/// ISO A4, 210 x 297 mm.
pub const A4_WIDTH: f64 = 210.0 / 25.4 * INCH;
pub const A4_HEIGHT: f64 = 297.0 / 25.4 * INCH;

pub const COLUMNS: usize = 3;
pub const ROWS: usize = 2;
pub const ITEMS_PER_PAGE: usize = COLUMNS * ROWS;

const PAGE_MARGIN: f64 = 0.5 * INCH;
const BORDER_MARGIN: f64 = 0.3 * INCH;
const FOOTER_SPACE: f64 = 0.6 * INCH;
const H_SPACING: f64 = 0.3 * INCH;
const V_SPACING: f64 = 0.4 * INCH;
const CAPTION_HEIGHT: f64 = 0.6 * INCH;
/// Image and caption boxes are this much narrower than the cell.
const BOX_SHRINK: f64 = 0.1 * INCH;
const IMAGE_PADDING: f64 = 0.1 * INCH;
const NAME_RAISE: f64 = 0.1 * INCH;
const SUBTITLE_DROP: f64 = 0.2 * INCH;
const FOOTER_BASELINE: f64 = 0.3 * INCH;
const COVER_BAND_HEIGHT: f64 = 3.0 * INCH;
const COVER_TITLE_DROP: f64 = 1.5 * INCH;
const COVER_SUBTITLE_DROP: f64 = 2.0 * INCH;

/// Where item `index` lands: zero-based grid page, column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub page: usize,
    pub col: usize,
    pub row: usize,
}

impl GridSlot {
    pub fn for_index(index: usize) -> Self {
        let position = index % ITEMS_PER_PAGE;
        GridSlot {
            page: index / ITEMS_PER_PAGE,
            col: position % COLUMNS,
            row: position / COLUMNS,
        }
    }

    /// Position within the page, 0..ITEMS_PER_PAGE.
    pub fn position(&self) -> usize {
        self.row * COLUMNS + self.col
    }

    /// One-based document page number; the cover is page 1.
    pub fn page_number(&self) -> usize {
        self.page + 2
    }
}

pub fn grid_page_count(image_count: usize) -> usize {
    image_count.div_ceil(ITEMS_PER_PAGE)
}

/// Grid pages plus the cover.
pub fn total_page_count(image_count: usize) -> usize {
    grid_page_count(image_count) + 1
}

pub fn footer_text(page_number: usize, total_pages: usize) -> String {
    format!("Page {} of {}", page_number, total_pages)
}

/// The rectangles making up one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Bordered white box the image sits in.
    pub image_box: Rect,
    /// `image_box` minus padding; the image is fit inside this.
    pub image_area: Rect,
    /// Bordered box under the image holding the caption text.
    pub caption_box: Rect,
    pub text_center_x: f64,
    pub name_baseline: f64,
    pub subtitle_baseline: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGrid {
    pub page_width: f64,
    pub page_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl PageGrid {
    pub fn a4() -> Self {
        Self::new(A4_WIDTH, A4_HEIGHT)
    }

    pub fn new(page_width: f64, page_height: f64) -> Self {
        let usable_width = page_width - 2.0 * PAGE_MARGIN;
        let usable_height = page_height - 2.0 * PAGE_MARGIN - FOOTER_SPACE;
        PageGrid {
            page_width,
            page_height,
            cell_width: (usable_width - (COLUMNS - 1) as f64 * H_SPACING) / COLUMNS as f64,
            cell_height: (usable_height - (ROWS - 1) as f64 * V_SPACING) / ROWS as f64,
        }
    }

    pub fn full_page(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height)
    }

    /// Bottom-left corner of the cell at (col, row); row 0 is the top row.
    pub fn cell_origin(&self, col: usize, row: usize) -> (f64, f64) {
        let x = PAGE_MARGIN + col as f64 * (self.cell_width + H_SPACING);
        let y = self.page_height
            - PAGE_MARGIN
            - (row + 1) as f64 * (self.cell_height + V_SPACING)
            + V_SPACING;
        (x, y)
    }

    pub fn cell(&self, slot: GridSlot) -> CellLayout {
        let (x, y) = self.cell_origin(slot.col, slot.row);
        let box_x = x + BOX_SHRINK / 2.0;
        let box_width = self.cell_width - BOX_SHRINK;
        let image_box = Rect::new(
            box_x,
            y + CAPTION_HEIGHT,
            box_width,
            self.cell_height - CAPTION_HEIGHT - BOX_SHRINK,
        );
        let name_baseline = y + CAPTION_HEIGHT / 2.0 + NAME_RAISE;
        CellLayout {
            image_box,
            image_area: image_box.inset(IMAGE_PADDING),
            caption_box: Rect::new(box_x, y, box_width, CAPTION_HEIGHT),
            text_center_x: x + self.cell_width / 2.0,
            name_baseline,
            subtitle_baseline: name_baseline - SUBTITLE_DROP,
        }
    }

    /// Frame drawn around each grid page, leaving the footer strip clear.
    pub fn page_border(&self) -> Rect {
        Rect::new(
            BORDER_MARGIN,
            BORDER_MARGIN + FOOTER_SPACE,
            self.page_width - 2.0 * BORDER_MARGIN,
            self.page_height - 2.0 * BORDER_MARGIN - FOOTER_SPACE,
        )
    }

    pub fn footer_baseline(&self) -> f64 {
        FOOTER_BASELINE
    }

    pub fn cover_band(&self) -> Rect {
        Rect::new(
            0.0,
            self.page_height - COVER_BAND_HEIGHT,
            self.page_width,
            COVER_BAND_HEIGHT,
        )
    }

    pub fn cover_title_baseline(&self) -> f64 {
        self.page_height - COVER_TITLE_DROP
    }

    pub fn cover_subtitle_baseline(&self) -> f64 {
        self.page_height - COVER_SUBTITLE_DROP
    }
}
