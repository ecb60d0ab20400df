use std::io::Write;
use std::path::{Path, PathBuf};

use catalog_pdf::{Color, ImageError, PdfDocument, Rect};
use log::{debug, error, info, warn};

use crate::assets::{discover, ImageAsset};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::layout::{
    footer_text, total_page_count, CellLayout, GridSlot, PageGrid, COLUMNS, ITEMS_PER_PAGE, ROWS,
};
use crate::style;

const CREATOR: &str = "catalog-gen";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverKind {
    /// The configured cover image, fit to the page.
    Image,
    /// Title band with the cover title and subtitle.
    Text,
}

/// A product photo that could not be drawn. Its slot keeps the empty
/// bordered box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug)]
pub struct CatalogReport {
    pub image_count: usize,
    pub page_count: usize,
    pub cover: CoverKind,
    pub failures: Vec<ImageFailure>,
}

impl CatalogReport {
    /// Summary printed after a run. Every discovered photo counts as
    /// included; failures are listed after the totals.
    pub fn summary(&self, output: &Path) -> Vec<String> {
        let mut lines = vec![
            format!("✓ Product catalog created: {}", output.display()),
            format!("✓ Total images included: {}", self.image_count),
            format!("✓ Total pages: {}", self.page_count),
            format!(
                "✓ Layout: {}x{} grid ({} products per page)",
                COLUMNS, ROWS, ITEMS_PER_PAGE
            ),
        ];
        if !self.failures.is_empty() {
            lines.push(format!(
                "✗ {} images could not be drawn:",
                self.failures.len()
            ));
            for failure in &self.failures {
                lines.push(format!(
                    "    {}: {}",
                    failure.path.display(),
                    failure.message
                ));
            }
        }
        lines
    }
}

/// A catalog ready to render: the configuration plus the photos found
/// for it. Only `prepare` builds one, so there is always at least one
/// photo.
#[derive(Debug)]
pub struct CatalogJob {
    config: CatalogConfig,
    assets: Vec<ImageAsset>,
    cover: Option<PathBuf>,
    grid: PageGrid,
}

impl CatalogJob {
    /// Scan the image directory. Fails with `NoImages` before anything
    /// is written when it holds no matching photos.
    pub fn prepare(config: CatalogConfig) -> Result<Self, CatalogError> {
        let cover_path = config.cover_path();
        let assets = discover(&config.image_dir, &config.extension, cover_path.as_deref());
        if assets.is_empty() {
            return Err(CatalogError::NoImages(config.image_dir.clone()));
        }
        info!(
            "found {} .{} images in {}",
            assets.len(),
            config.extension,
            config.image_dir.display()
        );

        let cover = cover_path.filter(|p| p.is_file());
        match &cover {
            Some(path) => info!("using cover image {}", path.display()),
            None => info!("no cover image, generating a text cover"),
        }

        Ok(CatalogJob {
            config,
            assets,
            cover,
            grid: PageGrid::a4(),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn image_count(&self) -> usize {
        self.assets.len()
    }

    /// Cover plus grid pages.
    pub fn page_count(&self) -> usize {
        total_page_count(self.assets.len())
    }

    /// Render to the configured output file.
    pub fn write(&self) -> Result<CatalogReport, CatalogError> {
        let doc = PdfDocument::create(&self.config.output)?;
        let (mut out, report) = self.render(doc)?;
        out.flush()?;
        info!("wrote {}", self.config.output.display());
        Ok(report)
    }

    /// Render the whole catalog into `writer` and hand it back.
    ///
    /// A photo that cannot be read or decoded is logged, recorded in the
    /// report, and skipped. Failing to write the document is fatal.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(W, CatalogReport), CatalogError> {
        self.render(PdfDocument::new(writer)?)
    }

    fn render<W: Write>(
        &self,
        mut doc: PdfDocument<W>,
    ) -> Result<(W, CatalogReport), CatalogError> {
        doc.set_compression(self.config.compress);
        let meta = &self.config.metadata;
        for (key, value) in [
            ("Title", meta.title.as_str()),
            ("Author", meta.author.as_str()),
            ("Subject", meta.subject.as_str()),
            ("Keywords", meta.keywords.as_str()),
        ] {
            if !value.is_empty() {
                doc.set_info(key, value);
            }
        }
        doc.set_info("Creator", CREATOR);

        let cover = self.draw_cover(&mut doc)?;
        let failures = self.draw_grid_pages(&mut doc)?;
        let page_count = doc.page_count();
        let writer = doc.end_document()?;

        Ok((
            writer,
            CatalogReport {
                image_count: self.assets.len(),
                page_count,
                cover,
                failures,
            },
        ))
    }

    fn begin_page<W: Write>(&self, doc: &mut PdfDocument<W>) -> Result<(), CatalogError> {
        doc.begin_page(self.grid.page_width, self.grid.page_height)?;
        Ok(())
    }

    fn draw_cover<W: Write>(&self, doc: &mut PdfDocument<W>) -> Result<CoverKind, CatalogError> {
        self.begin_page(doc)?;
        let kind = match &self.cover {
            Some(path) => match doc.load_image_file(path) {
                Ok(image) => {
                    doc.place_image(image, &self.grid.full_page());
                    CoverKind::Image
                }
                Err(ImageError::Output(e)) => return Err(e.into()),
                Err(e) => {
                    warn!(
                        "cover image {} is unusable, falling back to text cover: {}",
                        path.display(),
                        e
                    );
                    self.draw_text_cover(doc);
                    CoverKind::Text
                }
            },
            None => {
                self.draw_text_cover(doc);
                CoverKind::Text
            }
        };
        doc.end_page()?;
        Ok(kind)
    }

    fn draw_text_cover<W: Write>(&self, doc: &mut PdfDocument<W>) {
        let center = self.grid.page_width / 2.0;
        doc.set_fill_color(Color::hex(style::COVER_BAND_COLOR))
            .rect(&self.grid.cover_band())
            .fill();
        doc.set_fill_color(Color::WHITE)
            .place_text_centered(
                &self.config.cover_title,
                center,
                self.grid.cover_title_baseline(),
                style::COVER_TITLE_FONT,
                style::COVER_TITLE_SIZE,
            )
            .place_text_centered(
                &self.config.cover_subtitle,
                center,
                self.grid.cover_subtitle_baseline(),
                style::COVER_TITLE_FONT,
                style::COVER_SUBTITLE_SIZE,
            );
    }

    fn draw_grid_pages<W: Write>(
        &self,
        doc: &mut PdfDocument<W>,
    ) -> Result<Vec<ImageFailure>, CatalogError> {
        let total_pages = self.page_count();
        let mut failures = Vec::new();

        for (index, asset) in self.assets.iter().enumerate() {
            let slot = GridSlot::for_index(index);
            if slot.position() == 0 {
                self.begin_page(doc)?;
                doc.set_stroke_color(Color::hex(style::PAGE_BORDER_COLOR))
                    .set_line_width(style::PAGE_BORDER_WIDTH)
                    .rect(&self.grid.page_border())
                    .stroke();
            }

            let cell = self.grid.cell(slot);
            // The box goes down first so a failed image leaves it empty.
            draw_bordered_box(doc, &cell.image_box, Color::WHITE);
            match doc.load_image_file(asset.path()) {
                Ok(image) => {
                    doc.place_image(image, &cell.image_area);
                    self.draw_caption(doc, asset, &cell);
                }
                Err(ImageError::Output(e)) => return Err(e.into()),
                Err(e) => {
                    error!("error processing {}: {}", asset.path().display(), e);
                    failures.push(ImageFailure {
                        path: asset.path().to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }

            if slot.position() == ITEMS_PER_PAGE - 1 || index + 1 == self.assets.len() {
                let footer = footer_text(slot.page_number(), total_pages);
                doc.set_fill_color(Color::BLACK).place_text_centered(
                    &footer,
                    self.grid.page_width / 2.0,
                    self.grid.footer_baseline(),
                    style::FOOTER_FONT,
                    style::FOOTER_SIZE,
                );
                doc.end_page()?;
                debug!("flushed grid page {}", footer);
            }
        }
        Ok(failures)
    }

    fn draw_caption<W: Write>(&self, doc: &mut PdfDocument<W>, asset: &ImageAsset, cell: &CellLayout) {
        draw_bordered_box(doc, &cell.caption_box, Color::hex(style::CAPTION_FILL));
        doc.set_fill_color(Color::BLACK).place_text_centered(
            &asset.caption(&self.config.caption),
            cell.text_center_x,
            cell.name_baseline,
            style::NAME_FONT,
            style::NAME_SIZE,
        );
        doc.set_fill_color(Color::hex(style::SUBTITLE_COLOR))
            .place_text_centered(
                &self.config.item_subtitle,
                cell.text_center_x,
                cell.subtitle_baseline,
                style::SUBTITLE_FONT,
                style::SUBTITLE_SIZE,
            );
    }
}

fn draw_bordered_box<W: Write>(doc: &mut PdfDocument<W>, rect: &Rect, fill: Color) {
    doc.set_fill_color(fill).rect(rect).fill();
    doc.set_stroke_color(Color::hex(style::BOX_BORDER_COLOR))
        .set_line_width(style::BOX_BORDER_WIDTH)
        .rect(rect)
        .stroke();
}
