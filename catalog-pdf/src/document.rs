use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::{BuiltinFont, FontMetrics};
use crate::graphics::{Color, Rect};
use crate::images::{
    self, ImageData, ImageError, ImageFormat, ImageId, Placement,
};
use crate::objects::{ObjId, PdfObject};
use crate::writer::{encode_winansi_string, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FONT_HELV_OBJ: ObjId = ObjId(3, 0);
const FONT_HELV_BOLD_OBJ: ObjId = ObjId(4, 0);
const FIRST_FREE_OBJ_NUM: u32 = 5;

/// Incremental PDF builder.
///
/// Generic over `Write`, so the same code path targets a file
/// (`BufWriter<File>`) or an in-memory `Vec<u8>`.
///
/// Each page is written out by `end_page()` and its content dropped,
/// and each image XObject is written once when it is loaded, so memory
/// stays flat no matter how many pages the document has.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    images: Vec<ImageEntry>,
    next_obj_num: u32,
    compress: bool,
}

struct PageBuilder {
    width: f64,
    height: f64,
    ops: Vec<u8>,
    images: BTreeSet<ImageId>,
}

struct ImageEntry {
    obj_id: ObjId,
    width: u32,
    height: u32,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a document backed by a new file at `path`.
    /// Flush the writer returned by `end_document()`.
    pub fn create<P: AsRef<Path>>(
        path: P,
    ) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a document on top of `writer`. The header and the
    /// shared font objects are written immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut writer = PdfWriter::new(writer);
        writer.write_header()?;

        // Write shared Helvetica (obj 3) and Helvetica-Bold (obj 4).
        for (id, font) in [
            (FONT_HELV_OBJ, BuiltinFont::Helvetica),
            (FONT_HELV_BOLD_OBJ, BuiltinFont::HelveticaBold),
        ] {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.base_name())),
                (
                    "Encoding",
                    PdfObject::name("WinAnsiEncoding"),
                ),
            ]);
            writer.write_object(id, &dict)?;
        }

        Ok(PdfDocument {
            writer,
            info: Vec::new(),
            page_ids: Vec::new(),
            current_page: None,
            images: Vec::new(),
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
        })
    }

    /// Deflate page content streams. Image data is always
    /// compressed (or passed through, for JPEG).
    pub fn set_compression(
        &mut self,
        enabled: bool,
    ) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Add an entry to the document info dictionary
    /// (e.g. "Title", "Author", "Creator").
    pub fn set_info(
        &mut self,
        key: &str,
        value: &str,
    ) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Number of pages already written by `end_page()`.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn alloc_id(&mut self) -> ObjId {
        let id = ObjId::new(self.next_obj_num);
        self.next_obj_num += 1;
        id
    }

    /// Begin a new page with the given dimensions in points.
    /// If a page is currently open, it is closed first.
    pub fn begin_page(
        &mut self,
        width: f64,
        height: f64,
    ) -> io::Result<()> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            ops: Vec::new(),
            images: BTreeSet::new(),
        });
        Ok(())
    }

    fn page(&mut self) -> &mut PageBuilder {
        self.current_page
            .as_mut()
            .expect("drawing operation called with no open page")
    }

    fn push_ops(&mut self, ops: &str) -> &mut Self {
        self.page().ops.extend_from_slice(ops.as_bytes());
        self
    }

    /// Set the nonstroking color (`rg`) used by `fill` and text.
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        let ops = format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b)
        );
        self.push_ops(&ops)
    }

    /// Set the stroking color (`RG`) used by `stroke`.
    pub fn set_stroke_color(
        &mut self,
        color: Color,
    ) -> &mut Self {
        let ops = format!(
            "{} {} {} RG\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b)
        );
        self.push_ops(&ops)
    }

    /// Set the stroke line width in points.
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        let ops = format!("{} w\n", format_coord(width));
        self.push_ops(&ops)
    }

    /// Append a rectangle to the current path. Paint it with
    /// `fill()` or `stroke()`.
    pub fn rect(&mut self, r: &Rect) -> &mut Self {
        let ops = format!(
            "{} {} {} {} re\n",
            format_coord(r.x),
            format_coord(r.y),
            format_coord(r.width),
            format_coord(r.height)
        );
        self.push_ops(&ops)
    }

    /// Fill the current path with the fill color.
    pub fn fill(&mut self) -> &mut Self {
        self.push_ops("f\n")
    }

    /// Stroke the current path with the stroke color and
    /// line width.
    pub fn stroke(&mut self) -> &mut Self {
        self.push_ops("S\n")
    }

    /// Draw `text` with its baseline starting at (x, y).
    /// Coordinates use PDF's default bottom-left origin.
    pub fn place_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: BuiltinFont,
        font_size: f64,
    ) -> &mut Self {
        let ops = format!(
            "BT\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
            font.resource_name(),
            format_coord(font_size),
            format_coord(x),
            format_coord(y),
            encode_winansi_string(text),
        );
        self.push_ops(&ops)
    }

    /// Draw `text` horizontally centered on `center_x`, measured
    /// with the font's AFM widths.
    pub fn place_text_centered(
        &mut self,
        text: &str,
        center_x: f64,
        y: f64,
        font: BuiltinFont,
        font_size: f64,
    ) -> &mut Self {
        let width =
            FontMetrics::measure_text(text, font, font_size);
        self.place_text(
            text,
            center_x - width / 2.0,
            y,
            font,
            font_size,
        )
    }

    /// Read and embed an image file. See `load_image_bytes`.
    pub fn load_image_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<ImageId, ImageError> {
        let data = std::fs::read(path)?;
        self.load_image_bytes(data)
    }

    /// Parse JPEG or PNG bytes and write the image XObject right
    /// away. The returned handle can be placed on any later page.
    ///
    /// Write failures come back as `ImageError::Output`; every other
    /// variant means the input bytes were unusable.
    pub fn load_image_bytes(
        &mut self,
        data: Vec<u8>,
    ) -> Result<ImageId, ImageError> {
        let image = images::load_image(data)?;
        let (width, height) = (image.width, image.height);
        let obj_id = self
            .write_image(image)
            .map_err(ImageError::Output)?;
        self.images.push(ImageEntry {
            obj_id,
            width,
            height,
        });
        Ok(ImageId(self.images.len() - 1))
    }

    fn write_image(
        &mut self,
        image: ImageData,
    ) -> io::Result<ObjId> {
        // Write the soft mask first so the image can reference it.
        let smask_id = match &image.alpha {
            Some(alpha) => {
                let id = self.alloc_id();
                let smask = PdfObject::stream(
                    vec![
                        ("Type", PdfObject::name("XObject")),
                        ("Subtype", PdfObject::name("Image")),
                        (
                            "Width",
                            PdfObject::Integer(image.width as i64),
                        ),
                        (
                            "Height",
                            PdfObject::Integer(image.height as i64),
                        ),
                        (
                            "ColorSpace",
                            PdfObject::name("DeviceGray"),
                        ),
                        ("BitsPerComponent", PdfObject::Integer(8)),
                        ("Filter", PdfObject::name("FlateDecode")),
                    ],
                    deflate(alpha)?,
                );
                self.writer.write_object(id, &smask)?;
                Some(id)
            }
            None => None,
        };

        // Write the image XObject itself.
        let (filter, data) = match image.format {
            ImageFormat::Jpeg => ("DCTDecode", image.data),
            ImageFormat::Png => {
                ("FlateDecode", deflate(&image.data)?)
            }
        };
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(image.width as i64)),
            ("Height", PdfObject::Integer(image.height as i64)),
            (
                "ColorSpace",
                PdfObject::name(image.color_space.pdf_name()),
            ),
            ("BitsPerComponent", PdfObject::Integer(8)),
            ("Filter", PdfObject::name(filter)),
        ];
        if image.inverted {
            // Adobe CMYK JPEGs store inverted samples.
            let decode = [1, 0].repeat(image.color_space.components());
            dict.push((
                "Decode",
                PdfObject::Array(
                    decode
                        .into_iter()
                        .map(PdfObject::Integer)
                        .collect(),
                ),
            ));
        }
        if let Some(smask) = smask_id {
            dict.push(("SMask", PdfObject::reference(smask)));
        }

        let id = self.alloc_id();
        self.writer
            .write_object(id, &PdfObject::stream(dict, data))?;
        Ok(id)
    }

    /// Pixel dimensions of a loaded image.
    pub fn image_size(&self, image: ImageId) -> (u32, u32) {
        let entry = &self.images[image.0];
        (entry.width, entry.height)
    }

    /// Draw a loaded image scaled to fit `rect`, aspect ratio
    /// preserved and centered. Returns where it was drawn.
    pub fn place_image(
        &mut self,
        image: ImageId,
        rect: &Rect,
    ) -> Placement {
        let (width, height) = self.image_size(image);
        let placement = images::fit_centered(width, height, rect);
        let ops = format!(
            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ\n",
            format_coord(placement.width),
            format_coord(placement.height),
            format_coord(placement.x),
            format_coord(placement.y),
            image.0 + 1,
        );
        self.push_ops(&ops);
        self.page().images.insert(image);
        placement
    }

    /// End the current page. Writes the content stream and page
    /// dictionary to the writer and frees the page content.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self
            .current_page
            .take()
            .expect("end_page called with no open page");

        // Write content stream.
        let content_id = self.alloc_id();
        let content = if self.compress {
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflate(&page.ops)?,
            )
        } else {
            PdfObject::stream(vec![], page.ops)
        };
        self.writer.write_object(content_id, &content)?;

        // Both fonts are always available; images only when used.
        let mut resources = vec![(
            "Font",
            PdfObject::dict(vec![
                (
                    BuiltinFont::Helvetica.resource_name(),
                    PdfObject::reference(FONT_HELV_OBJ),
                ),
                (
                    BuiltinFont::HelveticaBold.resource_name(),
                    PdfObject::reference(FONT_HELV_BOLD_OBJ),
                ),
            ]),
        )];
        if !page.images.is_empty() {
            let names: Vec<String> = page
                .images
                .iter()
                .map(|id| format!("Im{}", id.0 + 1))
                .collect();
            let entries = page
                .images
                .iter()
                .zip(&names)
                .map(|(id, name)| {
                    (
                        name.as_str(),
                        PdfObject::reference(
                            self.images[id.0].obj_id,
                        ),
                    )
                })
                .collect();
            resources.push(("XObject", PdfObject::dict(entries)));
        }

        // Write page dictionary.
        let page_id = self.alloc_id();
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::media_box(page.width, page.height),
            ),
            ("Contents", PdfObject::reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page_dict)?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Close any open page, then write the info dictionary, pages
    /// tree, catalog, xref and trailer. Returns the underlying
    /// writer.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        // Write info dictionary.
        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_id();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| {
                    (k.as_str(), PdfObject::literal_string(v))
                })
                .collect();
            self.writer
                .write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        // Write pages tree.
        let kids = self
            .page_ids
            .iter()
            .map(|&id| PdfObject::reference(id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            (
                "Count",
                PdfObject::Integer(self.page_ids.len() as i64),
            ),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        // Write catalog.
        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder =
        ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Content-stream number formatting: integers print bare,
/// fractions keep at most four decimals.
pub fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}
