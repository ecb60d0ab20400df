use std::io;

use thiserror::Error;

use crate::graphics::Rect;

/// Handle to an image XObject already written into a `PdfDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image: {0}")]
    Io(#[from] io::Error),

    /// Writing the XObject to the document failed. The image itself may
    /// be fine; the output is not.
    #[error("failed to write image to document: {0}")]
    Output(#[source] io::Error),

    #[error("image data too short to detect format")]
    TooShort,

    #[error("unsupported image format (expected JPEG or PNG)")]
    UnsupportedFormat,

    #[error("malformed JPEG: {0}")]
    Jpeg(String),

    #[error("unsupported JPEG component count: {0} (expected 1, 3 or 4)")]
    UnsupportedJpegComponents(u8),

    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("unsupported PNG color type: {0}")]
    UnsupportedPngColor(String),
}

/// Container format, detected from the magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Device color space of the embedded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
    DeviceCMYK,
}

impl ColorSpace {
    /// Name used for `/ColorSpace` in the image dictionary.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }

    /// Color components per pixel.
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }
}

/// An image parsed far enough to embed. JPEG bytes pass through
/// untouched; PNGs are decoded to 8-bit samples.
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
    /// Alpha channel as 8-bit gray, when the PNG has one.
    pub alpha: Option<Vec<u8>>,
    /// Samples are stored inverted and need a `/Decode` array.
    /// Set for CMYK JPEGs written by Adobe software.
    pub inverted: bool,
}

/// Where an image lands on the page, in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Sniff the format from the leading magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort);
    }
    if data.starts_with(&[0xFF, 0xD8]) {
        Ok(ImageFormat::Jpeg)
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        Ok(ImageFormat::Png)
    } else {
        Err(ImageError::UnsupportedFormat)
    }
}

/// Parse an image far enough to embed it.
pub fn load_image(data: Vec<u8>) -> Result<ImageData, ImageError> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(&data),
    }
}

fn parse_jpeg(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let header = jpeg_frame_header(&data)?;
    let color_space = match header.components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        4 => ColorSpace::DeviceCMYK,
        n => return Err(ImageError::UnsupportedJpegComponents(n)),
    };
    if header.width == 0 || header.height == 0 {
        return Err(ImageError::Jpeg("zero image dimension".to_string()));
    }
    Ok(ImageData {
        width: header.width,
        height: header.height,
        format: ImageFormat::Jpeg,
        color_space,
        data,
        alpha: None,
        inverted: color_space == ColorSpace::DeviceCMYK && header.adobe,
    })
}

struct JpegHeader {
    width: u32,
    height: u32,
    components: u8,
    /// An Adobe APP14 segment came before the frame header.
    adobe: bool,
}

/// Walk the marker segments up to the first SOF0..SOF3 frame header
/// and read the image size and component count from it.
fn jpeg_frame_header(data: &[u8]) -> Result<JpegHeader, ImageError> {
    let mut adobe = false;
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            return Err(ImageError::Jpeg(format!(
                "expected marker at offset {}",
                i
            )));
        }
        let marker = data[i + 1];
        match marker {
            // Fill bytes before a marker.
            0xFF => {
                i += 1;
                continue;
            }
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            0xD9 | 0xDA => break,
            _ => {}
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= data.len() {
                return Err(ImageError::Jpeg(
                    "frame header truncated".to_string(),
                ));
            }
            return Ok(JpegHeader {
                height: u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32,
                width: u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32,
                components: data[i + 9],
                adobe,
            });
        }
        if marker == 0xEE && data[i + 4..].starts_with(b"Adobe") {
            adobe = true;
        }
        if seg_len < 2 {
            return Err(ImageError::Jpeg("bad segment length".to_string()));
        }
        i += 2 + seg_len;
    }
    Err(ImageError::Jpeg("no frame header found".to_string()))
}

fn parse_png(data: &[u8]) -> Result<ImageData, ImageError> {
    let mut decoder = png::Decoder::new(data);
    // Palette and low bit depths expand to 8-bit gray/RGB (+alpha).
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::STRIP_16,
    );
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (color_space, channels) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2),
        other => {
            return Err(ImageError::UnsupportedPngColor(format!(
                "{:?}",
                other
            )))
        }
    };

    let (data, alpha) = if channels == 2 || channels == 4 {
        split_alpha(&buf, channels)
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        data,
        alpha,
        inverted: false,
    })
}

/// Separate interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in buf.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, Some(alpha))
}

/// Scale an `img_w` x `img_h` image to fit inside `rect` with its
/// aspect ratio preserved, centered on both axes.
pub fn fit_centered(img_w: u32, img_h: u32, rect: &Rect) -> Placement {
    let iw = img_w as f64;
    let ih = img_h as f64;
    let scale = (rect.width / iw).min(rect.height / ih);
    let width = iw * scale;
    let height = ih * scale;
    Placement {
        x: rect.x + (rect.width - width) / 2.0,
        y: rect.y + (rect.height - height) / 2.0,
        width,
        height,
    }
}
