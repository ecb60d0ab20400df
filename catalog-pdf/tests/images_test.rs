use catalog_pdf::{ImageError, PdfDocument, Rect};

/// Smallest byte sequence the frame-header scan accepts as a JPEG.
fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
    jpeg_with_components(width, height, 3, false)
}

fn jpeg_with_components(
    width: u16,
    height: u16,
    components: u8,
    adobe: bool,
) -> Vec<u8> {
    let mut v = vec![0xFF, 0xD8];
    if adobe {
        v.extend_from_slice(&[0xFF, 0xEE, 0x00, 0x0E]);
        v.extend_from_slice(b"Adobe");
        v.extend_from_slice(&[0, 100, 0, 0, 0, 0, 2]);
    }
    v.extend_from_slice(&[0xFF, 0xC0, 0x00, 8 + 3 * components, 0x08]);
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&width.to_be_bytes());
    v.push(components);
    for id in 1..=components {
        v.extend_from_slice(&[id, 0x11, 0]);
    }
    v.extend_from_slice(&[0xFF, 0xD9]);
    v
}

fn png_bytes(width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
    let channels = match color {
        png::ColorType::Rgba => 4,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Grayscale => 1,
        _ => 3,
    };
    let pixels = vec![0x80u8; (width * height) as usize * channels];
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
    }
    buf
}

fn box_200x150() -> Rect {
    Rect::new(72.0, 72.0, 200.0, 150.0)
}

#[test]
fn jpeg_is_embedded_with_dctdecode() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let img = doc.load_image_bytes(jpeg_bytes(100, 80)).unwrap();
    assert_eq!(doc.image_size(img), (100, 80));
    doc.begin_page(612.0, 792.0).unwrap();
    doc.place_image(img, &box_200x150());
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/Subtype /Image"));
    assert!(output.contains("/Filter /DCTDecode"));
    assert!(output.contains("/ColorSpace /DeviceRGB"));
}

#[test]
fn png_is_embedded_with_flatedecode() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let img = doc
        .load_image_bytes(png_bytes(4, 2, png::ColorType::Rgb))
        .unwrap();
    assert_eq!(doc.image_size(img), (4, 2));
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/Width 4 /Height 2 /ColorSpace /DeviceRGB"));
    assert!(output.contains("/Filter /FlateDecode"));
}

#[test]
fn rgba_png_gets_an_smask() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.load_image_bytes(png_bytes(3, 3, png::ColorType::Rgba))
        .unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/SMask"));
    assert!(output.contains("/ColorSpace /DeviceGray"));
}

#[test]
fn gray_png_has_gray_colorspace() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.load_image_bytes(png_bytes(2, 2, png::ColorType::Grayscale))
        .unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/ColorSpace /DeviceGray"));
    assert!(!output.contains("/SMask"));
}

#[test]
fn placement_fits_and_centers() {
    // 100x80 into 200x150: scale = min(2.0, 1.875) -> 187.5 x 150,
    // centered horizontally: x = 72 + (200 - 187.5) / 2 = 78.25
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let img = doc.load_image_bytes(jpeg_bytes(100, 80)).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    let placed = doc.place_image(img, &box_200x150());
    assert_eq!(placed.width, 187.5);
    assert_eq!(placed.height, 150.0);
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("q\n187.5 0 0 150 78.25 72 cm\n/Im1 Do\nQ\n"));
}

#[test]
fn only_placed_images_appear_in_page_resources() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let first = doc.load_image_bytes(jpeg_bytes(10, 10)).unwrap();
    let second = doc.load_image_bytes(jpeg_bytes(20, 10)).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.place_image(second, &box_200x150());
    doc.end_page().unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.place_image(first, &box_200x150());
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert_eq!(output.matches("/XObject << /Im2").count(), 1);
    assert_eq!(output.matches("/XObject << /Im1").count(), 1);
}

#[test]
fn page_without_images_has_no_xobject_resources() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.load_image_bytes(jpeg_bytes(10, 10)).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(!output.contains("/XObject <<"));
}

#[test]
fn garbage_bytes_are_rejected() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let err = doc.load_image_bytes(b"not an image".to_vec()).unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedFormat));
}

#[test]
fn truncated_png_is_rejected() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let mut data = png_bytes(8, 8, png::ColorType::Rgb);
    data.truncate(20);
    assert!(doc.load_image_bytes(data).is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let err = doc
        .load_image_file("/definitely/not/here/product-001.jpeg")
        .unwrap_err();
    assert!(matches!(err, ImageError::Io(_)));
}

#[test]
fn cmyk_jpeg_is_embedded_as_devicecmyk() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let img = doc
        .load_image_bytes(jpeg_with_components(60, 40, 4, false))
        .unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.place_image(img, &box_200x150());
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/ColorSpace /DeviceCMYK"));
    assert!(output.contains("/Filter /DCTDecode"));
    assert!(!output.contains("/Decode"));
}

#[test]
fn adobe_cmyk_jpeg_gets_decode_array() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.load_image_bytes(jpeg_with_components(60, 40, 4, true))
        .unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/ColorSpace /DeviceCMYK"));
    assert!(output.contains("/Decode [1 0 1 0 1 0 1 0]"));
}
