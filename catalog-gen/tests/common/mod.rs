#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use catalog_gen::CatalogConfig;

/// Fresh, empty directory under the system temp dir, unique per test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("catalog_gen_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Byte sequence carrying just a SOI marker and a baseline frame
/// header; enough for the catalog to size and embed it.
pub fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut v = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08];
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1, 0xFF, 0xD9]);
    v
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = vec![0x40u8; (width * height * 3) as usize];
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
    }
    buf
}

/// Write `count` product photos named `product-001.jpeg`, ... into `dir`.
pub fn write_products(dir: &Path, count: usize) {
    for i in 1..=count {
        fs::write(dir.join(format!("product-{:03}.jpeg", i)), jpeg_bytes(400, 300)).unwrap();
    }
}

/// Uncompressed output so content streams can be inspected as text.
pub fn config_for(dir: &Path) -> CatalogConfig {
    CatalogConfig {
        image_dir: dir.to_path_buf(),
        output: dir.join("catalog.pdf"),
        compress: false,
        ..CatalogConfig::default()
    }
}

/// Page content streams in document order.
pub fn content_streams(pdf: &str) -> Vec<String> {
    pdf.split(">>\nstream\n")
        .skip(1)
        .filter_map(|chunk| chunk.split("\nendstream").next())
        .filter(|body| body.contains(" re\n") || body.contains(" Tj\n") || body.contains(" Do\n"))
        .map(str::to_string)
        .collect()
}

/// The grid page stream whose footer reads `Page {number} of {total}`.
pub fn page_with_footer(pdf: &str, number: usize, total: usize) -> String {
    let footer = format!("(Page {} of {}) Tj", number, total);
    content_streams(pdf)
        .into_iter()
        .find(|s| s.contains(&footer))
        .unwrap_or_else(|| panic!("no page with footer {}", footer))
}
