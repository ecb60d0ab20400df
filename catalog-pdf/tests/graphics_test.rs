use catalog_pdf::{Color, PdfDocument, Rect};

fn content_of(draw: impl FnOnce(&mut PdfDocument<Vec<u8>>)) -> String {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    draw(&mut doc);
    let bytes = doc.end_document().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[test]
fn fill_color_operator() {
    let output = content_of(|doc| {
        doc.set_fill_color(Color::rgb(0.0, 0.5, 1.0));
    });
    assert!(output.contains("0 0.5 1 rg\n"));
}

#[test]
fn stroke_color_from_hex() {
    let output = content_of(|doc| {
        doc.set_stroke_color(Color::hex(0xff0000));
    });
    assert!(output.contains("1 0 0 RG\n"));
}

#[test]
fn hex_color_rounds_to_four_places() {
    let output = content_of(|doc| {
        doc.set_fill_color(Color::hex(0x0ea5e9));
    });
    // 14/255, 165/255, 233/255
    assert!(output.contains("0.0549 0.6471 0.9137 rg\n"));
}

#[test]
fn line_width_operator() {
    let output = content_of(|doc| {
        doc.set_line_width(1.5);
    });
    assert!(output.contains("1.5 w\n"));
}

#[test]
fn filled_and_stroked_rect() {
    let output = content_of(|doc| {
        doc.set_fill_color(Color::WHITE)
            .rect(&Rect::new(39.6, 400.0, 160.0, 300.0))
            .fill();
        doc.set_stroke_color(Color::gray(0.5))
            .set_line_width(1.0)
            .rect(&Rect::new(39.6, 400.0, 160.0, 300.0))
            .stroke();
    });
    assert!(output.contains("1 1 1 rg\n39.6 400 160 300 re\nf\n"));
    assert!(output.contains("0.5 0.5 0.5 RG\n1 w\n39.6 400 160 300 re\nS\n"));
}
