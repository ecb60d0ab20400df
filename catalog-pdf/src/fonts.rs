/// The built-in Type 1 fonts the catalog uses. Neither is embedded;
/// every PDF viewer supplies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// Resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }

    /// PostScript name for `/BaseFont`.
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

// Glyph widths for ASCII 32..=126 in 1/1000 em, from the Adobe AFM files.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, // 32..=41
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556, // 42..=51
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584, // 52..=61
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, // 62..=71
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778, // 72..=81
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278, // 82..=91
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, // 92..=101
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 102..=111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, // 112..=121
    500, 334, 260, 334, 584, // 122..=126
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, // 32..=41
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556, // 42..=51
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584, // 52..=61
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778, // 62..=71
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778, // 72..=81
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333, // 82..=91
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, // 92..=101
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 102..=111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, // 112..=121
    500, 389, 280, 389, 584, // 122..=126
];

// Widths for WinAnsi codes 128..=255. Zero marks the five unused codes.
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, // 128..=137
    667, 333, 1000, 0, 611, 0, 0, 222, 222, 333, // 138..=147
    333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, // 148..=157
    500, 667, 278, 333, 556, 556, 556, 556, 260, 556, // 158..=167
    333, 737, 370, 556, 584, 333, 737, 333, 400, 584, // 168..=177
    333, 333, 333, 556, 537, 278, 333, 333, 365, 556, // 178..=187
    834, 834, 834, 611, 667, 667, 667, 667, 667, 667, // 188..=197
    1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 198..=207
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, // 208..=217
    722, 722, 722, 667, 667, 611, 556, 556, 556, 556, // 218..=227
    556, 556, 889, 500, 556, 556, 556, 556, 278, 278, // 228..=237
    278, 278, 556, 556, 556, 556, 556, 556, 556, 584, // 238..=247
    611, 556, 556, 556, 556, 500, 556, 500, // 248..=255
];

const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, // 128..=137
    667, 333, 1000, 0, 611, 0, 0, 278, 278, 500, // 138..=147
    500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, // 148..=157
    500, 667, 278, 333, 556, 556, 556, 556, 280, 556, // 158..=167
    333, 737, 370, 556, 584, 333, 737, 333, 400, 584, // 168..=177
    333, 333, 333, 611, 556, 278, 333, 333, 365, 556, // 178..=187
    834, 834, 834, 611, 722, 722, 722, 722, 722, 722, // 188..=197
    1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 198..=207
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, // 208..=217
    722, 722, 722, 667, 667, 611, 556, 556, 556, 556, // 218..=227
    556, 556, 889, 556, 556, 556, 556, 556, 278, 278, // 228..=237
    278, 278, 611, 611, 611, 611, 611, 611, 611, 584, // 238..=247
    611, 611, 611, 611, 611, 556, 611, 556, // 248..=255
];

/// WinAnsiEncoding byte for `ch`, if the encoding has one.
///
/// Printable ASCII and Latin-1 map to themselves; 128..=159 hold the
/// typographic punctuation and a few extra letters.
pub fn winansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
        '\u{20ac}' => 0x80, // Euro
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017d}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99, // trademark
        '\u{0161}' => 0x9A,
        '\u{203a}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017e}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}

pub struct FontMetrics;

impl FontMetrics {
    /// Advance width of `ch` in 1/1000 em. Characters WinAnsi
    /// cannot encode are drawn as `?` and measured as one.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        let (low, high) = match font {
            BuiltinFont::Helvetica => {
                (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS)
            }
            BuiltinFont::HelveticaBold => {
                (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS)
            }
        };
        match winansi_code(ch) {
            Some(code @ 32..=126) => low[code as usize - 32],
            Some(code) if code >= 128 => high[code as usize - 128],
            _ => low[b'?' as usize - 32],
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        units as f64 * font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_are_distinct() {
        assert_eq!(BuiltinFont::Helvetica.resource_name(), "F1");
        assert_eq!(BuiltinFont::HelveticaBold.resource_name(), "F2");
        assert_eq!(BuiltinFont::HelveticaBold.base_name(), "Helvetica-Bold");
    }

    #[test]
    fn known_widths() {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, ' '), 278);
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'W'), 944);
        let bold = BuiltinFont::HelveticaBold;
        assert_eq!(FontMetrics::char_width(bold, 'W'), 944);
        assert_eq!(FontMetrics::char_width(bold, 'i'), 278);
    }

    #[test]
    fn latin1_and_punctuation_widths() {
        let helv = BuiltinFont::Helvetica;
        let bold = BuiltinFont::HelveticaBold;
        assert_eq!(FontMetrics::char_width(helv, '\u{e9}'), 556);
        assert_eq!(FontMetrics::char_width(helv, '\u{c6}'), 1000);
        assert_eq!(FontMetrics::char_width(bold, '\u{f1}'), 611);
        assert_eq!(FontMetrics::char_width(helv, '\u{2019}'), 222);
        assert_eq!(FontMetrics::char_width(bold, '\u{2019}'), 278);
        assert_eq!(FontMetrics::char_width(helv, '\u{2013}'), 556);
        assert_eq!(FontMetrics::char_width(helv, '\u{2014}'), 1000);
        assert_eq!(FontMetrics::char_width(helv, '\u{2122}'), 1000);
        assert_eq!(FontMetrics::char_width(bold, '\u{2022}'), 350);
    }

    #[test]
    fn unencodable_measures_as_question_mark() {
        let bold = BuiltinFont::HelveticaBold;
        assert_eq!(
            FontMetrics::char_width(bold, '\u{2713}'),
            FontMetrics::char_width(bold, '?')
        );
    }

    #[test]
    fn winansi_codes() {
        assert_eq!(winansi_code('A'), Some(b'A'));
        assert_eq!(winansi_code('\u{e9}'), Some(0xE9));
        assert_eq!(winansi_code('\u{20ac}'), Some(0x80));
        assert_eq!(winansi_code('\u{2019}'), Some(0x92));
        assert_eq!(winansi_code('\u{0178}'), Some(0x9F));
        assert_eq!(winansi_code('\u{80}'), None);
        assert_eq!(winansi_code('\n'), None);
        assert_eq!(winansi_code('\u{2713}'), None);
    }

    #[test]
    fn measure_scales_with_size() {
        // "Page" in Helvetica-Bold: P=667 a=556 g=611 e=556
        let w = FontMetrics::measure_text(
            "Page",
            BuiltinFont::HelveticaBold,
            10.0,
        );
        assert!((w - 23.9).abs() < 1e-9);
        let empty =
            FontMetrics::measure_text("", BuiltinFont::Helvetica, 12.0);
        assert_eq!(empty, 0.0);
    }
}
