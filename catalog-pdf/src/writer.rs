use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::fonts::winansi_code;
use crate::objects::{ObjId, PdfObject};

/// Serializes indirect objects to any `Write` target, remembering
/// where each one starts so the xref table can be written at the end.
pub struct PdfWriter<W: Write> {
    inner: W,
    position: usize,
    offsets: BTreeMap<u32, usize>,
}

impl<W: Write> PdfWriter<W> {
    /// Wrap `inner`. Nothing is written until `write_header()`.
    pub fn new(inner: W) -> Self {
        PdfWriter {
            inner,
            position: 0,
            offsets: BTreeMap::new(),
        }
    }

    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len();
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> io::Result<()> {
        self.put(s.as_bytes())
    }

    /// `%PDF-1.7` followed by a comment of high-bit bytes so
    /// transfer tools treat the file as binary.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.put_str("%PDF-1.7\n")?;
        self.put(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write `obj` as indirect object `id`, recording its byte
    /// offset for the xref table.
    pub fn write_object(
        &mut self,
        id: ObjId,
        obj: &PdfObject,
    ) -> io::Result<()> {
        self.offsets.insert(id.0, self.position);
        self.put_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.put_value(obj)?;
        self.put_str("\nendobj\n")
    }

    fn put_entries(
        &mut self,
        entries: &[(String, PdfObject)],
    ) -> io::Result<()> {
        for (key, value) in entries {
            self.put_str(" /")?;
            self.put_str(key)?;
            self.put_str(" ")?;
            self.put_value(value)?;
        }
        Ok(())
    }

    fn put_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.put_str(&n.to_string()),
            PdfObject::Real(f) => self.put_str(&format_real(*f)),
            PdfObject::Name(name) => {
                self.put_str("/")?;
                self.put_str(name)
            }
            PdfObject::LiteralString(s) => {
                self.put_str("(")?;
                self.put_str(&encode_pdf_string(s))?;
                self.put_str(")")
            }
            PdfObject::Array(items) => {
                self.put_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.put_str(" ")?;
                    }
                    self.put_value(item)?;
                }
                self.put_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.put_str("<<")?;
                self.put_entries(entries)?;
                self.put_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.put_str("<<")?;
                self.put_entries(dict)?;
                self.put_str(&format!(
                    " /Length {} >>\nstream\n",
                    data.len()
                ))?;
                self.put(data)?;
                self.put_str("\nendstream")
            }
            PdfObject::Reference(id) => {
                self.put_str(&format!("{} {} R", id.0, id.1))
            }
        }
    }

    /// Write the xref table, trailer, `startxref`, and `%%EOF`.
    /// Object numbers never written get free entries.
    pub fn write_xref_and_trailer(
        &mut self,
        root: ObjId,
        info: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_start = self.position;
        let size = self
            .offsets
            .keys()
            .next_back()
            .map_or(1, |&max| max + 1);

        // Write xref table.
        self.put_str(&format!("xref\n0 {}\n", size))?;
        // Every entry is exactly 20 bytes, CRLF-terminated.
        self.put(b"0000000000 65535 f\r\n")?;
        for num in 1..size {
            let entry = match self.offsets.get(&num) {
                Some(&offset) => format!("{:010} 00000 n\r\n", offset),
                None => "0000000000 00000 f\r\n".to_string(),
            };
            self.put_str(&entry)?;
        }

        // Write trailer.
        let mut trailer = format!(
            "trailer\n<< /Size {} /Root {} {} R",
            size, root.0, root.1
        );
        if let Some(info) = info {
            trailer.push_str(&format!(" /Info {} {} R", info.0, info.1));
        }
        trailer.push_str(" >>\n");
        self.put_str(&trailer)?;
        self.put_str(&format!("startxref\n{}\n%%EOF\n", xref_start))
    }

    /// Give back the wrapped writer. It is not flushed.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Encode text for a literal string in a document-level object,
/// such as an info dictionary value.
///
/// Delimiters are backslash-escaped, Latin-1 characters become octal
/// escapes (PDFDocEncoding agrees with Latin-1 there), and anything
/// else becomes `?`.
pub fn encode_pdf_string(s: &str) -> String {
    escape_literal(s, |c| match c {
        '\u{a0}'..='\u{ff}' => Some(c as u8),
        _ => None,
    })
}

/// Encode text shown with a built-in font under WinAnsiEncoding.
///
/// Like `encode_pdf_string`, but typographic quotes, dashes, the
/// Euro sign and the other characters WinAnsi keeps in 128..=159
/// are emitted as their WinAnsi bytes.
pub fn encode_winansi_string(s: &str) -> String {
    escape_literal(s, winansi_code)
}

fn escape_literal(
    s: &str,
    high_byte: impl Fn(char) -> Option<u8>,
) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            _ => match high_byte(c) {
                Some(b) if b >= 0x80 => {
                    out.push_str(&format!("\\{:03o}", b))
                }
                _ => out.push('?'),
            },
        }
    }
    out
}

/// Reals in object syntax always carry a decimal point and never use
/// scientific notation.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        let s = format!("{:.6}", f);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
