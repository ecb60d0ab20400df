/// Indirect object identifier: (object number, generation).
/// Everything this crate writes is generation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

impl ObjId {
    /// Object `num`, generation 0.
    pub fn new(num: u32) -> Self {
        ObjId(num, 0)
    }
}

/// The subset of PDF object types (PDF 32000-1:2008 §7.3) needed to
/// write catalogs: no booleans, nulls, or hex strings.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name without the leading `/`.
    Name(String),
    /// Literal string without the enclosing parens; escaped on output.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Entries keep insertion order so output is deterministic.
    Dictionary(Vec<(String, PdfObject)>),
    /// `/Length` is appended by the writer.
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

fn owned_entries(
    entries: Vec<(&str, PdfObject)>,
) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl PdfObject {
    /// Create a Name object. Pass the name without the `/`.
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    /// Create a literal string; escaping happens on output.
    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    /// Create an indirect reference (`n g R`).
    pub fn reference(id: ObjId) -> Self {
        PdfObject::Reference(id)
    }

    /// Create a dictionary from borrowed keys.
    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    /// Create a stream. `entries` must not include `/Length`.
    pub fn stream(
        entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
    ) -> Self {
        PdfObject::Stream {
            dict: owned_entries(entries),
            data,
        }
    }

    /// A `[0 0 w h]` rectangle, as used for `/MediaBox`.
    pub fn media_box(width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(width),
            PdfObject::Real(height),
        ])
    }
}
