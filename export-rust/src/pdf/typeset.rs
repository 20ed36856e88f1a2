//! Embedded TrueType faces: shaping, measuring and the PDF font objects.
//!
//! Lines are split into bidi runs in visual order and each run is shaped
//! with its own direction, so Arabic is joined and laid out right to left
//! before it is placed. Fonts are written as `Type0` fonts with
//! `Identity-H` encoding, which makes every two-byte code a glyph id. A
//! `ToUnicode` map maps glyphs back to text.

use crate::{ExportError, ExportResult};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use rustybuzz::{ttf_parser, Direction, UnicodeBuffer};
use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Write as _},
    path::Path,
};
use unicode_bidi::BidiInfo;

const DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
const DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");

/// Entries per `beginbfchar` section; the CMap format caps it at 100.
const CMAP_CHUNK: usize = 100;

/// The TrueType faces embedded in exported PDFs.
/// # Default Values
/// - `regular`: DejaVu Sans
/// - `bold`: DejaVu Sans Bold
///
/// Italic is drawn by slanting the regular or bold face.
#[derive(Clone)]
pub struct PdfFonts {
    regular: Cow<'static, [u8]>,
    bold: Cow<'static, [u8]>,
}

impl Default for PdfFonts {
    fn default() -> Self {
        Self {
            regular: Cow::Borrowed(DEJAVU_SANS),
            bold: Cow::Borrowed(DEJAVU_SANS_BOLD),
        }
    }
}

impl fmt::Debug for PdfFonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfFonts")
            .field("regular", &format_args!("{} bytes", self.regular.len()))
            .field("bold", &format_args!("{} bytes", self.bold.len()))
            .finish()
    }
}

impl PdfFonts {
    /// Use the given TrueType font files. They must cover every script the
    /// exported text uses.
    #[must_use]
    pub fn new(regular: impl Into<Vec<u8>>, bold: impl Into<Vec<u8>>) -> Self {
        Self {
            regular: Cow::Owned(regular.into()),
            bold: Cow::Owned(bold.into()),
        }
    }

    /// Read the regular and bold faces from `.ttf` files.
    pub fn load(regular: impl AsRef<Path>, bold: impl AsRef<Path>) -> ExportResult<Self> {
        let fonts = Self::new(std::fs::read(regular)?, std::fs::read(bold)?);
        // Fail here rather than on the first export.
        Typeface::parse(&fonts.regular)?;
        Typeface::parse(&fonts.bold)?;
        Ok(fonts)
    }

    pub(super) fn faces(&self) -> ExportResult<Faces<'_>> {
        Ok(Faces {
            regular: Typeface::parse(&self.regular)?,
            bold: Typeface::parse(&self.bold)?,
        })
    }
}

pub(super) struct Faces<'a> {
    pub regular: Typeface<'a>,
    pub bold: Typeface<'a>,
}

impl<'a> Faces<'a> {
    pub fn get(&self, bold: bool) -> &Typeface<'a> {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// One shaped glyph. `advance` is in font units. `text` is the source text
/// of the cluster, set on the first glyph of each cluster only.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Glyph {
    pub id: u16,
    pub advance: i32,
    pub text: Option<String>,
}

pub(super) struct Typeface<'a> {
    face: rustybuzz::Face<'a>,
    data: &'a [u8],
    name: String,
    units_per_em: f32,
}

impl<'a> Typeface<'a> {
    pub fn parse(data: &'a [u8]) -> ExportResult<Self> {
        let face = rustybuzz::Face::from_slice(data, 0)
            .ok_or_else(|| ExportError::Font("not a TrueType font".to_string()))?;
        if face.tables().glyf.is_none() {
            return Err(ExportError::Font(
                "only fonts with TrueType outlines can be embedded".to_string(),
            ));
        }
        let name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| {
                name.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());
        #[allow(clippy::cast_precision_loss)]
        let units_per_em = face.units_per_em() as f32;

        Ok(Self {
            face,
            data,
            name,
            units_per_em,
        })
    }

    /// Shape one line into glyphs in visual order, left to right.
    pub fn shape(&self, text: &str) -> Vec<Glyph> {
        let bidi = BidiInfo::new(text, None);
        let mut glyphs = Vec::new();

        for paragraph in &bidi.paragraphs {
            let (levels, runs) = bidi.visual_runs(paragraph, paragraph.range.clone());
            for run in runs {
                let rtl = levels[run.start].is_rtl();
                self.shape_run(&text[run], rtl, &mut glyphs);
            }
        }
        glyphs
    }

    fn shape_run(&self, run: &str, rtl: bool, glyphs: &mut Vec<Glyph>) {
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(run);
        buffer.set_direction(if rtl {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        });
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&self.face, &[], buffer);

        let mut starts: Vec<usize> = shaped
            .glyph_infos()
            .iter()
            .filter_map(|info| usize::try_from(info.cluster).ok())
            .collect();
        starts.sort_unstable();
        starts.dedup();
        let cluster_text = |start: usize| {
            let end = starts
                .iter()
                .copied()
                .find(|next| *next > start)
                .unwrap_or(run.len());
            run.get(start..end).map(str::to_string)
        };

        let mut seen = Vec::new();
        for (info, position) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
            let cluster = usize::try_from(info.cluster).unwrap_or(usize::MAX);
            let text = if seen.contains(&cluster) {
                None
            } else {
                seen.push(cluster);
                cluster_text(cluster)
            };
            glyphs.push(Glyph {
                id: u16::try_from(info.glyph_id).unwrap_or(0),
                advance: position.x_advance,
                text,
            });
        }
    }

    /// Width of `text` set at `size` points.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        let units: i32 = self.shape(text).iter().map(|glyph| glyph.advance).sum();
        self.thousandths(units) * size / 1000.0
    }

    /// Default advance of a glyph in thousandths of the font size, as the
    /// `W` array declares it.
    pub fn glyph_width(&self, id: u16) -> f32 {
        let advance = self
            .face
            .glyph_hor_advance(ttf_parser::GlyphId(id))
            .unwrap_or(0);
        self.thousandths(i32::from(advance))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn thousandths(&self, units: i32) -> f32 {
        units as f32 * 1000.0 / self.units_per_em
    }

    fn metric(&self, units: i16) -> Object {
        Object::Real(self.thousandths(i32::from(units)))
    }
}

/// Glyphs drawn with one face, and the text each one stands for.
#[derive(Debug, Default)]
pub(super) struct GlyphUsage {
    glyphs: BTreeMap<u16, Option<String>>,
}

impl GlyphUsage {
    pub fn record(&mut self, glyph: &Glyph) {
        let entry = self.glyphs.entry(glyph.id).or_insert(None);
        if entry.is_none() {
            entry.clone_from(&glyph.text);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Add the font objects for `face` to `doc` and return the `Type0` font.
pub(super) fn embed(doc: &mut Document, face: &Typeface<'_>, usage: &GlyphUsage) -> ObjectId {
    let data_len = i64::try_from(face.data.len()).unwrap_or(i64::MAX);
    let file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => data_len },
        face.data.to_vec(),
    ));

    let bbox = face.face.global_bounding_box();
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(face.name.clone().into_bytes()),
        "Flags" => 32,
        "FontBBox" => vec![
            face.metric(bbox.x_min),
            face.metric(bbox.y_min),
            face.metric(bbox.x_max),
            face.metric(bbox.y_max),
        ],
        "ItalicAngle" => 0,
        "Ascent" => face.metric(face.face.ascender()),
        "Descent" => face.metric(face.face.descender()),
        "CapHeight" => face.metric(face.face.capital_height().unwrap_or(face.face.ascender())),
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    let mut widths = Vec::with_capacity(usage.glyphs.len() * 2);
    for id in usage.glyphs.keys() {
        widths.push(Object::Integer(i64::from(*id)));
        widths.push(vec![Object::Real(face.glyph_width(*id))].into());
    }

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(face.name.clone().into_bytes()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "CIDToGIDMap" => "Identity",
        "W" => widths,
    });

    let to_unicode_id = doc.add_object(Stream::new(
        dictionary! {},
        to_unicode_cmap(usage).into_bytes(),
    ));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(face.name.clone().into_bytes()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

fn to_unicode_cmap(usage: &GlyphUsage) -> String {
    let mapped: Vec<(u16, &str)> = usage
        .glyphs
        .iter()
        .filter_map(|(id, text)| text.as_deref().map(|text| (*id, text)))
        .collect();

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    for chunk in mapped.chunks(CMAP_CHUNK) {
        let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
        for (id, text) in chunk {
            let _ = writeln!(cmap, "<{id:04X}> <{}>", utf16_hex(text));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

fn utf16_hex(text: &str) -> String {
    text.encode_utf16().fold(String::new(), |mut hex, unit| {
        let _ = write!(hex, "{unit:04X}");
        hex
    })
}

/// `text` as a UTF-16BE string with a byte order mark, the encoding PDF
/// uses for text strings outside PDFDocEncoding.
pub(super) fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Two-byte `Identity-H` code of a glyph.
pub(super) fn glyph_code(id: u16) -> [u8; 2] {
    id.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_text_keeps_logical_order() {
        let fonts = PdfFonts::default();
        let faces = fonts.faces().unwrap();
        let glyphs = faces.regular.shape("ab");
        let texts: Vec<_> = glyphs.iter().filter_map(|g| g.text.as_deref()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(glyphs.iter().all(|g| g.id != 0 && g.advance > 0));
    }

    #[test]
    fn arabic_is_shaped_right_to_left() {
        let fonts = PdfFonts::default();
        let faces = fonts.faces().unwrap();
        let glyphs = faces.regular.shape("بت");
        assert!(glyphs.iter().all(|g| g.id != 0));
        let texts: Vec<_> = glyphs.iter().filter_map(|g| g.text.as_deref()).collect();
        // Visual order puts the last letter first.
        assert_eq!(texts, vec!["ت", "ب"]);
        // Joined forms differ from the isolated letters.
        assert_ne!(glyphs[0].id, faces.regular.shape("ت")[0].id);
        assert_ne!(glyphs[1].id, faces.regular.shape("ب")[0].id);
    }

    #[test]
    fn mixed_line_keeps_numbers_left_to_right() {
        let fonts = PdfFonts::default();
        let faces = fonts.faces().unwrap();
        let texts: String = faces
            .regular
            .shape("درس 12")
            .iter()
            .filter_map(|g| g.text.clone())
            .collect();
        assert!(texts.starts_with("12"), "{texts}");
    }

    #[test]
    fn bold_face_is_wider() {
        let fonts = PdfFonts::default();
        let faces = fonts.faces().unwrap();
        assert!(faces.bold.width("Worksheet", 11.0) > faces.regular.width("Worksheet", 11.0));
        assert!(faces.regular.width("ورقة عمل", 11.0) > 0.0);
    }

    #[test]
    fn to_unicode_maps_recorded_glyphs() {
        let mut usage = GlyphUsage::default();
        usage.record(&Glyph {
            id: 0x01A2,
            advance: 0,
            text: Some("لا".to_string()),
        });
        usage.record(&Glyph {
            id: 7,
            advance: 0,
            text: None,
        });
        let cmap = to_unicode_cmap(&usage);
        assert!(cmap.contains("1 beginbfchar\n<01A2> <06440627>\nendbfchar"));
        assert!(!cmap.contains("<0007>"));
    }

    #[test]
    fn text_strings_are_utf16_with_bom() {
        assert_eq!(
            text_string("aب"),
            Object::String(
                vec![0xFE, 0xFF, 0x00, 0x61, 0x06, 0x28],
                StringFormat::Hexadecimal
            )
        );
    }

    #[test]
    fn loading_a_file_that_is_not_a_font_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(
            PdfFonts::load(&path, &path),
            Err(ExportError::Font(_))
        ));
    }

    #[test]
    fn rejects_data_that_is_not_a_font() {
        assert!(matches!(
            Typeface::parse(b"not a font"),
            Err(ExportError::Font(_))
        ));
    }
}
