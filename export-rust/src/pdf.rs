//! Paginated PDF writer.
//!
//! Blocks are placed top-down with a vertical cursor. A line that would
//! cross the bottom margin starts a new page; spacing above a block is
//! dropped at the top of a page. Every page carries a footer with the
//! institution name and `page N / M`, so pages are laid out before any
//! content stream is written.
//!
//! Text is shaped with embedded TrueType faces (see [`PdfFonts`]) and
//! lines are wrapped and aligned by their shaped width. Each line is
//! wrapped in a `/Span` marked-content sequence whose `ActualText` holds
//! the line in logical order, so extracted text reads as it was composed.

mod typeset;

pub use typeset::PdfFonts;

use crate::{
    layout::{compose, Align, Block, BlockKind, TWIPS_PER_POINT},
    DocumentFormat, ExportResult, Exporter, Labels, Letterhead,
};
use lesson_sdk::Artifact;
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, ObjectId, Stream, StringFormat,
};
use typeset::{Faces, GlyphUsage};

const LINE_HEIGHT: f32 = 1.4;
const FOOTER_SIZE: f32 = 9.0;
const RULE_WIDTH: f32 = 0.5;
/// Horizontal shear of synthesized italics.
const ITALIC_SKEW: f32 = 0.2;

/// Page geometry, in points.
/// # Default Values
/// - `width`: 595 (A4)
/// - `height`: 842 (A4)
/// - `margin`: 56
/// - `footer`: 24, reserved above the bottom margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub footer: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 56.0,
            footer: 24.0,
        }
    }
}

impl PageSetup {
    fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }

    fn bottom(&self) -> f32 {
        self.margin + self.footer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Font {
    fn of(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    #[must_use]
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    #[must_use]
    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }

    fn resource_name(self) -> &'static str {
        if self.is_bold() {
            "F2"
        } else {
            "F1"
        }
    }
}

/// One positioned item on a page. `y` is the text baseline or the rule
/// position, measured from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text {
        text: String,
        font: Font,
        size: f32,
        x: f32,
        y: f32,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

impl Page {
    /// Text of every line on the page, in placement order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text { text, .. } => Some(text.as_str()),
            PageItem::Rule { .. } => None,
        })
    }
}

/// Exports artifacts as paginated `.pdf` files.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    letterhead: Letterhead,
    labels: Labels,
    setup: PageSetup,
    fonts: PdfFonts,
}

impl PdfExporter {
    #[must_use]
    pub fn new(letterhead: Letterhead) -> Self {
        Self {
            letterhead,
            labels: Labels::default(),
            setup: PageSetup::default(),
            fonts: PdfFonts::default(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_page_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    #[must_use]
    pub fn with_fonts(mut self, fonts: PdfFonts) -> Self {
        self.fonts = fonts;
        self
    }

    /// Place the artifact's blocks on pages, without footers.
    pub fn layout(&self, artifact: &Artifact) -> ExportResult<Vec<Page>> {
        let faces = self.fonts.faces()?;
        let blocks = compose(artifact, &self.letterhead, &self.labels)?;
        Ok(paginate(&blocks, &self.setup, &faces))
    }

    fn footer(&self, number: usize, total: usize, faces: &Faces<'_>) -> PageItem {
        let text = format!(
            "{}  {} {number} / {total}",
            self.letterhead.institution, self.labels.page
        );
        let width = faces.regular.width(&text, FOOTER_SIZE);
        PageItem::Text {
            x: aligned_x(width, Align::Center, &self.setup),
            text,
            font: Font::Regular,
            size: FOOTER_SIZE,
            y: self.setup.margin,
        }
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn render(&self, artifact: &Artifact) -> ExportResult<Vec<u8>> {
        let faces = self.fonts.faces()?;
        let blocks = compose(artifact, &self.letterhead, &self.labels)?;
        let pages = paginate(&blocks, &self.setup, &faces);
        let total = pages.len();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut usage = [GlyphUsage::default(), GlyphUsage::default()];

        let mut kids: Vec<Object> = Vec::with_capacity(total);
        for (index, page) in pages.iter().enumerate() {
            let mut items = page.items.clone();
            items.push(self.footer(index + 1, total, &faces));

            let content = Content {
                operations: operations(&items, &faces, &mut usage),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let mut fonts = lopdf::Dictionary::new();
        let [regular_usage, bold_usage] = &usage;
        for (font, face, used) in [
            (Font::Regular, &faces.regular, regular_usage),
            (Font::Bold, &faces.bold, bold_usage),
        ] {
            if !used.is_empty() {
                fonts.set(font.resource_name(), typeset::embed(&mut doc, face, used));
            }
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let page_count = i64::try_from(total).unwrap_or(i64::MAX);
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count),
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    real(self.setup.width),
                    real(self.setup.height),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => typeset::text_string(&artifact.title),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn font_size(kind: BlockKind) -> f32 {
    match kind {
        BlockKind::Title => 20.0,
        BlockKind::Heading => 16.0,
        BlockKind::Subheading => 14.0,
        BlockKind::Text | BlockKind::Separator | BlockKind::AnswerRule => 11.0,
    }
}

fn points(twips: u32) -> f32 {
    // Spacing values are small, so the conversion is exact.
    #[allow(clippy::cast_precision_loss)]
    let twips = twips as f32;
    #[allow(clippy::cast_precision_loss)]
    let per_point = TWIPS_PER_POINT as f32;
    twips / per_point
}

fn aligned_x(width: f32, align: Align, setup: &PageSetup) -> f32 {
    let free = (setup.content_width() - width).max(0.0);
    match align {
        Align::Center => setup.margin + free / 2.0,
        Align::Right => setup.margin + free,
    }
}

/// Split `text` into lines no wider than `max_width`, breaking at
/// whitespace and splitting words that are wider than a line.
fn wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        if measure(&word) > max_width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let mut piece = String::new();
            for c in word.chars() {
                piece.push(c);
                if piece.chars().count() > 1 && measure(&piece) > max_width {
                    piece.pop();
                    lines.push(std::mem::replace(&mut piece, c.to_string()));
                }
            }
            word = piece;
        }

        if line.is_empty() {
            line = word;
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn paginate(blocks: &[Block], setup: &PageSetup, faces: &Faces<'_>) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut cursor = setup.top();

    for block in blocks {
        let size = font_size(block.kind);
        let line_height = size * LINE_HEIGHT;
        let is_rule = matches!(block.kind, BlockKind::Separator | BlockKind::AnswerRule);
        let font = Font::of(block.bold || is_heading(block.kind), block.italic);
        let face = faces.get(font.is_bold());

        #[allow(clippy::float_cmp)]
        let at_top = cursor == setup.top();
        if !at_top {
            cursor -= points(block.before);
        }

        let lines = if is_rule {
            vec![String::new()]
        } else {
            wrap(&block.text, setup.content_width(), |text| face.width(text, size))
        };

        for line in lines {
            if cursor - line_height < setup.bottom() {
                pages.push(Page::default());
                cursor = setup.top();
            }
            cursor -= line_height;

            let Some(page) = pages.last_mut() else {
                continue;
            };
            if is_rule {
                let y = cursor + line_height / 2.0;
                let (x1, x2) = match block.kind {
                    BlockKind::Separator => (setup.margin, setup.width - setup.margin),
                    _ => (setup.margin + setup.content_width() * 0.1, setup.width - setup.margin),
                };
                page.items.push(PageItem::Rule { x1, x2, y });
            } else {
                let x = aligned_x(face.width(&line, size), block.align, setup);
                page.items.push(PageItem::Text {
                    font,
                    text: line,
                    size,
                    x,
                    y: cursor + (line_height - size),
                });
            }
        }

        cursor -= points(block.after);
    }

    pages
}

fn is_heading(kind: BlockKind) -> bool {
    matches!(kind, BlockKind::Title | BlockKind::Heading | BlockKind::Subheading)
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn operations(
    items: &[PageItem],
    faces: &Faces<'_>,
    usage: &mut [GlyphUsage; 2],
) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in items {
        match item {
            PageItem::Text {
                text,
                font,
                size,
                x,
                y,
            } => {
                let skew = if font.is_italic() { ITALIC_SKEW } else { 0.0 };
                let used = &mut usage[usize::from(font.is_bold())];
                let shown = show_glyphs(faces.get(font.is_bold()), text, used);

                ops.push(Operation::new(
                    "BDC",
                    vec![
                        "Span".into(),
                        Object::Dictionary(dictionary! {
                            "ActualText" => typeset::text_string(text),
                        }),
                    ],
                ));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), real(*size)],
                ));
                ops.push(Operation::new(
                    "Tm",
                    vec![real(1.0), real(0.0), real(skew), real(1.0), real(*x), real(*y)],
                ));
                ops.push(Operation::new("TJ", vec![Object::Array(shown)]));
                ops.push(Operation::new("ET", vec![]));
                ops.push(Operation::new("EMC", vec![]));
            }
            PageItem::Rule { x1, x2, y } => {
                ops.push(Operation::new("w", vec![real(RULE_WIDTH)]));
                ops.push(Operation::new("m", vec![real(*x1), real(*y)]));
                ops.push(Operation::new("l", vec![real(*x2), real(*y)]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

/// `TJ` operands for `text`: glyph codes, with a position adjustment
/// wherever the shaped advance differs from the glyph's own width.
fn show_glyphs(
    face: &typeset::Typeface<'_>,
    text: &str,
    usage: &mut GlyphUsage,
) -> Vec<Object> {
    let mut shown = Vec::new();
    let mut codes = Vec::new();

    for glyph in face.shape(text) {
        usage.record(&glyph);
        codes.extend(typeset::glyph_code(glyph.id));
        let adjust = face.glyph_width(glyph.id) - face.thousandths(glyph.advance);
        if adjust.abs() > 0.01 {
            shown.push(Object::String(std::mem::take(&mut codes), StringFormat::Hexadecimal));
            shown.push(real(adjust));
        }
    }
    if !codes.is_empty() || shown.is_empty() {
        shown.push(Object::String(codes, StringFormat::Hexadecimal));
    }
    shown
}
