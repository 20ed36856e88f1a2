//! Word (Office Open XML) writer.
//!
//! A document is a ZIP package of XML parts. Only the parts Word needs to
//! open a styled document are written: content types, package
//! relationships, the main document, its relationships and the style sheet.

use crate::{
    layout::{compose, Align, Block, BlockKind},
    DocumentFormat, ExportResult, Exporter, Labels, Letterhead,
};
use lesson_sdk::Artifact;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::io::{Cursor, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipWriter};

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Font size of worksheet section titles, in half-points.
const SUBHEADING_SIZE: &str = "28";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="30"/><w:szCs w:val="30"/></w:rPr></w:style></w:styles>"#;

/// Exports artifacts as `.docx` files.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    letterhead: Letterhead,
    labels: Labels,
}

impl DocxExporter {
    #[must_use]
    pub fn new(letterhead: Letterhead) -> Self {
        Self {
            letterhead,
            labels: Labels::default(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// The `word/document.xml` part for an artifact.
    pub fn document_xml(&self, artifact: &Artifact) -> ExportResult<Vec<u8>> {
        let blocks = compose(artifact, &self.letterhead, &self.labels)?;
        write_document(&blocks)
    }
}

impl Exporter for DocxExporter {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn render(&self, artifact: &Artifact) -> ExportResult<Vec<u8>> {
        let document = self.document_xml(artifact)?;

        // Fixed timestamps keep the archive byte-identical across runs.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let parts: [(&str, &[u8]); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("word/document.xml", &document),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
        ];
        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn write_document(blocks: &[Block]) -> ExportResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORDPROCESSING_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        write_paragraph(&mut writer, block)?;
    }

    // A4 with one-inch margins.
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    empty(&mut writer, "w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    empty(
        &mut writer,
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, block: &Block) -> ExportResult<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    match block.kind {
        BlockKind::Title => empty(writer, "w:pStyle", &[("w:val", "Heading1")])?,
        BlockKind::Heading => empty(writer, "w:pStyle", &[("w:val", "Heading2")])?,
        _ => {}
    }
    // Children of w:pPr follow the schema sequence: pStyle, bidi, spacing, jc.
    let rtl = is_rtl(&block.text);
    let bidi = rtl && block.align == Align::Right;
    if bidi {
        // A right-to-left paragraph already starts at the right margin.
        empty(writer, "w:bidi", &[])?;
    }
    if block.before > 0 || block.after > 0 {
        let before = block.before.to_string();
        let after = block.after.to_string();
        empty(writer, "w:spacing", &[("w:before", &before), ("w:after", &after)])?;
    }
    match block.align {
        Align::Center => empty(writer, "w:jc", &[("w:val", "center")])?,
        Align::Right if !bidi => empty(writer, "w:jc", &[("w:val", "right")])?,
        Align::Right => {}
    }
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    if block.bold {
        empty(writer, "w:b", &[])?;
        empty(writer, "w:bCs", &[])?;
    }
    if block.italic {
        empty(writer, "w:i", &[])?;
        empty(writer, "w:iCs", &[])?;
    }
    if block.kind == BlockKind::Subheading {
        empty(writer, "w:sz", &[("w:val", SUBHEADING_SIZE)])?;
        empty(writer, "w:szCs", &[("w:val", SUBHEADING_SIZE)])?;
    }
    if rtl {
        empty(writer, "w:rtl", &[])?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

    writer.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(&block.text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn empty(writer: &mut Writer<Vec<u8>>, name: &str, attributes: &[(&str, &str)]) -> ExportResult<()> {
    writer.write_event(Event::Empty(
        BytesStart::new(name).with_attributes(attributes.iter().copied()),
    ))?;
    Ok(())
}

/// Text containing Hebrew or Arabic script.
fn is_rtl(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{0590}'..='\u{08FF}' | '\u{FB1D}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}'))
}
