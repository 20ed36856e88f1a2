mod common;

use common::{activity_json, artifact, letterhead, long_worksheet, worksheet_json};
use lesson_export::{compose, DocumentFormat, DocxExporter, Exporter, Labels, MemorySink};
use quick_xml::{events::Event, Reader};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

/// Text of every `w:t` element, in document order.
fn paragraph_texts(document_xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(document_xml);
    let mut texts = Vec::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(e) if in_text => texts.push(e.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    texts
}

#[test]
fn package_has_the_word_parts() {
    let exporter = DocxExporter::new(letterhead());
    let bytes = exporter.render(&artifact(&worksheet_json())).unwrap();

    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }
    assert!(read_part(&bytes, "[Content_Types].xml").contains("wordprocessingml.document.main+xml"));
}

#[test]
fn document_text_matches_composed_blocks() {
    let artifact = artifact(&activity_json());
    let exporter = DocxExporter::new(letterhead()).with_labels(Labels::english());
    let bytes = exporter.render(&artifact).unwrap();

    let expected: Vec<String> = compose(&artifact, &letterhead(), &Labels::english())
        .unwrap()
        .into_iter()
        .map(|block| block.text)
        .collect();
    assert_eq!(paragraph_texts(&read_part(&bytes, "word/document.xml")), expected);
}

#[test]
fn activity_document_has_no_worksheet_content() {
    let exporter = DocxExporter::new(letterhead()).with_labels(Labels::english());
    let bytes = exporter.render(&artifact(&activity_json())).unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert!(!xml.contains("Worksheet Content:"));
    assert!(xml.contains("Competitive Game:"));
}

#[test]
fn arabic_paragraphs_are_right_to_left() {
    let exporter = DocxExporter::new(letterhead());
    let xml = String::from_utf8(exporter.document_xml(&artifact(&worksheet_json())).unwrap()).unwrap();
    assert!(xml.contains("<w:bidi/>"));
    assert!(xml.contains("محتوى ورقة العمل:"));
}

#[test]
fn rendering_is_byte_identical() {
    let exporter = DocxExporter::new(letterhead());
    let artifact = long_worksheet(40);
    assert_eq!(exporter.render(&artifact).unwrap(), exporter.render(&artifact).unwrap());
}

#[test]
fn export_delivers_named_docx() {
    let exporter = DocxExporter::new(letterhead()).with_labels(Labels::english());
    let mut sink = MemorySink::new();
    let name = exporter.export(&artifact(&worksheet_json()), &mut sink).unwrap();

    assert_eq!(name, "Worksheet_Motion Worksheet.docx");
    let file = sink.last().unwrap();
    assert_eq!(file.file_name, name);
    assert_eq!(file.mime_type, DocumentFormat::Docx.mime_type());
    assert!(file.bytes.starts_with(b"PK"));
}

#[test]
fn arabic_file_name_uses_underscored_kind() {
    let exporter = DocxExporter::new(letterhead());
    let mut sink = MemorySink::new();
    let name = exporter.export(&artifact(&worksheet_json()), &mut sink).unwrap();
    assert_eq!(name, "ورقة_عمل_Motion Worksheet.docx");
}
