//! Parser tests on synthetic DOCX packages.

mod common;

use image::ImageFormat;
use pretty_assertions::assert_eq;

use common::{sample_image, DocxBuilder};
use docx2tex::{parse_bytes, parse_bytes_with_options, parse_reader, Block, Error, ParseOptions};

#[test]
fn test_blocks_in_document_order() {
    let data = DocxBuilder::new()
        .heading("Title", 1)
        .paragraph("Body")
        .table(&[&["A", "B"], &["C", "D"]])
        .image("rId3", "pic.png", sample_image(ImageFormat::Png))
        .build();

    let doc = parse_bytes(&data).unwrap();
    let kinds: Vec<&str> = doc
        .blocks
        .iter()
        .map(|b| match b {
            Block::Paragraph(p) if p.is_empty() => "empty",
            Block::Paragraph(_) => "paragraph",
            Block::Table(_) => "table",
            Block::Image { .. } => "image",
        })
        .collect();
    assert_eq!(kinds, vec!["paragraph", "paragraph", "table", "empty", "image"]);

    let heading = doc.paragraphs().next().unwrap();
    assert_eq!(heading.style_name(), Some("Heading 1"));
    assert_eq!(heading.plain_text(), "Title");

    let table = doc.tables().next().unwrap();
    assert_eq!(table.text_grid(), vec![vec!["A", "B"], vec!["C", "D"]]);
}

#[test]
fn test_image_payloads_loaded_in_table_order() {
    let png = sample_image(ImageFormat::Png);
    let data = DocxBuilder::new()
        .embedded_image("rId9", "second.png", png.clone())
        .dangling_image("rId2", "missing.png")
        .build();

    let doc = parse_bytes(&data).unwrap();
    let images: Vec<_> = doc.image_relationships().collect();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].id, "rId9");
    assert_eq!(images[0].data.as_deref(), Some(png.as_slice()));
    assert_eq!(images[1].id, "rId2");
    assert!(images[1].data.is_none());
}

#[test]
fn test_payloads_skipped_without_resource_extraction() {
    let data = DocxBuilder::new()
        .embedded_image("rId1", "a.png", sample_image(ImageFormat::Png))
        .build();

    let doc = parse_bytes_with_options(&data, ParseOptions::new().with_resources(false)).unwrap();
    assert!(doc.image_relationships().all(|r| r.data.is_none()));
}

#[test]
fn test_malformed_styles_lenient_and_strict() {
    let builder = DocxBuilder::new()
        .styles("<w:styles><w:style></w:styles>")
        .heading("Title", 1);
    let data = builder.build();

    let doc = parse_bytes(&data).unwrap();
    // Without a style sheet the raw style ID is kept.
    assert_eq!(doc.paragraphs().next().unwrap().style_name(), Some("Heading1"));

    let strict = parse_bytes_with_options(&data, ParseOptions::new().strict());
    assert!(matches!(strict, Err(Error::Xml(_))));
}

#[test]
fn test_core_properties() {
    let data = DocxBuilder::new().title("Findings").paragraph("x").build();
    let doc = parse_reader(std::io::Cursor::new(data)).unwrap();

    assert_eq!(doc.metadata.title.as_deref(), Some("Findings"));
    assert_eq!(doc.metadata.author.as_deref(), Some("Ada Lovelace"));
    assert!(doc.metadata.created.is_some());
}

#[test]
fn test_zip_without_main_part_rejected() {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"hello").unwrap();
    let data = zip.finish().unwrap().into_inner();

    assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
}
