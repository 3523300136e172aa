//! Synthetic DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const IMAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/></w:style>
  <w:style w:type="paragraph" w:styleId="HeadingZ"><w:name w:val="Heading Z"/></w:style>
  <w:style w:type="paragraph" w:styleId="Equation"><w:name w:val="Equation"/></w:style>
</w:styles>"#;

/// Encode a small solid-color image.
pub fn sample_image(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 3, Rgb([20, 120, 220]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, xml_escape(text))
}

fn paragraph(text: &str, style_id: Option<&str>) -> String {
    let props = style_id
        .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, id))
        .unwrap_or_default();
    format!("<w:p>{}{}</w:p>", props, run(text))
}

/// Builder for an in-memory `.docx` package.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    relationships: Vec<(String, String)>,
    media: Vec<(String, Vec<u8>)>,
    title: Option<String>,
    styles: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, text: &str, level: u8) -> Self {
        self.body.push_str(&paragraph(text, Some(&format!("Heading{}", level))));
        self
    }

    pub fn styled(mut self, text: &str, style_id: &str) -> Self {
        self.body.push_str(&paragraph(text, Some(style_id)));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&paragraph(text, None));
        self
    }

    /// Append raw body XML.
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn table(mut self, rows: &[&[&str]]) -> Self {
        self.body.push_str("<w:tbl>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in *row {
                self.body.push_str(&format!("<w:tc>{}</w:tc>", paragraph(cell, None)));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    /// Embed an image part and draw it in its own paragraph.
    pub fn image(self, rel_id: &str, name: &str, data: Vec<u8>) -> Self {
        self.embedded_image(rel_id, name, data).drawing(rel_id)
    }

    /// Embed an image part without drawing it.
    pub fn embedded_image(mut self, rel_id: &str, name: &str, data: Vec<u8>) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("media/{}", name)));
        self.media.push((format!("word/media/{}", name), data));
        self
    }

    /// Declare an image relationship whose part is absent from the package.
    pub fn dangling_image(mut self, rel_id: &str, name: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("media/{}", name)));
        self
    }

    pub fn drawing(mut self, rel_id: &str) -> Self {
        self.body.push_str(&format!(
            concat!(
                r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture"/>"#,
                r#"<a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/>"#,
                r#"</pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
            ),
            rel_id
        ));
        self
    }

    /// Replace the style sheet part.
    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn document_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<w:document xmlns:w="{}" "#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
                r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
                r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
                r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
                r#"xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math">"#,
                "<w:body>{}</w:body></w:document>"
            ),
            W_NS, self.body
        )
    }

    fn relationships_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        xml.push_str(r#"<Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#);
        for (id, target) in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, IMAGE_REL, target
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn core_xml(title: &str) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
                r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                "<dc:title>{}</dc:title><dc:creator>Ada Lovelace</dc:creator>",
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-05T10:00:00Z</dcterms:created>"#,
                "</cp:coreProperties>"
            ),
            xml_escape(title)
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut parts: Vec<(String, Vec<u8>)> = vec![
            ("word/document.xml".to_string(), self.document_xml().into_bytes()),
            (
                "word/styles.xml".to_string(),
                self.styles.as_deref().unwrap_or(STYLES).as_bytes().to_vec(),
            ),
            (
                "word/_rels/document.xml.rels".to_string(),
                self.relationships_xml().into_bytes(),
            ),
        ];
        if let Some(title) = &self.title {
            parts.push(("docProps/core.xml".to_string(), Self::core_xml(title).into_bytes()));
        }
        parts.extend(self.media.iter().cloned());

        for (name, data) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(&data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}
