//! Main document body walker (`word/document.xml`).
//!
//! Produces body blocks in document order. Images are attached after the
//! top-level paragraph or table that draws them; tables nested inside a
//! cell are flattened into that cell's text.

use super::styles::StyleSheet;
use super::xml::{attr, is_on, text};
use crate::error::Result;
use crate::model::{Block, Paragraph, Table, TableCell, TableRow, TextRun, TextStyle};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Elements whose content never reaches the output.
///
/// `mc:Fallback` repeats the content of the preceding `mc:Choice` for older
/// readers, text boxes are positioned outside the paragraph flow, and the
/// `*PrChange` elements hold properties superseded by a tracked change.
const SKIPPED_ELEMENTS: &[&[u8]] = &[
    b"mc:Fallback",
    b"w:txbxContent",
    b"w:pPrChange",
    b"w:rPrChange",
];

/// Walk a main document part and collect its body blocks.
pub(crate) fn walk_body(xml: &[u8], styles: &StyleSheet) -> Result<Vec<Block>> {
    let mut reader = Reader::from_reader(xml);
    // xml:space="preserve" runs carry meaningful leading and trailing spaces
    reader.config_mut().trim_text(false);

    let mut walker = BodyWalker::new(styles);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => walker.handle_start(e),
            Event::Empty(ref e) => {
                walker.handle_start(e);
                walker.handle_end(e.name().as_ref());
            }
            Event::End(ref e) => walker.handle_end(e.name().as_ref()),
            Event::Text(ref e) => {
                if walker.wants_text() {
                    let content = text(e)?;
                    walker.handle_text(&content);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.finish())
}

#[derive(Debug, Default)]
struct ParagraphBuilder {
    paragraph: Paragraph,
    style_id: Option<String>,
}

#[derive(Debug, Default)]
struct TableBuilder {
    table: Table,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

struct BodyWalker<'a> {
    styles: &'a StyleSheet,
    blocks: Vec<Block>,
    skip_depth: usize,
    paragraph: Option<ParagraphBuilder>,
    tables: Vec<TableBuilder>,
    in_run: bool,
    in_run_props: bool,
    in_text: bool,
    in_drawing: bool,
    run_style: TextStyle,
    drawing_alt: Option<String>,
    pending_images: Vec<Block>,
}

impl<'a> BodyWalker<'a> {
    fn new(styles: &'a StyleSheet) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
            skip_depth: 0,
            paragraph: None,
            tables: Vec::new(),
            in_run: false,
            in_run_props: false,
            in_text: false,
            in_drawing: false,
            run_style: TextStyle::default(),
            drawing_alt: None,
            pending_images: Vec::new(),
        }
    }

    fn wants_text(&self) -> bool {
        self.in_text && self.skip_depth == 0 && self.paragraph.is_some()
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let name = name.as_ref();
        if SKIPPED_ELEMENTS.contains(&name) {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"w:tbl" => self.tables.push(TableBuilder::default()),
            b"w:tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.row = Some(TableRow::default());
                }
            }
            b"w:tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.cell = Some(TableCell::new());
                }
            }
            b"w:p" => self.paragraph = Some(ParagraphBuilder::default()),
            b"w:pStyle" if !self.in_run => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.style_id = attr(e, b"w:val");
                }
            }
            b"m:oMathPara" => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.paragraph.display_math = true;
                }
            }
            b"w:r" | b"m:r" => {
                self.in_run = true;
                self.run_style = TextStyle::default();
            }
            b"w:rPr" if self.in_run => self.in_run_props = true,
            b"w:b" if self.in_run_props => self.run_style.bold = is_on(e),
            b"w:i" if self.in_run_props => self.run_style.italic = is_on(e),
            b"w:u" if self.in_run_props => {
                self.run_style.underline = attr(e, b"w:val").map_or(true, |v| v != "none");
            }
            b"w:strike" | b"w:dstrike" if self.in_run_props => {
                self.run_style.strikethrough = is_on(e);
            }
            b"w:vertAlign" if self.in_run_props => {
                let value = attr(e, b"w:val");
                self.run_style.superscript = value.as_deref() == Some("superscript");
                self.run_style.subscript = value.as_deref() == Some("subscript");
            }
            b"w:t" | b"m:t" if self.in_run => self.in_text = true,
            b"w:tab" if self.in_run && !self.in_run_props => self.push_text("\t"),
            b"w:br" if self.in_run && !self.in_run_props => {
                if attr(e, b"w:type").as_deref() != Some("page") {
                    if let Some(p) = self.paragraph.as_mut() {
                        p.paragraph.add_line_break();
                    }
                }
            }
            b"w:cr" if self.in_run => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.paragraph.add_line_break();
                }
            }
            b"w:drawing" => {
                self.in_drawing = true;
                self.drawing_alt = None;
            }
            b"wp:docPr" if self.in_drawing => {
                self.drawing_alt = attr(e, b"descr")
                    .filter(|d| !d.is_empty())
                    .or_else(|| attr(e, b"title").filter(|t| !t.is_empty()));
            }
            b"a:blip" => {
                if let Some(rel_id) = attr(e, b"r:embed") {
                    self.queue_image(rel_id, self.drawing_alt.clone());
                }
            }
            b"v:imagedata" => {
                if let Some(rel_id) = attr(e, b"r:id") {
                    self.queue_image(rel_id, attr(e, b"o:title").filter(|t| !t.is_empty()));
                }
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, name: &[u8]) {
        if SKIPPED_ELEMENTS.contains(&name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"w:t" | b"m:t" => self.in_text = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:r" | b"m:r" => {
                self.in_run = false;
                self.in_run_props = false;
                self.in_text = false;
            }
            b"w:drawing" => self.in_drawing = false,
            b"w:p" => self.finish_paragraph(),
            b"w:tc" => {
                if let Some(table) = self.tables.last_mut() {
                    if let (Some(cell), Some(row)) = (table.cell.take(), table.row.as_mut()) {
                        row.cells.push(cell);
                    }
                }
            }
            b"w:tr" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(row) = table.row.take() {
                        table.table.add_row(row);
                    }
                }
            }
            b"w:tbl" => self.finish_table(),
            _ => {}
        }
    }

    fn handle_text(&mut self, content: &str) {
        self.push_text(content);
    }

    fn push_text(&mut self, content: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.paragraph
                .add_run(TextRun::with_style(content, self.run_style));
        }
    }

    fn queue_image(&mut self, rel_id: String, alt_text: Option<String>) {
        self.pending_images.push(Block::Image { rel_id, alt_text });
    }

    fn finish_paragraph(&mut self) {
        let Some(builder) = self.paragraph.take() else {
            return;
        };
        let mut paragraph = builder.paragraph;
        paragraph.style_name = Some(self.styles.resolve(builder.style_id.as_deref()));

        match self.tables.last_mut() {
            Some(table) => match table.cell.as_mut() {
                Some(cell) => cell.add_paragraph(paragraph),
                None => log::debug!("Dropping paragraph outside of a table cell"),
            },
            None => {
                self.blocks.push(Block::Paragraph(paragraph));
                self.flush_images();
            }
        }
    }

    fn finish_table(&mut self) {
        let Some(builder) = self.tables.pop() else {
            return;
        };
        let table = builder.table;

        match self.tables.last_mut() {
            Some(outer) => {
                log::debug!("Flattening nested table with {} rows", table.row_count());
                if let Some(cell) = outer.cell.as_mut() {
                    for row in &table.rows {
                        let texts: Vec<String> = row
                            .cells
                            .iter()
                            .map(TableCell::plain_text)
                            .filter(|t| !t.is_empty())
                            .collect();
                        cell.add_paragraph(Paragraph::with_text(texts.join(" ")));
                    }
                }
            }
            None => {
                self.blocks.push(Block::Table(table));
                self.flush_images();
            }
        }
    }

    fn flush_images(&mut self) {
        self.blocks.append(&mut self.pending_images);
    }

    fn finish(mut self) -> Vec<Block> {
        if self.paragraph.is_some() {
            self.finish_paragraph();
        }
        self.flush_images();
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
  xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
  xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math"
  xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
  xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
  xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
<w:body>{}<w:sectPr/></w:body></w:document>"#,
            inner
        )
    }

    fn walk(inner: &str) -> Vec<Block> {
        let mut styles = StyleSheet::new();
        styles.add_style("Heading1", "heading 1");
        walk_body(body(inner).as_bytes(), &styles).unwrap()
    }

    #[test]
    fn test_paragraph_styles_resolved() {
        let blocks = walk(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">Body </w:t></w:r><w:r><w:t>text</w:t></w:r></w:p>"#,
        );
        assert_eq!(blocks.len(), 2);
        let heading = blocks[0].as_paragraph().unwrap();
        assert_eq!(heading.style_name(), Some("Heading 1"));
        assert_eq!(heading.plain_text(), "Intro");
        let body = blocks[1].as_paragraph().unwrap();
        assert_eq!(body.style_name(), Some("Normal"));
        assert_eq!(body.plain_text(), "Body text");
    }

    #[test]
    fn test_run_formatting() {
        let blocks = walk(
            r#"<w:p><w:r><w:rPr><w:b/><w:i w:val="0"/></w:rPr><w:t>bold</w:t></w:r><w:r><w:rPr><w:vertAlign w:val="superscript"/></w:rPr><w:t>2</w:t></w:r></w:p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.runs.len(), 2);
        assert!(p.runs[0].style.bold);
        assert!(!p.runs[0].style.italic);
        assert!(p.runs[1].style.superscript);
    }

    #[test]
    fn test_breaks_and_tabs() {
        let blocks = walk(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        assert_eq!(blocks[0].plain_text(), "a\tb\nc");
    }

    #[test]
    fn test_entities_unescaped() {
        let blocks = walk(r#"<w:p><w:r><w:t>R&amp;D &lt;50%&gt;</w:t></w:r></w:p>"#);
        assert_eq!(blocks[0].plain_text(), "R&D <50%>");
    }

    #[test]
    fn test_table_rows_and_cells() {
        let blocks = walk(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>1</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(blocks.len(), 1);
        let table = blocks[0].as_table().unwrap();
        assert_eq!(
            table.text_grid(),
            vec![vec!["A".to_string(), "B".to_string()], vec!["1".to_string(), String::new()]]
        );
    }

    #[test]
    fn test_nested_table_flattened() {
        let blocks = walk(
            r#"<w:tbl><w:tr><w:tc><w:tbl><w:tr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>y</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(blocks.len(), 1);
        let table = blocks[0].as_table().unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.text_grid(), vec![vec!["x y".to_string()]]);
    }

    #[test]
    fn test_drawing_queued_after_paragraph() {
        let blocks = walk(
            r#"<w:p><w:r><w:t>Figure follows</w:t></w:r><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" descr="A chart"/><a:graphic><a:graphicData><a:blip r:embed="rId5"/></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "Figure follows");
        match &blocks[1] {
            Block::Image { rel_id, alt_text } => {
                assert_eq!(rel_id, "rId5");
                assert_eq!(alt_text.as_deref(), Some("A chart"));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_content_skipped() {
        let blocks = walk(
            r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><a:blip r:embed="rId7"/></w:drawing></mc:Choice><mc:Fallback><w:pict><v:imagedata r:id="rId7"/></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        );
        let images = blocks
            .iter()
            .filter(|b| matches!(b, Block::Image { .. }))
            .count();
        assert_eq!(images, 1);
    }

    #[test]
    fn test_tracked_paragraph_style_uses_current_value() {
        let blocks = walk(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:pPrChange w:id="1" w:author="A"><w:pPr><w:pStyle w:val="Normal"/></w:pPr></w:pPrChange></w:pPr><w:r><w:t>Results</w:t></w:r></w:p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.style_name(), Some("Heading 1"));
        assert_eq!(p.plain_text(), "Results");
    }

    #[test]
    fn test_tracked_run_formatting_uses_current_value() {
        let blocks = walk(
            r#"<w:p><w:r><w:rPr><w:i/><w:rPrChange w:id="2" w:author="A"><w:rPr><w:b/></w:rPr></w:rPrChange></w:rPr><w:t>plain now</w:t></w:r><w:r><w:rPr><w:rPrChange w:id="3" w:author="A"><w:rPr><w:u w:val="single"/></w:rPr></w:rPrChange></w:rPr><w:t> and this</w:t></w:r></w:p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.runs.len(), 2);
        assert!(p.runs[0].style.italic);
        assert!(!p.runs[0].style.bold);
        assert!(p.runs[1].style.is_plain());
        assert_eq!(p.plain_text(), "plain now and this");
    }

    #[test]
    fn test_display_math_paragraph() {
        let blocks = walk(
            r#"<w:p><m:oMathPara><m:oMath><m:r><m:t>E=mc</m:t></m:r><m:sSup><m:e/><m:sup><m:r><m:t>2</m:t></m:r></m:sup></m:sSup></m:oMath></m:oMathPara></w:p>"#,
        );
        let p = blocks[0].as_paragraph().unwrap();
        assert!(p.display_math);
        assert_eq!(p.plain_text(), "E=mc2");
    }
}
