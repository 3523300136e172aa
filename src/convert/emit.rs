//! Emission passes: paragraphs, tables, figures and equations.

use std::collections::HashSet;

use crate::model::{Block, Paragraph, Table};
use crate::render::Command;

use super::classify::{classify_paragraph, StyleClass};
use super::context::{ConversionContext, ProjectLayout};

/// Emit headings and body paragraphs in document order.
///
/// Equation paragraphs are collected for [`emit_equations`].
pub fn emit_paragraphs(ctx: &mut ConversionContext<'_>) {
    let document = ctx.document;
    for paragraph in document.paragraphs() {
        if let Some(body) = emit_paragraph(ctx, paragraph) {
            ctx.equations.push(body);
        }
    }
}

/// Emit one paragraph; returns the raw body of an equation paragraph instead of emitting it.
fn emit_paragraph(ctx: &mut ConversionContext<'_>, paragraph: &Paragraph) -> Option<String> {
    match classify_paragraph(paragraph) {
        StyleClass::Heading(level) => {
            let title = paragraph.plain_text().replace('\n', " ");
            ctx.stats.count_text(&title);
            ctx.stats.add_heading();
            if level == 1 {
                ctx.buffer.section(title);
            } else {
                ctx.buffer.subsection(title);
            }
            None
        }
        StyleClass::Body => {
            if paragraph.is_empty() {
                return None;
            }
            ctx.stats.count_text(&paragraph.plain_text());
            ctx.stats.add_paragraph();
            ctx.buffer.text(paragraph.runs.clone());
            ctx.buffer.paragraph_break();
            None
        }
        StyleClass::Equation => {
            let body = paragraph.plain_text();
            if body.trim().is_empty() {
                None
            } else {
                Some(body)
            }
        }
    }
}

/// Emit every table as a captioned float.
pub fn emit_tables(ctx: &mut ConversionContext<'_>) {
    let document = ctx.document;
    for table in document.tables() {
        emit_table(ctx, table);
    }
}

fn emit_table(ctx: &mut ConversionContext<'_>, table: &Table) {
    if table.is_empty() {
        log::debug!("Skipping table without rows or columns");
        return;
    }

    let columns = table.column_count();
    let mut grid = table.text_grid();
    for (index, row) in grid.iter_mut().enumerate() {
        if row.len() < columns {
            log::warn!(
                "Table row {} has {} cells, expected {}; padding with empty cells",
                index + 1,
                row.len(),
                columns
            );
            row.resize(columns, String::new());
        } else if row.len() > columns {
            log::warn!(
                "Table row {} has {} cells, expected {}; dropping extra cells",
                index + 1,
                row.len(),
                columns
            );
            row.truncate(columns);
        }
    }

    let number = ctx.next_table_number();
    let command = Command::Table {
        rows: grid,
        caption: format!("Table {}", number),
    };
    ctx.stats.count_text(&command.text());
    ctx.stats.add_table();
    ctx.buffer.push(command);
}

/// Emit a figure for every extracted image, in identifier order.
///
/// Only identifiers whose file exists on disk get a figure.
pub fn emit_figures(ctx: &mut ConversionContext<'_>) {
    let ids: Vec<usize> = ctx.resources.iter().map(|r| r.id).collect();
    for id in ids {
        emit_figure(ctx, id);
    }
}

fn emit_figure(ctx: &mut ConversionContext<'_>, id: usize) -> bool {
    if !ctx.image_exists(id) {
        log::warn!(
            "No file for image {} ({}); figure omitted",
            id,
            ProjectLayout::image_file_name(id)
        );
        return false;
    }
    ctx.stats.add_figure();
    ctx.buffer
        .figure(ProjectLayout::image_reference(id), format!("Image {}", id + 1));
    true
}

/// Emit the equations collected by the paragraph pass.
pub fn emit_equations(ctx: &mut ConversionContext<'_>) {
    let equations = std::mem::take(&mut ctx.equations);
    for body in equations {
        emit_equation(ctx, body);
    }
}

fn emit_equation(ctx: &mut ConversionContext<'_>, body: String) {
    ctx.stats.count_text(&body);
    ctx.stats.add_equation();
    ctx.buffer.equation(body);
}

/// Emit all blocks in a single document-order walk.
///
/// Figures appear where the image is first drawn; extracted images that are
/// never drawn in the body are appended at the end.
pub fn emit_inline(ctx: &mut ConversionContext<'_>) {
    let document = ctx.document;
    let mut placed: HashSet<usize> = HashSet::new();

    for block in &document.blocks {
        match block {
            Block::Paragraph(paragraph) => {
                if let Some(body) = emit_paragraph(ctx, paragraph) {
                    emit_equation(ctx, body);
                }
            }
            Block::Table(table) => emit_table(ctx, table),
            Block::Image { rel_id, .. } => {
                let Some(id) = ctx.resource_for(rel_id).map(|r| r.id) else {
                    log::debug!("Drawing references unknown image relationship {}", rel_id);
                    continue;
                };
                if placed.insert(id) {
                    emit_figure(ctx, id);
                }
            }
        }
    }

    let remaining: Vec<usize> = ctx
        .resources
        .iter()
        .map(|r| r.id)
        .filter(|id| !placed.contains(id))
        .collect();
    for id in remaining {
        emit_figure(ctx, id);
    }
}
