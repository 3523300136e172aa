//! LaTeX writer.

use crate::error::{Error, Result};
use crate::model::{Metadata, TextRun, TextStyle};

use super::escape::{escape_math, escape_text};
use super::{Command, MarkupBuffer, RenderOptions};

/// Packages every generated document loads.
const STANDARD_PACKAGES: &[(&str, Option<&str>)] = &[
    ("fontenc", Some("T1")),
    ("inputenc", Some("utf8")),
    ("lmodern", None),
    ("textcomp", None),
    ("graphicx", None),
    ("amsmath", None),
    ("ulem", Some("normalem")),
];

/// Serializes a markup buffer into a target syntax.
pub trait MarkupWriter {
    /// Write the complete document into `output`.
    fn write_into(
        &mut self,
        buffer: &MarkupBuffer,
        metadata: &Metadata,
        output: &mut String,
    ) -> Result<()>;

    /// Write the complete document into a new string.
    fn write_string(&mut self, buffer: &MarkupBuffer, metadata: &Metadata) -> Result<String> {
        let mut output = String::new();
        self.write_into(buffer, metadata, &mut output)?;
        Ok(output)
    }
}

/// Convert a markup buffer to a LaTeX document.
pub fn to_latex(buffer: &MarkupBuffer, metadata: &Metadata, options: &RenderOptions) -> Result<String> {
    let mut writer = LatexWriter::new(options.clone());
    writer.write_string(buffer, metadata)
}

/// LaTeX writer.
#[derive(Debug, Clone, Default)]
pub struct LatexWriter {
    options: RenderOptions,
}

impl LatexWriter {
    /// Create a new LaTeX writer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn write_preamble(&self, metadata: &Metadata, output: &mut String) {
        output.push_str(&format!("\\documentclass{{{}}}\n", self.options.document_class));
        for (package, option) in STANDARD_PACKAGES {
            match option {
                Some(option) => output.push_str(&format!("\\usepackage[{}]{{{}}}\n", option, package)),
                None => output.push_str(&format!("\\usepackage{{{}}}\n", package)),
            }
        }
        for package in &self.options.extra_packages {
            output.push_str(&format!("\\usepackage{{{}}}\n", package));
        }

        if self.has_title_block(metadata) {
            output.push('\n');
            if let Some(ref title) = metadata.title {
                output.push_str(&format!("\\title{{{}}}\n", escape_text(title)));
            }
            let author = metadata.author.as_deref().map(escape_text).unwrap_or_default();
            output.push_str(&format!("\\author{{{}}}\n", author));
            let date = metadata
                .display_date()
                .map(|d| d.format("%B %-d, %Y").to_string())
                .unwrap_or_default();
            output.push_str(&format!("\\date{{{}}}\n", date));
        }
        output.push('\n');
    }

    fn has_title_block(&self, metadata: &Metadata) -> bool {
        self.options.include_title_block && metadata.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    fn write_command(&self, command: &Command, output: &mut String) -> Result<()> {
        match command {
            Command::Section(title) => {
                output.push_str(&format!("\\section{{{}}}\n\n", escape_text(title.trim())));
            }
            Command::Subsection(title) => {
                output.push_str(&format!("\\subsection{{{}}}\n\n", escape_text(title.trim())));
            }
            Command::Text(runs) => {
                for run in runs {
                    write_run(run, output);
                }
            }
            Command::ParagraphBreak => output.push_str("\n\n"),
            Command::Table { rows, caption } => self.write_table(rows, caption, output)?,
            Command::Figure { path, caption } => {
                output.push_str(&format!("\\begin{{figure}}[{}]\n", self.options.float_placement));
                output.push_str("\\centering\n");
                output.push_str(&format!(
                    "\\includegraphics[width={}\\textwidth]{{{}}}\n",
                    self.options.figure_width, path
                ));
                output.push_str(&format!("\\caption{{{}}}\n", escape_text(caption)));
                output.push_str("\\end{figure}\n\n");
            }
            Command::Equation(body) => {
                output.push_str(&format!("\\[ {} \\]\n\n", escape_math(body.trim())));
            }
        }
        Ok(())
    }

    fn write_table(&self, rows: &[Vec<String>], caption: &str, output: &mut String) -> Result<()> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(Error::Render("table has no columns".to_string()));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != columns) {
            return Err(Error::Render(format!(
                "table row {} has {} cells, expected {}",
                bad + 1,
                rows[bad].len(),
                columns
            )));
        }

        output.push_str(&format!("\\begin{{table}}[{}]\n", self.options.float_placement));
        output.push_str("\\centering\n");
        output.push_str(&format!("\\begin{{tabular}}{{|{}|}}\n", vec!["c"; columns].join("|")));
        output.push_str("\\hline\n");
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| escape_text(c.trim())).collect();
            output.push_str(&cells.join(" & "));
            output.push_str(" \\\\ \\hline\n");
        }
        output.push_str("\\end{tabular}\n");
        output.push_str(&format!("\\caption{{{}}}\n", escape_text(caption)));
        output.push_str("\\end{table}\n\n");
        Ok(())
    }
}

impl MarkupWriter for LatexWriter {
    fn write_into(
        &mut self,
        buffer: &MarkupBuffer,
        metadata: &Metadata,
        output: &mut String,
    ) -> Result<()> {
        self.write_preamble(metadata, output);
        output.push_str("\\begin{document}\n\n");
        if self.has_title_block(metadata) {
            output.push_str("\\maketitle\n\n");
        }

        for command in buffer {
            self.write_command(command, output)?;
        }

        let content_len = output.trim_end_matches('\n').len();
        output.truncate(content_len);
        output.push_str("\n\n\\end{document}\n");
        Ok(())
    }
}

/// Write one run with its formatting; explicit line breaks become `\newline`.
fn write_run(run: &TextRun, output: &mut String) {
    let body = run
        .text
        .split('\n')
        .map(escape_text)
        .collect::<Vec<_>>()
        .join("\\newline ");
    output.push_str(&apply_style(&body, &run.style));
}

fn apply_style(text: &str, style: &TextStyle) -> String {
    if style.is_plain() || text.trim().is_empty() {
        return text.to_string();
    }

    let mut result = text.to_string();
    let wrappers = [
        (style.subscript, "\\textsubscript"),
        (style.superscript, "\\textsuperscript"),
        (style.strikethrough, "\\sout"),
        (style.underline, "\\underline"),
        (style.italic, "\\textit"),
        (style.bold, "\\textbf"),
    ];
    for (enabled, command) in wrappers {
        if enabled {
            result = format!("{}{{{}}}", command, result);
        }
    }
    result
}
