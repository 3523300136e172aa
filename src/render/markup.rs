//! The markup buffer: structured commands awaiting serialization.
//!
//! Commands carry raw document text. Escaping happens only when a
//! [`MarkupWriter`](super::MarkupWriter) serializes the buffer.

use crate::model::TextRun;

/// One structured output command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Top-level section with a title
    Section(String),

    /// Second-level section with a title
    Subsection(String),

    /// Body text runs
    Text(Vec<TextRun>),

    /// End of a body paragraph
    ParagraphBreak,

    /// Bordered table float
    Table {
        /// Cell text, rows by columns
        rows: Vec<Vec<String>>,
        /// Caption text
        caption: String,
    },

    /// Figure float referencing an image file
    Figure {
        /// Path relative to the `.tex` file (e.g., "images/image0.png")
        path: String,
        /// Caption text
        caption: String,
    },

    /// Display-math block
    Equation(String),
}

impl Command {
    /// Get the raw text carried by this command, if any.
    pub fn text(&self) -> String {
        match self {
            Command::Section(t) | Command::Subsection(t) | Command::Equation(t) => t.clone(),
            Command::Text(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
            Command::Table { rows, .. } => rows
                .iter()
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join(" "),
            Command::ParagraphBreak | Command::Figure { .. } => String::new(),
        }
    }
}

/// Append-only sequence of output commands.
#[derive(Debug, Clone, Default)]
pub struct MarkupBuffer {
    commands: Vec<Command>,
}

impl MarkupBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Append a top-level section.
    pub fn section(&mut self, title: impl Into<String>) {
        self.push(Command::Section(title.into()));
    }

    /// Append a second-level section.
    pub fn subsection(&mut self, title: impl Into<String>) {
        self.push(Command::Subsection(title.into()));
    }

    /// Append body text runs.
    pub fn text(&mut self, runs: Vec<TextRun>) {
        self.push(Command::Text(runs));
    }

    /// Append a paragraph break.
    pub fn paragraph_break(&mut self) {
        self.push(Command::ParagraphBreak);
    }

    /// Append a table float.
    pub fn table(&mut self, rows: Vec<Vec<String>>, caption: impl Into<String>) {
        self.push(Command::Table {
            rows,
            caption: caption.into(),
        });
    }

    /// Append a figure float.
    pub fn figure(&mut self, path: impl Into<String>, caption: impl Into<String>) {
        self.push(Command::Figure {
            path: path.into(),
            caption: caption.into(),
        });
    }

    /// Append a display-math block.
    pub fn equation(&mut self, body: impl Into<String>) {
        self.push(Command::Equation(body.into()));
    }

    /// Get the commands in insertion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Iterate over the commands in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Get the image paths referenced by figure commands, in order.
    pub fn figure_paths(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            Command::Figure { path, .. } => Some(path.as_str()),
            _ => None,
        })
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the buffer has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a MarkupBuffer {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
