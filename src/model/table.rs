//! Table types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a grid of text values.
    pub fn from_strings<S: Into<String>>(rows: impl IntoIterator<Item = Vec<S>>) -> Self {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    /// Check if every row has the same number of cells as the first.
    pub fn is_rectangular(&self) -> bool {
        let cols = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == cols)
    }

    /// Get the cell text grid, rows by columns.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(TableCell::plain_text).collect())
            .collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs)
    pub content: Vec<Paragraph>,
}

impl TableCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell holding a single paragraph of text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
        }
    }

    /// Add a paragraph to the cell.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(paragraph);
    }

    /// Get plain text content; paragraphs are joined with a space.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_dimensions() {
        let table = Table::from_strings(vec![vec!["A", "B"], vec!["C", "D"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(table.is_rectangular());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_irregular_table() {
        let table = Table::from_strings(vec![vec!["A", "B"], vec!["C"]]);
        assert!(!table.is_rectangular());
    }

    #[test]
    fn test_empty_table() {
        assert!(Table::new().is_empty());
        let mut table = Table::new();
        table.add_row(TableRow::default());
        assert!(table.is_empty());
    }

    #[test]
    fn test_text_grid_and_plain_text() {
        let table = Table::from_strings(vec![vec!["A", "B"], vec!["C", "D"]]);
        assert_eq!(
            table.text_grid(),
            vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string(), "D".to_string()]]
        );
        assert_eq!(table.plain_text(), "A\tB\nC\tD");
    }

    #[test]
    fn test_cell_joins_paragraphs() {
        let mut cell = TableCell::new();
        cell.add_paragraph(Paragraph::with_text("first"));
        cell.add_paragraph(Paragraph::new());
        cell.add_paragraph(Paragraph::with_text("second"));
        assert_eq!(cell.plain_text(), "first second");
    }
}
