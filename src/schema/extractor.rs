//! DDL Table Extractor
//!
//! Scans a SQL text blob for `CREATE TABLE` statements and reads each
//! statement body into a [`TableDescriptor`]. This is pattern matching, not
//! parsing: anything that is not a `CREATE TABLE ... );` statement is ignored,
//! and malformed column fragments are reported as diagnostics instead of
//! failing the extraction.

use std::fmt;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

use super::descriptor::{ColumnDescriptor, FragmentParse, TableDescriptor, strip_quotes};

// Body is non-greedy so a match ends at the first `);`. Table names are
// ASCII word characters only.
static CREATE_TABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`"]?((?-u:\w)+)[`"]?\s*\((.*?)\);"#)
        .expect("CREATE TABLE pattern is valid")
});

/// How a statement body is cut into column fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitMode {
    /// Split on every comma. `DECIMAL(10,2)` ends up in two fragments.
    #[default]
    Naive,
    /// Split only on commas outside parentheses.
    DepthAware,
}

/// What went wrong with a column fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The fragment held no tokens and was dropped
    EmptyFragment,
    /// The fragment had a name but no type; the column was kept with an empty type
    MissingType,
}

/// A column fragment that could not be fully read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Table the fragment belongs to
    pub table: String,
    /// Zero-based position of the fragment in the body
    pub fragment_index: usize,
    /// The fragment text, trimmed
    pub fragment: String,
    /// Problem found
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::EmptyFragment => write!(
                f,
                "table {}: empty column definition at position {} was skipped",
                self.table, self.fragment_index
            ),
            DiagnosticKind::MissingType => write!(
                f,
                "table {}: column definition '{}' at position {} has no type",
                self.table, self.fragment, self.fragment_index
            ),
        }
    }
}

/// Result of an extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Tables in source order
    pub tables: Vec<TableDescriptor>,
    /// Problems found while reading column fragments
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// True when every fragment was read cleanly
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Extracts table descriptors from SQL text
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor {
    mode: SplitMode,
}

impl TableExtractor {
    /// Create an extractor using the given split mode
    pub fn new(mode: SplitMode) -> Self {
        TableExtractor { mode }
    }

    /// Get the split mode
    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    /// Extract every CREATE TABLE statement found in `sql`
    pub fn extract(&self, sql: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for captures in CREATE_TABLE_PATTERN.captures_iter(sql) {
            let table_name = strip_quotes(&captures[1]);
            let body = &captures[2];
            let mut columns = Vec::new();

            for (index, fragment) in split_columns(body, self.mode).into_iter().enumerate() {
                match ColumnDescriptor::parse(fragment) {
                    FragmentParse::Complete(column) => columns.push(column),
                    FragmentParse::MissingType(column) => {
                        extraction.diagnostics.push(Diagnostic {
                            table: table_name.clone(),
                            fragment_index: index,
                            fragment: fragment.trim().to_string(),
                            kind: DiagnosticKind::MissingType,
                        });
                        columns.push(column);
                    }
                    FragmentParse::Empty => {
                        extraction.diagnostics.push(Diagnostic {
                            table: table_name.clone(),
                            fragment_index: index,
                            fragment: String::new(),
                            kind: DiagnosticKind::EmptyFragment,
                        });
                    }
                }
            }

            debug!("Extracted table {} with {} columns", table_name, columns.len());
            extraction.tables.push(TableDescriptor::new(table_name, columns));
        }

        for diagnostic in &extraction.diagnostics {
            warn!("{}", diagnostic);
        }

        extraction
    }
}

/// Extract tables using the default (naive) comma split
pub fn extract_tables(sql: &str) -> Vec<TableDescriptor> {
    TableExtractor::default().extract(sql).tables
}

/// Cut a CREATE TABLE body into column fragments
pub fn split_columns(body: &str, mode: SplitMode) -> Vec<&str> {
    match mode {
        SplitMode::Naive => body.split(',').collect(),
        SplitMode::DepthAware => {
            let mut fragments = Vec::new();
            let mut depth: usize = 0;
            let mut start = 0;

            for (i, ch) in body.char_indices() {
                match ch {
                    '(' => depth += 1,
                    ')' => depth = depth.saturating_sub(1),
                    ',' if depth == 0 => {
                        fragments.push(&body[start..i]);
                        start = i + 1;
                    }
                    _ => {}
                }
            }
            fragments.push(&body[start..]);
            fragments
        }
    }
}
