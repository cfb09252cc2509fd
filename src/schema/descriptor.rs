//! Table and Column Descriptors
//!
//! This module defines the records produced by the DDL extractor. They are
//! plain values: built once per matched statement and never mutated.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Characters removed from identifiers
const QUOTE_CHARS: [char; 2] = ['`', '"'];

/// Strip backtick and double-quote characters from an identifier
pub fn strip_quotes(identifier: &str) -> String {
    identifier.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect()
}

/// A column read from one comma-separated fragment of a CREATE TABLE body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, quotes stripped
    name: String,
    /// Declared type token, verbatim (empty when the fragment had none)
    #[serde(rename = "type")]
    data_type: String,
    /// Remaining tokens, unmodified
    constraints: Vec<String>,
}

/// Outcome of reading a single column fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentParse {
    /// Name and type were both present
    Complete(ColumnDescriptor),
    /// Only a name was present; the column carries an empty type
    MissingType(ColumnDescriptor),
    /// The fragment held no tokens at all
    Empty,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, constraints: Vec<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            data_type: data_type.into(),
            constraints,
        }
    }

    /// Read a column definition fragment.
    ///
    /// The fragment is split on runs of whitespace: token 0 is the name,
    /// token 1 the type and everything after it the constraint list.
    pub fn parse(fragment: &str) -> FragmentParse {
        let mut tokens = fragment.split_whitespace();

        let name = match tokens.next() {
            Some(token) => strip_quotes(token),
            None => return FragmentParse::Empty,
        };

        match tokens.next() {
            Some(data_type) => {
                let constraints = tokens.map(str::to_string).collect();
                FragmentParse::Complete(ColumnDescriptor::new(name, data_type, constraints))
            }
            None => FragmentParse::MissingType(ColumnDescriptor::new(name, "", Vec::new())),
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type token
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Get the constraint tokens
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Check whether the fragment declared a type
    pub fn has_type(&self) -> bool {
        !self.data_type.is_empty()
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.has_type() {
            write!(f, " {}", self.data_type)?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// A table read from one CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name, quotes stripped
    name: String,
    /// Columns in source order
    columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Create a new table descriptor
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        TableDescriptor {
            name: name.into(),
            columns,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the columns in source order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {}:", self.name)?;
        for column in &self.columns {
            write!(f, "\n  - {}", column)?;
        }
        Ok(())
    }
}
