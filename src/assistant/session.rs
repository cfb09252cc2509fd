// Chat Session
//
// Per-conversation state: the SQL text the user loaded, if any, and the
// tables extracted from it.

use super::prompt::SchemaContext;
use crate::schema::{Extraction, TableDescriptor, TableExtractor};

/// State of one conversation
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    sql: Option<String>,
    extraction: Extraction,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load SQL text, replacing any previously loaded schema
    pub fn load_sql(&mut self, sql: impl Into<String>, extractor: &TableExtractor) -> &Extraction {
        let sql = sql.into();
        self.extraction = extractor.extract(&sql);
        self.sql = Some(sql);
        &self.extraction
    }

    /// Forget the loaded schema
    pub fn reset(&mut self) {
        self.sql = None;
        self.extraction = Extraction::default();
    }

    /// Whether SQL has been loaded
    pub fn has_schema(&self) -> bool {
        self.sql.is_some()
    }

    /// Loaded SQL text
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Tables extracted from the loaded SQL
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.extraction.tables
    }

    /// Full extraction result for the loaded SQL
    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Schema context for a prompt: the loaded SQL, plus descriptors when any were extracted
    pub fn schema_context(&self) -> Option<SchemaContext<'_>> {
        let sql = self.sql.as_deref()?;
        if self.extraction.tables.is_empty() {
            Some(SchemaContext::Raw(sql))
        } else {
            Some(SchemaContext::Tables {
                sql,
                tables: &self.extraction.tables,
            })
        }
    }
}
