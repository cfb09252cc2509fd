//! Schema Extraction Module
//!
//! Reads table and column descriptors out of SQL DDL text so they can be
//! handed to the assistant as prompt context.

pub mod descriptor;
pub mod extractor;
pub mod context;

// Re-export key types
pub use self::descriptor::{ColumnDescriptor, TableDescriptor, FragmentParse};
pub use self::extractor::{
    extract_tables, split_columns, Diagnostic, DiagnosticKind, Extraction, SplitMode, TableExtractor,
};
pub use self::context::render_context;
