// Schema Context Rendering
//
// Turns extracted tables into the plain-text block placed in a prompt.

use super::descriptor::TableDescriptor;

/// Render tables as prompt context, one block per table separated by a blank line
pub fn render_context(tables: &[TableDescriptor]) -> String {
    tables
        .iter()
        .map(|table| table.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
