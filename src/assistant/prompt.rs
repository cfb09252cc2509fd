// Prompt Construction
//
// Builds the text sent to the response generator from the user question,
// the detected intents and, when a schema is loaded, the SQL text with the
// tables extracted from it.

use super::intent::Intent;
use crate::schema::{render_context, TableDescriptor};

/// Formatting rules the generator is asked to follow
pub const FORMAT_RULES: [&str; 7] = [
    "Use short, clear sentences",
    "Separate paragraphs with line breaks",
    "Use bullets (•) for lists",
    "Organize the information in clear sections",
    "Do not use markdown or special formatting",
    "Avoid overly long answers",
    "Prioritize the most relevant information",
];

/// Schema material attached to a prompt
#[derive(Debug, Clone, Copy)]
pub enum SchemaContext<'a> {
    /// Loaded SQL together with the tables extracted from it
    Tables {
        sql: &'a str,
        tables: &'a [TableDescriptor],
    },
    /// SQL text that yielded no tables, passed through as-is
    Raw(&'a str),
}

/// Assembles a generator prompt
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    language: &'a str,
    schema: Option<SchemaContext<'a>>,
    intents: &'a [Intent],
}

impl<'a> PromptBuilder<'a> {
    /// Start a prompt asking for answers in `language`
    pub fn new(language: &'a str) -> Self {
        PromptBuilder {
            language,
            schema: None,
            intents: &[],
        }
    }

    /// Attach schema context
    pub fn schema(mut self, schema: SchemaContext<'a>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attach detected intents
    pub fn intents(mut self, intents: &'a [Intent]) -> Self {
        self.intents = intents;
        self
    }

    /// Render the prompt for `question`
    pub fn build(&self, question: &str) -> String {
        let mut prompt = format!(
            "Act as an expert virtual assistant and answer in {}.\nFollow these rules to format your answer:\n",
            self.language
        );
        for (i, rule) in FORMAT_RULES.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, rule));
        }

        if let Some(schema) = self.schema {
            let sql = match schema {
                SchemaContext::Tables { sql, .. } | SchemaContext::Raw(sql) => sql,
            };
            prompt.push_str("\nSQL context:\n");
            prompt.push_str(sql.trim());
            // Descriptors always follow the source text, never replace it
            if let SchemaContext::Tables { tables, .. } = schema {
                prompt.push_str("\n\nExtracted tables:\n");
                prompt.push_str(&render_context(tables));
            }
            prompt.push_str(
                "\n\nAnalyze the SQL content provided and answer the following question about its tables, queries or database structure.\n",
            );
        }

        if !self.intents.is_empty() {
            prompt.push_str("\nFocus:\n");
            for intent in self.intents {
                prompt.push_str(&format!("- {}\n", intent.focus_hint()));
            }
        }

        prompt.push_str(&format!("\nUser question: {}\n", question));
        prompt.push_str("\nPlease provide a useful, clear and well-structured answer.");
        prompt
    }
}
