// Intent Rules
//
// Keyword rules that tag a user message with what kind of answer it is after.

use std::fmt;

/// What the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// A chart or graph
    Chart,
    /// An analysis of the data
    Analysis,
    /// Details about a table
    Table,
    /// Help with a query
    Query,
}

/// Rules checked in order; every matching rule contributes its intent
const RULES: &[(&str, Intent)] = &[
    ("gráfico", Intent::Chart),
    ("análisis", Intent::Analysis),
    ("tabla", Intent::Table),
    ("consulta", Intent::Query),
];

impl Intent {
    /// Instruction appended to the prompt when this intent is present
    pub fn focus_hint(&self) -> &'static str {
        match self {
            Intent::Chart => "Describe which columns would be plotted and how the chart should be organized.",
            Intent::Analysis => "Give a structured analysis of the relevant data and point out notable patterns.",
            Intent::Table => "Focus on the tables involved: their columns, types and constraints.",
            Intent::Query => "Explain the SQL query needed and what each part does.",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Chart => "chart",
            Intent::Analysis => "analysis",
            Intent::Table => "table",
            Intent::Query => "query",
        };
        write!(f, "{}", name)
    }
}

/// Every intent whose keyword appears in `message`, in rule order
pub fn detect_intents(message: &str) -> Vec<Intent> {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, intent)| *intent)
        .collect()
}
