// Response Formatting
//
// Generated answers are rewritten into short plain-text paragraphs for the
// chat window: markdown emphasis removed, bullets normalized, sentences and
// section labels put on their own lines.

use once_cell::sync::Lazy;
use regex::Regex;

static STAR_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\*\s").expect("valid pattern"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").expect("valid pattern"));
static SECTION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-zÁ-Úá-ú]+:)").expect("valid pattern"));
static EXTRA_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));

/// Rewrite generated text for display
pub fn format_response(text: &str) -> String {
    let text = text.replace("**", "");
    let text = STAR_BULLET.replace_all(&text, "\n• ");
    let text = SENTENCE_END.replace_all(&text, ".\n\n");
    let text = SECTION_LABEL.replace_all(&text, "\n\n${1}\n");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");
    let text = text.replace(':', ": ");
    spread_bullets(text.trim())
}

/// Put a blank line in front of every bullet
pub fn spread_bullets(text: &str) -> String {
    text.replace('•', "\n\n•")
}
