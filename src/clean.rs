use once_cell::sync::Lazy;
use regex::Regex;

// Applied top to bottom. Later passes tidy what earlier ones leave behind,
// e.g. empty parens only match once whitespace has been collapsed.
static CITATION: Lazy<Regex> = Lazy::new(|| build(r"\[.*?\]"));
static PHONETIC: Lazy<Regex> = Lazy::new(|| build(r"/[^/]+/;?"));
static AUDIO_CAPTION: Lazy<Regex> = Lazy::new(|| build(r"\b(?:Écouter|uitspraak)\b;?"));
static TRAILING_SEMICOLON: Lazy<Regex> = Lazy::new(|| build(r";\s*$"));
static AUDIO_ICON: Lazy<Regex> = Lazy::new(|| build("ⓘ"));
static SPACE_AFTER_OPEN_PAREN: Lazy<Regex> = Lazy::new(|| build(r"\(\s+"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| build(r"\s+"));
static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| build(r"\(\s*\)"));
static SPACE_BEFORE_COMMA: Lazy<Regex> = Lazy::new(|| build(r"\s+,"));
static OPEN_PAREN_SEMICOLON: Lazy<Regex> = Lazy::new(|| build(r"\(\s*;\s*"));

// Patterns are compile-time constants, a failure here is a programming error.
fn build(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid cleaning pattern {pattern:?}: {e}"))
}

/// Strips citation markers, phonetic transcriptions, audio captions and icons from
/// an encyclopedia paragraph and normalizes the whitespace/punctuation left behind.
///
/// ```
/// use leaders_scrap::clean::clean_paragraph;
///
/// let cleaned = clean_paragraph("Jean Dupont [1] /ʒɑ̃/; Écouter; (born 1950)");
/// assert_eq!(cleaned, "Jean Dupont (born 1950)");
/// ```
pub fn clean_paragraph(text: &str) -> String {
    let text = CITATION.replace_all(text, "");
    let text = PHONETIC.replace_all(&text, "");
    let text = AUDIO_CAPTION.replace_all(&text, "");
    let text = TRAILING_SEMICOLON.replace_all(&text, "");
    let text = AUDIO_ICON.replace_all(&text, "");
    let text = SPACE_AFTER_OPEN_PAREN.replace_all(&text, "(");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = EMPTY_PARENS.replace_all(text.trim(), "");
    let text = SPACE_BEFORE_COMMA.replace_all(&text, ",");
    let text = OPEN_PAREN_SEMICOLON.replace_all(&text, "(");

    text.into_owned()
}
