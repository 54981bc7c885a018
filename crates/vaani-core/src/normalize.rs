use std::fmt;
use std::ops::Deref;

/// Characters removed during normalization. Apostrophes and other
/// punctuation survive.
const STRIPPED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Lowercase, punctuation-free, single-spaced text.
///
/// Only [`normalize`] and its siblings construct this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(text: &str) -> NormalizedText {
    let text = text.to_lowercase();
    let text = text.trim_matches(is_separator);

    if text.is_empty() {
        return NormalizedText::default();
    }

    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    let words: Vec<&str> = stripped.split(is_separator).filter(|w| !w.is_empty()).collect();
    NormalizedText(words.join(" "))
}

/// Absent input normalizes to empty text
pub fn normalize_opt(text: Option<&str>) -> NormalizedText {
    text.map(normalize).unwrap_or_default()
}

/// Normalize each item, skipping empty inputs
pub fn normalize_list<S: AsRef<str>>(texts: &[S]) -> Vec<NormalizedText> {
    texts
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.is_empty())
        .map(normalize)
        .collect()
}
