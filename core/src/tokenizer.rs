use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // letters, numbers and underscore; marks and joiners split words
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex");
}

/// Tokenize text into lowercase word tokens (maximal runs of letters, digits
/// and underscores).
///
/// Used for both documents and queries, so the vocabulary matches exactly.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
