use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Derive the problem slug from a solution filename.
///
/// `217.ContainsDuplicate.py` → `contains-duplicate`
/// `valid_anagram.py` → `valid-anagram`
///
/// Steps: drop the extension, drop a leading `<digits>.` prefix,
/// NFC-normalize (macOS filenames arrive decomposed), turn underscores
/// and spaces into `-`, split camelCase on `-`, lowercase.
pub fn slug_from_filename(filename: &str) -> String {
    let base = filename
        .rsplit_once('.')
        .map(|(b, _)| b)
        .unwrap_or(filename);

    let base = Regex::new(r"^\d+\.").unwrap().replace(base, "");
    let base: String = base.nfc().collect();
    let base = Regex::new(r"[_\s]+").unwrap().replace_all(&base, "-");
    let base = Regex::new(r"([a-z0-9])([A-Z])")
        .unwrap()
        .replace_all(&base, "${1}-${2}");

    base.to_lowercase()
}
