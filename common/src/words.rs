use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Shortest word that is indexed or queryable.
pub const MIN_WORD_LEN: usize = 3;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
}

/// Lowercase `word`, or reject it (`None`) when it is shorter than
/// [`MIN_WORD_LEN`] or holds anything but ASCII letters.
pub fn normalize_word(word: &str) -> Option<String> {
    if word.len() < MIN_WORD_LEN || !is_alphabetic(word) {
        return None;
    }
    Some(word.to_ascii_lowercase())
}

pub fn is_alphabetic(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Raw letter/digit runs of `text` after NFKC folding, in document order.
/// Candidates still have to pass [`normalize_word`].
pub fn extract_words(text: &str) -> Vec<String> {
    let folded = text.nfkc().collect::<String>();
    RE.find_iter(&folded).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_filters() {
        assert_eq!(normalize_word("Dartmouth").as_deref(), Some("dartmouth"));
        assert_eq!(normalize_word("is"), None);
        assert_eq!(normalize_word("abc123"), None);
        assert_eq!(normalize_word("café"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        for w in ["Hello", "WORLD", "a", "ab", "x1y", "", "Tuck", "o'neil"] {
            let once = normalize_word(w);
            let twice = once.as_deref().and_then(normalize_word);
            assert_eq!(once, twice, "normalize twice differs for {w:?}");
        }
    }

    #[test]
    fn extracts_runs_in_order() {
        let words = extract_words("The quick, brown fox -- jumped over 2 dogs!");
        assert_eq!(words, vec!["The", "quick", "brown", "fox", "jumped", "over", "2", "dogs"]);
    }

    #[test]
    fn folds_fullwidth_letters() {
        let words = extract_words("ｃａｔ");
        assert_eq!(words, vec!["cat"]);
    }
}
