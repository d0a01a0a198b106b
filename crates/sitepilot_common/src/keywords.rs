//! Keyword extraction for widening a failed content search.

use std::collections::HashSet;

use crate::language::{is_arabic, is_arabic_punctuation, Language};

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "to", "from", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "can", "will", "just", "should", "now",
];

const ARABIC_STOP_WORDS: &[&str] = &[
    "في", "من", "على", "إلى", "الى", "عن", "مع", "هذا", "هذه", "ذلك", "تلك", "التي", "الذي",
    "الذين", "ما", "ماذا", "كيف", "هل", "لماذا", "متى", "أين", "اين", "او", "أو", "ثم", "لا",
    "لم", "لن", "كان", "كانت", "هو", "هي", "هم", "نحن", "انا", "أنا", "كل", "بعض", "قد", "عند",
    "بين", "حتى", "إن", "ان", "أن", "بها", "به", "لها", "له", "يا", "مثل", "ايضا", "أيضا",
];

impl Language {
    /// Shortest token kept by [`extract_keywords`]
    pub fn min_keyword_len(self) -> usize {
        match self {
            Language::En => 3,
            Language::Ar => 2,
        }
    }

    fn stop_words(self) -> &'static [&'static str] {
        match self {
            Language::En => ENGLISH_STOP_WORDS,
            Language::Ar => ARABIC_STOP_WORDS,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || (is_arabic(c) && !is_arabic_punctuation(c))
}

/// Lower-cased content words of `text`, in order of first appearance
pub fn extract_keywords(text: &str, language: Language) -> Vec<String> {
    let low = text.to_lowercase();
    let stop_words = language.stop_words();
    let min_len = language.min_keyword_len();
    let mut seen = HashSet::new();

    low.split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().count() >= min_len)
        .filter(|token| !stop_words.contains(token))
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_keywords() {
        let kw = extract_keywords("What are the benefits of GS1 barcodes?", Language::En);
        assert_eq!(kw, vec!["what", "benefits", "gs1", "barcodes"]);
    }

    #[test]
    fn test_short_and_stop_words_dropped() {
        let kw = extract_keywords("is it on the go to a box", Language::En);
        assert_eq!(kw, vec!["box"]);
    }

    #[test]
    fn test_arabic_keywords_keep_two_letter_words() {
        let kw = extract_keywords("ما هي فوائد الباركود في مصر؟", Language::Ar);
        assert_eq!(kw, vec!["فوائد", "الباركود", "مصر"]);

        let kw = extract_keywords("كود رز د", Language::Ar);
        assert_eq!(kw, vec!["كود", "رز"]);
    }

    #[test]
    fn test_arabic_diacritics_stay_in_word() {
        let kw = extract_keywords("عَلَمٌ", Language::Ar);
        assert_eq!(kw.len(), 1);
    }

    #[test]
    fn test_duplicates_removed() {
        let kw = extract_keywords("Barcode barcode BARCODE labels", Language::En);
        assert_eq!(kw, vec!["barcode", "labels"]);
    }

    #[test]
    fn test_empty() {
        assert!(extract_keywords("", Language::En).is_empty());
        assert!(extract_keywords("?!.,", Language::Ar).is_empty());
    }
}
