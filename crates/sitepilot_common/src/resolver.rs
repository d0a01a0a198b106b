//! Intent resolver - maps free text to a catalog intent.
//!
//! Language keywords are checked first, then intents in catalog order. The
//! first intent with any matching synonym wins; there is no scoring.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Intent};
use crate::language::Language;

/// Reserved key for the switch-to-English pseudo-intent
pub const LANG_EN_KEY: &str = "lang-en";
/// Reserved key for the switch-to-Arabic pseudo-intent
pub const LANG_AR_KEY: &str = "lang-ar";

/// How a synonym phrase is tested against the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment ("team" matches "steamed")
    #[default]
    Substring,
    /// Phrase must begin and end on word boundaries
    Word,
}

/// Tests whether a (lower-cased) synonym phrase occurs in (lower-cased) text
pub trait SynonymMatcher: Send + Sync {
    fn matches(&self, text: &str, phrase: &str) -> bool;
}

/// Substring containment. Short synonyms match inside unrelated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl SynonymMatcher for SubstringMatcher {
    fn matches(&self, text: &str, phrase: &str) -> bool {
        text.contains(phrase)
    }
}

/// Substring containment anchored on word boundaries
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryMatcher;

impl SynonymMatcher for WordBoundaryMatcher {
    fn matches(&self, text: &str, phrase: &str) -> bool {
        if phrase.is_empty() {
            return false;
        }
        text.match_indices(phrase).any(|(start, _)| {
            let end = start + phrase.len();
            let before_ok = text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c));
            let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
            before_ok && after_ok
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Language(Language),
    Navigate(String),
}

impl Resolution {
    /// Intent key, with the reserved keys for language switches
    pub fn key(&self) -> &str {
        match self {
            Self::Language(Language::En) => LANG_EN_KEY,
            Self::Language(Language::Ar) => LANG_AR_KEY,
            Self::Navigate(key) => key,
        }
    }
}

/// Resolver parameterized over the synonym matching strategy
#[derive(Debug, Clone, Default)]
pub struct IntentResolver<M = SubstringMatcher> {
    matcher: M,
}

impl IntentResolver<SubstringMatcher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: SynonymMatcher> IntentResolver<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Resolve text to a language switch or navigation intent.
    ///
    /// Callers must reject empty input before calling this.
    pub fn resolve(&self, text: &str, catalog: &Catalog) -> Option<Resolution> {
        let low = text.to_lowercase();

        if low.contains("english") {
            return Some(Resolution::Language(Language::En));
        }
        if low.contains("arabic") {
            return Some(Resolution::Language(Language::Ar));
        }

        self.find_intent(&low, catalog)
            .map(|intent| Resolution::Navigate(intent.key.clone()))
    }

    fn find_intent<'a>(&self, low: &str, catalog: &'a Catalog) -> Option<&'a Intent> {
        catalog.iter().find(|intent| {
            intent
                .synonyms
                .iter()
                .any(|phrase| self.matcher.matches(low, phrase))
        })
    }
}

impl SynonymMatcher for Box<dyn SynonymMatcher> {
    fn matches(&self, text: &str, phrase: &str) -> bool {
        (**self).matches(text, phrase)
    }
}

/// Boxed matcher for the configured mode
pub fn matcher_for(mode: MatchMode) -> Box<dyn SynonymMatcher> {
    match mode {
        MatchMode::Substring => Box::new(SubstringMatcher),
        MatchMode::Word => Box::new(WordBoundaryMatcher),
    }
}

/// Resolve with the default substring matcher
pub fn resolve(text: &str, catalog: &Catalog) -> Option<Resolution> {
    IntentResolver::<SubstringMatcher>::new().resolve(text, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentDef;

    fn catalog(entries: &[(&str, &[&str])]) -> Catalog {
        Catalog::from_defs(entries.iter().map(|(key, synonyms)| IntentDef {
            key: key.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            path: key.to_string(),
            suggestion: format!("navigate to {} page", key),
        }))
    }

    #[test]
    fn test_about_us_case_insensitive() {
        let c = catalog(&[("about", &["about us", "about page"])]);
        let r = resolve("Tell me About Us please", &c).unwrap();
        assert_eq!(r.key(), "about");
    }

    #[test]
    fn test_every_builtin_synonym_resolves_to_its_intent() {
        let c = Catalog::builtin().unwrap();
        for intent in c.iter() {
            for synonym in &intent.synonyms {
                let resolved = resolve(synonym, &c).unwrap();
                assert_eq!(resolved.key(), intent.key, "synonym {:?}", synonym);
            }
        }
    }

    #[test]
    fn test_unmatched_returns_none() {
        let c = Catalog::builtin().unwrap();
        assert_eq!(resolve("what is the weather", &c), None);
    }

    #[test]
    fn test_language_keywords_take_precedence() {
        let c = catalog(&[("english", &["english"]), ("team", &["team"])]);
        assert_eq!(resolve("english please", &c).unwrap().key(), LANG_EN_KEY);
        assert_eq!(resolve("switch to arabic", &c).unwrap().key(), LANG_AR_KEY);
        assert_eq!(
            resolve("team page in ARABIC", &c),
            Some(Resolution::Language(Language::Ar))
        );
    }

    #[test]
    fn test_language_keywords_with_empty_catalog() {
        let c = Catalog::default();
        assert_eq!(resolve("English", &c), Some(Resolution::Language(Language::En)));
        assert_eq!(resolve("team", &c), None);
    }

    #[test]
    fn test_first_catalog_entry_wins() {
        let c = catalog(&[("short", &["page"]), ("long", &["team page"])]);
        assert_eq!(resolve("team page", &c).unwrap().key(), "short");
    }

    #[test]
    fn test_substring_false_positive_kept() {
        let c = catalog(&[("team", &["team"])]);
        assert_eq!(resolve("steamed rice", &c).unwrap().key(), "team");
    }

    #[test]
    fn test_word_boundary_matcher() {
        let c = catalog(&[("team", &["team"])]);
        let resolver = IntentResolver::with_matcher(WordBoundaryMatcher);
        assert_eq!(resolver.resolve("steamed rice", &c), None);
        assert_eq!(resolver.resolve("show the team!", &c).unwrap().key(), "team");
        assert_eq!(resolver.resolve("team", &c).unwrap().key(), "team");
    }

    #[test]
    fn test_word_boundary_later_occurrence() {
        assert!(WordBoundaryMatcher.matches("steam and team", "team"));
        assert!(!WordBoundaryMatcher.matches("teams", "team"));
        assert!(!WordBoundaryMatcher.matches("team", ""));
    }

    #[test]
    fn test_matcher_for_mode() {
        let c = catalog(&[("team", &["team"])]);
        let resolver = IntentResolver::with_matcher(matcher_for(MatchMode::Word));
        assert_eq!(resolver.resolve("steamed", &c), None);
        let resolver = IntentResolver::with_matcher(matcher_for(MatchMode::Substring));
        assert!(resolver.resolve("steamed", &c).is_some());
    }
}
