//! Suggestion ranker for prompts that resolve to no intent.
//!
//! The closest suggestion by string similarity goes first; the rest are
//! shuffled so repeated misses do not always show the same ordering.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::similarity::best_match;

/// Default cap on returned suggestions
pub const DEFAULT_MAX_SUGGESTIONS: usize = 6;

/// Suggestions offered when the prompt talks about languages
pub const LANGUAGE_SUGGESTIONS: [&str; 2] =
    ["change language to English", "change language to Arabic"];

const LANGUAGE_KEYWORDS: [&str; 4] = ["english", "arabic", "language", "lang"];

/// Rank suggestions using the thread-local RNG
pub fn suggest(text: &str, catalog: &Catalog, max_count: usize) -> Vec<String> {
    suggest_with_rng(text, catalog, max_count, &mut rand::thread_rng())
}

/// Rank suggestions with an explicit random source
pub fn suggest_with_rng<R: Rng + ?Sized>(
    text: &str,
    catalog: &Catalog,
    max_count: usize,
    rng: &mut R,
) -> Vec<String> {
    let low = text.to_lowercase();
    let mut pool = suggestion_pool(&low, catalog);

    let Some(best) = best_match(&low, &pool) else {
        return Vec::new();
    };

    let first = pool.remove(best);
    pool.shuffle(rng);

    let mut ranked = Vec::with_capacity(pool.len() + 1);
    ranked.push(first);
    ranked.extend(pool);
    ranked.truncate(max_count);
    ranked
}

fn suggestion_pool(low: &str, catalog: &Catalog) -> Vec<String> {
    if LANGUAGE_KEYWORDS.iter().any(|k| low.contains(k)) {
        LANGUAGE_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        catalog.suggestions()
    }
}
