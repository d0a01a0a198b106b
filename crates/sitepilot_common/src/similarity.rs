//! String similarity used for suggestion and relevance ranking.

/// Sørensen-Dice coefficient over character bigrams, whitespace ignored.
///
/// 1.0 for identical strings, 0.0 when no bigram is shared.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b)
}

/// Index of the highest-scoring candidate; ties go to the earliest.
pub fn best_match<S: AsRef<str>>(text: &str, candidates: &[S]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let score = similarity(text, &candidate.as_ref().to_lowercase());
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(similarity("our team page", "our team page"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_partial_overlap_between() {
        let partial = similarity("go to team", "navigate to our team page");
        assert!(partial > 0.0 && partial < 1.0);
        let weaker = similarity("go to team", "navigate to about us page");
        assert!(partial > weaker);
    }

    #[test]
    fn test_best_match() {
        let pool = ["navigate to about us page", "navigate to our team page"];
        assert_eq!(best_match("go to team", &pool), Some(1));
        let empty: [&str; 0] = [];
        assert_eq!(best_match("go to team", &empty), None);
    }

    #[test]
    fn test_best_match_tie_prefers_first() {
        let pool = ["same", "same"];
        assert_eq!(best_match("zzz", &pool), Some(0));
    }
}
