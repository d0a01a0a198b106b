//! Relevance ranking of retrieved content against the prompt.

use crate::content::ContentRecord;
use crate::similarity::similarity;

/// Characters of each record compared against the prompt
pub const DEFAULT_PREFIX_CHARS: usize = 1000;

struct Scored {
    score: f64,
    record: ContentRecord,
}

/// Order records by descending similarity to the prompt
pub fn rank(records: Vec<ContentRecord>, prompt: &str) -> Vec<ContentRecord> {
    rank_with_prefix(records, prompt, DEFAULT_PREFIX_CHARS)
}

/// Like [`rank`], comparing only the first `prefix_chars` of each record.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_with_prefix(
    records: Vec<ContentRecord>,
    prompt: &str,
    prefix_chars: usize,
) -> Vec<ContentRecord> {
    let prompt = prompt.to_lowercase();

    let mut scored: Vec<Scored> = records
        .into_iter()
        .map(|record| {
            let prefix: String = record.content.chars().take(prefix_chars).collect();
            Scored {
                score: similarity(&prompt, &prefix.to_lowercase()),
                record,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.into_iter().map(|s| s.record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, content: &str) -> ContentRecord {
        ContentRecord::new(id, None, content)
    }

    fn ids(records: &[ContentRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_most_similar_first() {
        let records = vec![
            rec(1, "Board members of the organisation"),
            rec(2, "GS1 barcodes identify products worldwide"),
            rec(3, "Contact us by phone"),
        ];
        let ranked = rank(records, "What are GS1 barcodes?");
        assert_eq!(ranked[0].id, 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![rec(5, "zzzz"), rec(3, "qqqq"), rec(9, "wwww"), rec(1, "barcode")];
        let ranked = rank(records, "barcode");
        assert_eq!(ids(&ranked), vec![1, 5, 3, 9]);
    }

    #[test]
    fn test_prefix_bound() {
        let long_tail = format!("{}barcode", "x".repeat(50));
        let records = vec![rec(1, "zzzz"), rec(2, &long_tail)];
        // Only the x-prefix is compared, so both score zero and keep order.
        let ranked = rank_with_prefix(records.clone(), "barcode", 10);
        assert_eq!(ids(&ranked), vec![1, 2]);
        let ranked = rank_with_prefix(records, "barcode", 100);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_case_insensitive() {
        let records = vec![rec(1, "other"), rec(2, "GS1 BARCODES")];
        assert_eq!(rank(records, "gs1 barcodes")[0].id, 2);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new(), "anything").is_empty());
    }
}
