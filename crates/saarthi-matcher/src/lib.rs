//! # Saarthi Matcher
//!
//! The relevance matcher: maps a free-text problem statement to the 1–3
//! corpus verses whose keywords overlap it most.
//!
//! Pure computation over in-memory data. No I/O, no locking, no shared
//! mutable state; the corpus is read-only and the same (query, corpus)
//! pair always yields the same ordered result.

use std::collections::HashSet;

use saarthi_core::error::{Result, SaarthiError};
use saarthi_corpus::{Corpus, Verse};

/// Upper bound on how many verses a query returns.
pub const MAX_MATCHES: usize = 3;

/// A verse paired with its overlap score for one invocation. Discarded
/// once ranking is done.
struct ScoredMatch<'c> {
    verse: &'c Verse,
    score: usize,
}

/// Lowercase the text and split it into its maximal runs of word
/// characters (ASCII alphanumerics and underscore), deduplicated.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find the verses most relevant to `query` by keyword overlap.
///
/// Returns between 1 and `MAX_MATCHES` verses, never empty and never
/// containing duplicates, ordered by descending score. Verses with equal
/// scores keep their corpus order. Queries with no usable tokens, or with
/// no keyword overlap at all, fall back to the corpus's general verse.
///
/// The only failure is an empty corpus, which cannot satisfy the
/// non-empty-result contract.
pub fn find_relevant_verses<'c>(query: &str, corpus: &'c Corpus) -> Result<Vec<&'c Verse>> {
    let fallback = || -> Result<Vec<&'c Verse>> {
        corpus
            .fallback_verse()
            .map(|v| vec![v])
            .ok_or_else(|| SaarthiError::InvalidCorpus("empty corpus has no fallback verse".into()))
    };

    let tokens = tokenize(query);
    if tokens.is_empty() {
        return fallback();
    }

    let mut scored: Vec<ScoredMatch<'c>> = corpus
        .iter()
        .map(|verse| ScoredMatch {
            verse,
            score: tokens.iter().filter(|t| verse.keywords.contains(*t)).count(),
        })
        .filter(|m| m.score > 0)
        .collect();

    if scored.is_empty() {
        return fallback();
    }

    // Stable sort: equal scores keep corpus order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_MATCHES);

    tracing::debug!(
        query_tokens = tokens.len(),
        matches = scored.len(),
        citations = ?scored.iter().map(|m| m.verse.citation()).collect::<Vec<_>>(),
        "matched verses"
    );

    Ok(scored.into_iter().map(|m| m.verse).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use saarthi_corpus::Verse;

    fn verse(chapter: u32, number: u32, keywords: &[&str]) -> Verse {
        Verse {
            chapter_number: chapter,
            verse_number: number,
            original_text: String::new(),
            transliteration: String::new(),
            translation: format!("verse {chapter}.{number}"),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn corpus(verses: Vec<Verse>) -> Corpus {
        Corpus::from_verses(verses).unwrap()
    }

    fn citations(result: &[&Verse]) -> Vec<String> {
        result.iter().map(|v| v.citation()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("I feel ANXIOUS, truly anxious!");
        assert!(tokens.contains("i"));
        assert!(tokens.contains("feel"));
        assert!(tokens.contains("anxious"));
        assert!(tokens.contains("truly"));
        // Duplicates collapse
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_tokenize_word_characters_only() {
        let tokens = tokenize("self-doubt at 3am: under_score");
        assert!(tokens.contains("self"));
        assert!(tokens.contains("doubt"));
        assert!(tokens.contains("3am"));
        assert!(tokens.contains("under_score"));
    }

    #[test]
    fn test_tokenize_no_word_characters() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("!!!").is_empty());
    }

    #[test]
    fn test_result_length_bounds_and_no_duplicates() {
        let c = corpus(vec![
            verse(1, 1, &["fear", "general"]),
            verse(1, 2, &["fear", "anger"]),
            verse(1, 3, &["fear"]),
            verse(1, 4, &["fear"]),
            verse(1, 5, &["fear"]),
        ]);
        let result = find_relevant_verses("fear everywhere", &c).unwrap();
        assert!(!result.is_empty() && result.len() <= MAX_MATCHES);
        let cites = citations(&result);
        let mut deduped = cites.clone();
        deduped.dedup();
        assert_eq!(cites, deduped);
    }

    #[test]
    fn test_empty_query_returns_general_verse() {
        let c = corpus(vec![
            verse(1, 1, &["duty"]),
            verse(2, 2, &["general", "peace"]),
        ]);
        for query in ["", "   ", "!!!"] {
            let result = find_relevant_verses(query, &c).unwrap();
            assert_eq!(citations(&result), ["2.2"], "query {query:?}");
        }
    }

    #[test]
    fn test_fallback_without_general_uses_first_verse() {
        let c = corpus(vec![verse(1, 1, &["duty"]), verse(2, 2, &["peace"])]);
        let result = find_relevant_verses("", &c).unwrap();
        assert_eq!(citations(&result), ["1.1"]);
    }

    #[test]
    fn test_no_overlap_equals_empty_token_fallback() {
        let c = corpus(vec![
            verse(1, 1, &["duty"]),
            verse(2, 2, &["general", "peace"]),
        ]);
        let no_overlap = find_relevant_verses("quantum blockchain", &c).unwrap();
        let empty = find_relevant_verses("", &c).unwrap();
        assert_eq!(citations(&no_overlap), citations(&empty));
        assert_eq!(citations(&no_overlap), ["2.2"]);
    }

    #[test]
    fn test_single_matching_verse() {
        let c = corpus(vec![
            verse(1, 1, &["general"]),
            verse(2, 2, &["anger", "rage"]),
            verse(3, 3, &["peace"]),
        ]);
        let result = find_relevant_verses("so much anger today", &c).unwrap();
        assert_eq!(citations(&result), ["2.2"]);
    }

    #[test]
    fn test_descending_score_order_and_truncation() {
        // Scores: 1.1→5, 1.2→4, 1.3→3, 1.4→2, 1.5→1; top 3 survive.
        let c = corpus(vec![
            verse(1, 1, &["a", "b", "c", "d", "e"]),
            verse(1, 2, &["a", "b", "c", "d"]),
            verse(1, 3, &["a", "b", "c"]),
            verse(1, 4, &["a", "b"]),
            verse(1, 5, &["a"]),
        ]);
        let result = find_relevant_verses("a b c d e", &c).unwrap();
        assert_eq!(citations(&result), ["1.1", "1.2", "1.3"]);
    }

    #[test]
    fn test_tie_break_keeps_corpus_order() {
        let c = corpus(vec![verse(1, 1, &["a"]), verse(1, 2, &["a"])]);
        let result = find_relevant_verses("a", &c).unwrap();
        assert_eq!(citations(&result), ["1.1", "1.2"]);
    }

    #[test]
    fn test_ties_beyond_cutoff_truncated_strictly() {
        // Four verses tied at score 1: only the first three by corpus
        // order survive.
        let c = corpus(vec![
            verse(1, 1, &["a"]),
            verse(1, 2, &["a"]),
            verse(1, 3, &["a"]),
            verse(1, 4, &["a"]),
        ]);
        let result = find_relevant_verses("a", &c).unwrap();
        assert_eq!(citations(&result), ["1.1", "1.2", "1.3"]);
    }

    #[test]
    fn test_higher_overlap_outranks_corpus_order() {
        let c = corpus(vec![
            verse(1, 1, &["fear"]),
            verse(2, 2, &["fear", "anxiety", "worry"]),
        ]);
        let result = find_relevant_verses("fear and anxiety and worry", &c).unwrap();
        assert_eq!(citations(&result), ["2.2", "1.1"]);
    }

    #[test]
    fn test_determinism() {
        let c = corpus(vec![
            verse(1, 1, &["fear", "work"]),
            verse(1, 2, &["fear"]),
            verse(1, 3, &["work", "general"]),
        ]);
        let first = citations(&find_relevant_verses("fear of work", &c).unwrap());
        for _ in 0..10 {
            let again = citations(&find_relevant_verses("fear of work", &c).unwrap());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_query_repetition_does_not_inflate_score() {
        // Tokens collapse into a set before scoring.
        let c = corpus(vec![
            verse(1, 1, &["fear"]),
            verse(1, 2, &["fear", "worry"]),
        ]);
        let result = find_relevant_verses("fear fear fear fear", &c).unwrap();
        assert_eq!(citations(&result), ["1.1", "1.2"]);
    }

    #[test]
    fn test_embedded_corpus_integration() {
        let c = Corpus::embedded().unwrap();
        let result = find_relevant_verses("I am full of anger and anxiety about my work", &c).unwrap();
        assert!(!result.is_empty() && result.len() <= MAX_MATCHES);
        // Matched on real keywords, not the fallback path
        assert!(result.iter().any(|v| {
            v.keywords.contains("anger") || v.keywords.contains("anxiety") || v.keywords.contains("work")
        }));
    }
}
