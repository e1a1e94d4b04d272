//! # Saarthi Corpus
//!
//! The verse corpus the matcher retrieves from: an immutable, ordered
//! sequence of Bhagavad Gita verse records, loaded once at startup.
//!
//! A default corpus is compiled into the crate (`Corpus::embedded`); an
//! alternate JSON file with the same schema can be loaded at startup via
//! `Corpus::load_from`. The corpus is never mutated after load and can be
//! shared freely across threads.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use saarthi_core::error::{Result, SaarthiError};

/// The sentinel keyword that marks a verse as suitable fallback guidance
/// when a query matches nothing.
pub const FALLBACK_KEYWORD: &str = "general";

const EMBEDDED_CORPUS: &str = include_str!("../data/verses.json");

/// A single immutable verse record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub chapter_number: u32,
    pub verse_number: u32,
    /// Source-language (Sanskrit) text.
    pub original_text: String,
    pub transliteration: String,
    /// English translation.
    pub translation: String,
    /// Lowercase match keywords. Non-unique across verses.
    pub keywords: HashSet<String>,
}

impl Verse {
    /// Chapter.verse citation, e.g. "2.47".
    pub fn citation(&self) -> String {
        format!("{}.{}", self.chapter_number, self.verse_number)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BG {} — {}", self.citation(), self.translation)
    }
}

/// The fixed, ordered verse corpus. Created once at startup, read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct Corpus {
    verses: Vec<Verse>,
}

impl Corpus {
    /// Build a corpus from verse records, preserving their order.
    ///
    /// Fails with `InvalidCorpus` when `verses` is empty. Keywords are
    /// normalized to lowercase. A corpus without the `"general"` sentinel
    /// or with keyword-less verses still loads, but logs a warning since
    /// fallback quality degrades to plain corpus order.
    pub fn from_verses(mut verses: Vec<Verse>) -> Result<Self> {
        if verses.is_empty() {
            return Err(SaarthiError::InvalidCorpus("corpus contains no verses".into()));
        }

        for verse in &mut verses {
            verse.keywords = verse.keywords.iter().map(|k| k.to_lowercase()).collect();
        }

        if !verses.iter().any(|v| v.has_keyword(FALLBACK_KEYWORD)) {
            tracing::warn!(
                "corpus has no '{FALLBACK_KEYWORD}' verse; fallback degrades to first verse"
            );
        }
        let keywordless = verses.iter().filter(|v| v.keywords.is_empty()).count();
        if keywordless > 0 {
            tracing::warn!("{keywordless} verse(s) carry no keywords and can never match");
        }

        Ok(Self { verses })
    }

    /// The corpus compiled into this crate.
    pub fn embedded() -> Result<Self> {
        let verses: Vec<Verse> = serde_json::from_str(EMBEDDED_CORPUS)
            .map_err(|e| SaarthiError::InvalidCorpus(format!("embedded corpus: {e}")))?;
        Self::from_verses(verses)
    }

    /// Load a corpus from a JSON file (array of verse objects, same schema
    /// as the embedded fixture).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SaarthiError::InvalidCorpus(format!("failed to read {}: {e}", path.display()))
        })?;
        let verses: Vec<Verse> = serde_json::from_str(&content).map_err(|e| {
            SaarthiError::InvalidCorpus(format!("failed to parse {}: {e}", path.display()))
        })?;
        let corpus = Self::from_verses(verses)?;
        tracing::info!("loaded corpus of {} verses from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Verses in corpus order.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verse> {
        self.verses.iter()
    }

    /// The verse returned when nothing matches: the first verse carrying
    /// the `"general"` sentinel, else the first verse in corpus order.
    pub fn fallback_verse(&self) -> Option<&Verse> {
        self.verses
            .iter()
            .find(|v| v.has_keyword(FALLBACK_KEYWORD))
            .or_else(|| self.verses.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(chapter: u32, number: u32, keywords: &[&str]) -> Verse {
        Verse {
            chapter_number: chapter,
            verse_number: number,
            original_text: "कर्मण्येवाधिकारस्ते".into(),
            transliteration: "karmaṇy evādhikāras te".into(),
            translation: "You have a right to action alone.".into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_embedded_corpus_loads() {
        let corpus = Corpus::embedded().unwrap();
        assert!(corpus.len() >= 50);
        // Ordered by chapter then verse
        let first = &corpus.verses()[0];
        assert_eq!(first.chapter_number, 2);
        // Sentinel present, so fallback never degrades
        assert!(corpus.iter().any(|v| v.has_keyword(FALLBACK_KEYWORD)));
    }

    #[test]
    fn test_embedded_keywords_are_lowercase_and_nonempty() {
        let corpus = Corpus::embedded().unwrap();
        for verse in corpus.iter() {
            assert!(!verse.keywords.is_empty(), "verse {} has no keywords", verse.citation());
            for kw in &verse.keywords {
                assert_eq!(kw, &kw.to_lowercase());
            }
        }
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let err = Corpus::from_verses(vec![]).unwrap_err();
        assert!(matches!(err, SaarthiError::InvalidCorpus(_)));
    }

    #[test]
    fn test_keywords_normalized_to_lowercase() {
        let corpus = Corpus::from_verses(vec![verse(2, 47, &["Duty", "WORK"])]).unwrap();
        let v = &corpus.verses()[0];
        assert!(v.has_keyword("duty"));
        assert!(v.has_keyword("work"));
        assert!(!v.has_keyword("Duty"));
    }

    #[test]
    fn test_fallback_prefers_general_sentinel() {
        let corpus = Corpus::from_verses(vec![
            verse(2, 47, &["duty"]),
            verse(9, 22, &["devotion", "general"]),
        ])
        .unwrap();
        assert_eq!(corpus.fallback_verse().unwrap().citation(), "9.22");
    }

    #[test]
    fn test_fallback_degrades_to_first_verse() {
        let corpus = Corpus::from_verses(vec![
            verse(2, 47, &["duty"]),
            verse(2, 48, &["balance"]),
        ])
        .unwrap();
        assert_eq!(corpus.fallback_verse().unwrap().citation(), "2.47");
    }

    #[test]
    fn test_citation_format() {
        assert_eq!(verse(18, 66, &["surrender"]).citation(), "18.66");
    }
}
