//! # Saarthi Agent
//!
//! The guidance orchestrator: retrieval-augmented generation over the
//! verse corpus.
//!
//! One request flows retrieve → augment → generate: the matcher picks 1–3
//! verses for the seeker's problem, the verses and the problem are woven
//! into a prompt, and the configured provider turns them into counsel.
//!
//! The engine admits at most one in-flight guidance request. A second
//! call while one is pending fails fast with `SaarthiError::Busy`; there
//! is no cancellation of the request already running.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use saarthi_core::config::SaarthiConfig;
use saarthi_core::error::{Result, SaarthiError};
use saarthi_core::traits::provider::{GenerateParams, Provider};
use saarthi_core::types::Message;
use saarthi_corpus::{Corpus, Verse};

/// System prompt framing the model as a Gita counselor. The model is told
/// to ground its answer only in the verses the matcher supplies.
const SYSTEM_PROMPT: &str = "You are Saarthi, a compassionate guide who offers counsel \
drawn from the Bhagavad Gita. You will receive a seeker's problem together with a small \
set of verses. Ground your guidance ONLY in those verses — quote their citations \
(chapter.verse) where you draw on them, and do not invent or cite verses you were not \
given. Speak with warmth, practically and without judgment. Close by gently noting that \
this is spiritual reflection, not professional medical, legal, or financial advice.";

/// What the caller sends in.
#[derive(Debug, Clone)]
pub struct GuidanceRequest {
    /// Free-text problem statement.
    pub problem: String,
    /// Language the counsel should be written in.
    pub language: String,
}

/// What comes back: the generated counsel plus the verses it was
/// grounded in.
#[derive(Debug, Clone, Serialize)]
pub struct GuidanceResponse {
    pub guidance: String,
    pub verses: Vec<Verse>,
    /// Model that produced the counsel, as reported by the provider.
    pub model: String,
}

/// The guidance engine. Shared behind an `Arc` by the gateway; the corpus
/// is read-only and the provider is stateless, so `&self` methods are safe
/// from any task.
pub struct GuidanceEngine {
    provider: Box<dyn Provider>,
    corpus: Corpus,
    params: GenerateParams,
    default_language: String,
    in_flight: AtomicBool,
}

impl GuidanceEngine {
    /// Build an engine from configuration: resolve the provider and load
    /// the corpus (config path override, else the embedded fixture).
    pub fn new(config: &SaarthiConfig) -> Result<Self> {
        let corpus = match config.corpus.resolved_path() {
            Some(path) => Corpus::load_from(&path)?,
            None => Corpus::embedded()?,
        };
        let provider = saarthi_providers::create_provider(config)?;
        Ok(Self::from_parts(config, provider, corpus))
    }

    /// Wire an engine from explicit parts. Used by tests and embedders
    /// that bring their own provider or corpus.
    pub fn from_parts(config: &SaarthiConfig, provider: Box<dyn Provider>, corpus: Corpus) -> Self {
        Self {
            provider,
            corpus,
            params: GenerateParams {
                model: config.llm.model.clone(),
                temperature: config.llm.temperature,
                max_tokens: config.llm.max_tokens,
            },
            default_language: config.guidance.default_language.clone(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether a guidance request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Retrieval only: the verses the matcher would ground guidance in.
    pub fn find_verses(&self, problem: &str) -> Result<Vec<&Verse>> {
        saarthi_matcher::find_relevant_verses(problem, &self.corpus)
    }

    /// Run the full pipeline for one request.
    pub async fn seek_guidance(&self, request: &GuidanceRequest) -> Result<GuidanceResponse> {
        let _guard = self.begin()?;

        let verses: Vec<Verse> = saarthi_matcher::find_relevant_verses(&request.problem, &self.corpus)?
            .into_iter()
            .cloned()
            .collect();
        tracing::info!(
            citations = ?verses.iter().map(Verse::citation).collect::<Vec<_>>(),
            "retrieved verses for guidance"
        );

        let language = if request.language.trim().is_empty() {
            &self.default_language
        } else {
            &request.language
        };
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(build_prompt(&request.problem, &verses, language)),
        ];

        let response = self.provider.chat(&messages, &self.params).await?;
        Ok(GuidanceResponse {
            guidance: response.content,
            verses,
            model: response.model,
        })
    }

    /// Claim the single in-flight slot, or fail fast with `Busy`.
    fn begin(&self) -> Result<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SaarthiError::Busy)?;
        Ok(InFlightGuard(&self.in_flight))
    }
}

/// Releases the in-flight slot when the request finishes, on success and
/// error paths alike.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Weave the retrieved verses and the seeker's problem into the user
/// message sent to the provider.
fn build_prompt(problem: &str, verses: &[Verse], language: &str) -> String {
    let mut prompt = String::from("The seeker writes:\n");
    prompt.push_str(problem.trim());
    prompt.push_str("\n\nVerses to ground your counsel in:\n");
    for verse in verses {
        prompt.push_str(&format!(
            "\nVerse {}\nSanskrit: {}\nTransliteration: {}\nTranslation: {}\n",
            verse.citation(),
            verse.original_text,
            verse.transliteration,
            verse.translation,
        ));
    }
    prompt.push_str(&format!("\nWrite your guidance in {language}."));
    prompt
}
