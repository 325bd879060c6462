use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use rand::Rng;

use drill_core::model::{TopicCatalog, TopicId};

use crate::error::SentenceError;
use crate::genai::GenAiClient;

/// Supplies one target sentence per round.
///
/// No caching and no dedup: every call is a fresh pick or a fresh network
/// round-trip, and repeated sentences within a session are allowed.
#[async_trait]
pub trait SentenceSource: Send + Sync {
    /// Returns one sentence for the topic.
    ///
    /// # Errors
    ///
    /// Returns `SentenceError::Catalog` for an unknown topic and
    /// `SentenceError::Generation` when the remote model fails.
    async fn next(&self, topic: &TopicId) -> Result<String, SentenceError>;
}

/// Uniform random pick from the topic's fixed bank.
pub struct BankSentenceSource {
    catalog: Arc<TopicCatalog>,
}

impl BankSentenceSource {
    #[must_use]
    pub fn new(catalog: Arc<TopicCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl SentenceSource for BankSentenceSource {
    async fn next(&self, topic: &TopicId) -> Result<String, SentenceError> {
        let topic = self.catalog.get(topic)?;
        // The catalog guarantees a non-empty bank.
        let sentences = topic.sentences();
        let index = rand::rng().random_range(0..sentences.len());
        Ok(sentences[index].clone())
    }
}

/// Requests a fresh sentence from the hosted model. No retry, no backoff.
pub struct GenerativeSentenceSource {
    client: GenAiClient,
    catalog: Arc<TopicCatalog>,
}

impl GenerativeSentenceSource {
    #[must_use]
    pub fn new(client: GenAiClient, catalog: Arc<TopicCatalog>) -> Self {
        Self { client, catalog }
    }
}

#[async_trait]
impl SentenceSource for GenerativeSentenceSource {
    async fn next(&self, topic: &TopicId) -> Result<String, SentenceError> {
        let topic = self.catalog.get(topic)?;
        let prompt = generation_prompt(topic.title());
        self.client.generate(&prompt).await.map_err(|err| {
            warn!("sentence generation failed: {err}");
            SentenceError::Generation(err)
        })
    }
}

fn generation_prompt(topic_title: &str) -> String {
    format!(
        "Generate a simple English sentence for language practice on the topic \
         \"{topic_title}\". The sentence should be clear and use basic grammar. \
         Return ONLY the sentence, without any additional text, explanation or \
         punctuation at the start or end."
    )
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::CatalogError;

    #[tokio::test]
    async fn bank_source_draws_from_the_topic_bank() {
        let catalog = Arc::new(TopicCatalog::builtin());
        let source = BankSentenceSource::new(Arc::clone(&catalog));
        let id = TopicId::new("simple-past").unwrap();
        let bank = catalog.get(&id).unwrap().sentences().to_vec();

        for _ in 0..20 {
            let sentence = source.next(&id).await.unwrap();
            assert!(bank.contains(&sentence), "{sentence} not in bank");
        }
    }

    #[tokio::test]
    async fn bank_source_fails_for_unknown_topic() {
        let source = BankSentenceSource::new(Arc::new(TopicCatalog::builtin()));
        let id = TopicId::new("past-perfect").unwrap();
        let err = source.next(&id).await.unwrap_err();
        assert!(matches!(
            err,
            SentenceError::Catalog(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn generation_prompt_names_the_topic() {
        let prompt = generation_prompt("Simple Past");
        assert!(prompt.contains("\"Simple Past\""));
        assert!(prompt.contains("ONLY the sentence"));
    }
}
