use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::topic::{Topic, TopicId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("topic {0} not found")]
    NotFound(TopicId),

    #[error("duplicate topic id {0}")]
    Duplicate(TopicId),
}

/// Immutable, ordered collection of practice topics, unique by id.
///
/// Loaded once at startup, either the built-in bank or a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Topic>", into = "Vec<Topic>")]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Builds a catalog, rejecting duplicate topic ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Duplicate` for a repeated id.
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        for (index, topic) in topics.iter().enumerate() {
            if topics[..index].iter().any(|seen| seen.id() == topic.id()) {
                return Err(CatalogError::Duplicate(topic.id().clone()));
            }
        }
        Ok(Self { topics })
    }

    /// The built-in English grammar bank: eight topics, five sentences each.
    #[must_use]
    pub fn builtin() -> Self {
        let topics = vec![
            topic(
                "simple-present",
                "Simple Present",
                "Used for habits, routines, and general truths",
                &[
                    "I play tennis every weekend",
                    "She works in a hospital",
                    "They live in London",
                    "The sun rises in the east",
                    "He speaks three languages",
                ],
            ),
            topic(
                "present-continuous",
                "Present Continuous",
                "Used for actions happening now or temporary situations",
                &[
                    "I am reading a book right now",
                    "They are playing football in the park",
                    "She is studying for her exam",
                    "We are having dinner",
                    "He is working on a new project",
                ],
            ),
            topic(
                "simple-past",
                "Simple Past",
                "Used for completed actions in the past",
                &[
                    "I visited Paris last summer",
                    "She bought a new car yesterday",
                    "They watched a movie last night",
                    "He finished work early",
                    "We played tennis on Sunday",
                ],
            ),
            topic(
                "past-continuous",
                "Past Continuous",
                "Used for actions that were in progress in the past",
                &[
                    "I was reading when you called",
                    "They were playing while it was raining",
                    "She was working late last night",
                    "We were having dinner at 8 PM",
                    "He was studying all evening",
                ],
            ),
            topic(
                "present-perfect",
                "Present Perfect",
                "Used for past actions with present relevance",
                &[
                    "I have visited Paris three times",
                    "She has lived here for five years",
                    "They have just arrived",
                    "We have never seen that movie",
                    "He has already finished the work",
                ],
            ),
            topic(
                "simple-future",
                "Simple Future",
                "Used for predictions and future plans",
                &[
                    "I will travel to Japan next year",
                    "They will arrive tomorrow morning",
                    "She will help us later",
                    "We will meet at the station",
                    "He will finish the project soon",
                ],
            ),
            topic(
                "future-continuous",
                "Future Continuous",
                "Used for actions that will be in progress in the future",
                &[
                    "I will be working at 9 AM tomorrow",
                    "They will be traveling all day",
                    "She will be studying when you arrive",
                    "We will be having dinner at 8 PM",
                    "He will be presenting his project",
                ],
            ),
            topic(
                "conditionals",
                "Conditionals",
                "Used to express hypothetical situations",
                &[
                    "If it rains, I will stay home",
                    "If I had more time, I would travel more",
                    "If you study hard, you will pass the exam",
                    "If I were you, I would accept the offer",
                    "If we had known earlier, we would have helped",
                ],
            ),
        ];
        Self::new(topics).expect("built-in catalog ids should be unique")
    }

    /// Looks up a topic by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id.
    pub fn get(&self, id: &TopicId) -> Result<&Topic, CatalogError> {
        self.topics
            .iter()
            .find(|topic| topic.id() == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl TryFrom<Vec<Topic>> for TopicCatalog {
    type Error = CatalogError;

    fn try_from(topics: Vec<Topic>) -> Result<Self, Self::Error> {
        Self::new(topics)
    }
}

impl From<TopicCatalog> for Vec<Topic> {
    fn from(catalog: TopicCatalog) -> Self {
        catalog.topics
    }
}

fn topic(slug: &str, title: &str, description: &str, sentences: &[&str]) -> Topic {
    let id = TopicId::new(slug).expect("built-in topic id should be a valid slug");
    let sentences = sentences.iter().map(|s| (*s).to_string()).collect();
    Topic::new(id, title, description, sentences).expect("built-in topic bank should be non-empty")
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_eight_unique_topics() {
        let catalog = TopicCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        for topic in catalog.topics() {
            assert!(!topic.sentences().is_empty());
            let matching = catalog
                .topics()
                .iter()
                .filter(|other| other.id() == topic.id())
                .count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn lookup_finds_known_topics() {
        let catalog = TopicCatalog::builtin();
        let id = TopicId::new("simple-past").unwrap();
        assert_eq!(catalog.get(&id).unwrap().title(), "Simple Past");
    }

    #[test]
    fn lookup_fails_for_unknown_topic() {
        let catalog = TopicCatalog::builtin();
        let id = TopicId::new("past-perfect").unwrap();
        let err = catalog.get(&id).unwrap_err();
        assert_eq!(err, CatalogError::NotFound(id));
        assert_eq!(err.to_string(), "topic past-perfect not found");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let id = TopicId::new("simple-past").unwrap();
        let first = Topic::new(
            id.clone(),
            "Simple Past",
            "Completed actions",
            vec!["I visited Paris last summer".to_string()],
        )
        .unwrap();
        let second = first.clone();
        let err = TopicCatalog::new(vec![first, second]).unwrap_err();
        assert_eq!(err, CatalogError::Duplicate(id));
    }

    #[test]
    fn catalog_roundtrips_through_json() {
        let catalog = TopicCatalog::builtin();
        let raw = serde_json::to_string(&catalog).unwrap();
        let restored: TopicCatalog = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, catalog);
    }
}
