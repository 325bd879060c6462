use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic id is empty")]
    EmptyId,

    #[error("topic id {0:?} is not a lowercase slug")]
    InvalidId(String),

    #[error("topic {0:?} has an empty sentence bank")]
    EmptyBank(String),
}

/// Identifier for a grammar topic, a lowercase slug such as `simple-past`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TopicId(String);

impl TopicId {
    /// Validates and creates a new `TopicId`.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyId` for an empty slug and
    /// `TopicError::InvalidId` for anything outside `[a-z0-9-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, TopicError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(TopicError::EmptyId);
        }
        let valid = slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !valid {
            return Err(TopicError::InvalidId(slug));
        }
        Ok(Self(slug))
    }

    /// Returns the underlying slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TopicId {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Raw topic shape accepted from configuration files.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicDraft {
    id: String,
    title: String,
    description: String,
    sentences: Vec<String>,
}

/// A named grammar category with its example sentence bank.
///
/// Immutable once constructed; the bank is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TopicDraft")]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    sentences: Vec<String>,
}

impl Topic {
    /// Creates a topic from validated parts.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyBank` when no sentences are provided.
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        description: impl Into<String>,
        sentences: Vec<String>,
    ) -> Result<Self, TopicError> {
        if sentences.is_empty() {
            return Err(TopicError::EmptyBank(id.to_string()));
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            sentences,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The ordered example sentences for this topic. Never empty.
    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }
}

impl TryFrom<TopicDraft> for Topic {
    type Error = TopicError;

    fn try_from(draft: TopicDraft) -> Result<Self, Self::Error> {
        Self::new(
            TopicId::new(draft.id)?,
            draft.title,
            draft.description,
            draft.sentences,
        )
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
