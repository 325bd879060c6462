#![forbid(unsafe_code)]

pub mod error;
pub mod genai;
pub mod practice_loop;
pub mod sentences;
pub mod validate;

pub use drill_core::Clock;

pub use error::{GenAiError, SentenceError, ValidateError};
pub use genai::{GenAiClient, GenAiConfig};
pub use practice_loop::{PracticeLoopService, RoundToken};
pub use sentences::{BankSentenceSource, GenerativeSentenceSource, SentenceSource};
pub use validate::{ResponseValidator, SemanticValidator, WordMatchValidator};
