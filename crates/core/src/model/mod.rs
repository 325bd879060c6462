pub mod capture;
pub mod catalog;
pub mod compare;
pub mod practice;
pub mod topic;

pub use capture::{CaptureEffect, CaptureSignal, CaptureState, step as capture_step};
pub use catalog::{CatalogError, TopicCatalog};
pub use compare::{WordMark, normalize_word, transcript_matches, word_marks};
pub use practice::{
    PracticeEvent, PracticeState, ROUND_TARGET, SCORE_PER_CORRECT, Verdict, reduce,
};
pub use topic::{Topic, TopicError, TopicId};
