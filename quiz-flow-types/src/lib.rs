//! Core types for the quiz-flow crate.
//!
//! This crate provides the data side of a quiz:
//! - `QuizDefinition` and `QuestionGraph` - The static question graph
//! - `Question`, `QuestionKind` and `Answer` - Individual questions and their answers
//! - `AnswerValue` and `AnswerStore` - Answers collected during a session
//! - `RenderFlags` - Which input widget a question needs

mod ids;
pub use ids::{AnswerId, QuestionId};

mod question;
pub use question::{Answer, Question, QuestionKind};

mod question_graph;
pub use question_graph::{QuestionGraph, QuizDefinition};

mod answer_value;
pub use answer_value::AnswerValue;

mod answer_store;
pub use answer_store::{AnswerError, AnswerStore};

mod render;
pub use render::RenderFlags;

mod error;
pub use error::GraphError;
