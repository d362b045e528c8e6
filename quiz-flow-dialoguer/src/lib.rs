//! # quiz-flow-dialoguer
//!
//! Dialoguer frontend for quiz-flow.
//!
//! Questions are asked one after another on the terminal, following the
//! branches of the quiz graph.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quiz_flow::{QuestionGraph, QuizDefinition, RecordingSubmitter, Session};
//! use quiz_flow_dialoguer::DialoguerFrontend;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = QuestionGraph::checked(QuizDefinition::load("quiz.toml")?)?;
//!     let submission = Session::start(&graph).run(DialoguerFrontend::new(), RecordingSubmitter::new())?;
//!     println!("{}", submission.to_json()?);
//!     Ok(())
//! }
//! ```

mod frontend;

pub use frontend::{DialoguerError, DialoguerFrontend};
