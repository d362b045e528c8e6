//! # quiz-flow
//!
//! Run branching quizzes one question at a time and submit the answers.
//! Frontend-agnostic.
//!
//! A quiz is a [`QuestionGraph`]: questions linked to their successors either
//! directly or through the answer that was picked. A [`Session`] walks the
//! graph with a pure reducer, collecting answers into an [`AnswerStore`] and
//! handing the finished [`Submission`] to a [`Submitter`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quiz_flow::{QuestionGraph, QuizDefinition, Session, HttpSubmitter};
//!
//! let graph = QuestionGraph::checked(QuizDefinition::load("quiz.toml")?)?;
//! let submitter = HttpSubmitter::new("https://example.org/store")?;
//!
//! let submission = Session::start(&graph).run(frontend, submitter)?;
//! ```
//!
//! ## Driving a session by hand
//!
//! Frontends that own their event loop (a web page, a TUI) can skip
//! [`Session::run`] and feed [`Action`]s through [`Session::dispatch`],
//! rendering whatever [`Session::render_flags`] asks for.
//!
//! ## Frontends and submitters
//!
//! - [`Frontend`] - asks questions; [`ScriptedFrontend`] plays back answers in tests
//! - [`HttpSubmitter`] - posts to a storage endpoint
//! - [`DirectorySubmitter`] - stores raw responses and monthly tallies on disk
//! - [`RecordingSubmitter`] - keeps payloads in memory

// Re-export all types from quiz-flow-types
pub use quiz_flow_types::*;

mod action;
pub use action::Action;

mod session_state;
pub use session_state::{Cursor, SessionState};

pub mod reducer;
pub use reducer::{Effect, Transition, reduce};

mod error;
pub use error::{FlowError, QuizError};

mod capture;
pub use capture::{
    CaptureError, ChoiceCapture, EMPTY_SELECTION_MESSAGE, MultiSelectCapture, TextCapture,
    TextRules,
};

mod submission;
pub use submission::{QuestionAnswers, QuizData, Submission};

mod submitter;
pub use submitter::{RecordingSubmitter, Rejected, Submitter};

mod http_submitter;
pub use http_submitter::{HttpSubmitter, SubmitError};

mod directory_submitter;
pub use directory_submitter::DirectorySubmitter;

pub mod results;
pub use results::QuizResults;

mod frontend;
pub use frontend::Frontend;

// Scripted frontend for running quizzes without user interaction
mod test_frontend;
pub use test_frontend::{ScriptError, ScriptedFrontend};

mod session;
pub use session::Session;

pub mod config;
pub use config::{ConfigError, ConfigLoader, QuizConfig};

pub mod logging;
pub use logging::{LogFormat, init_tracing};
