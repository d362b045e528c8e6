use std::path::PathBuf;

use crate::{AnswerId, QuestionId, QuestionKind};

/// Problems with a quiz definition or its question graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A question declared a type tag no widget exists for.
    #[error("Unknown question type '{0}' (expected button, multiSelect or text)")]
    UnknownQuestionKind(String),

    #[error("Duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("Duplicate answer id {0}")]
    DuplicateAnswer(AnswerId),

    #[error("Root question {0} is not part of the quiz")]
    MissingRoot(QuestionId),

    /// A successor link names a question that does not exist.
    #[error("{} points to missing question {target}", origin(.question, .answer))]
    DanglingSuccessor {
        question: QuestionId,
        answer: Option<AnswerId>,
        target: QuestionId,
    },

    /// Traversal cannot continue past this question.
    #[error("{} has no successor", origin(.question, .answer))]
    MissingSuccessor {
        question: QuestionId,
        answer: Option<AnswerId>,
    },

    #[error("Question {0} ({1}) offers no answers")]
    NoAnswers(QuestionId, QuestionKind),

    /// Without an explicit successor, all answers of a multi-select question
    /// must lead to the same place.
    #[error("Multi-select question {0} has no successor of its own and its answers lead to different questions")]
    DivergentMultiSelect(QuestionId),

    #[error("Failed to read quiz definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quiz definition: {0}")]
    Parse(#[source] anyhow::Error),
}

impl GraphError {
    pub fn parse(err: impl Into<anyhow::Error>) -> Self {
        Self::Parse(err.into())
    }
}

fn origin(question: &QuestionId, answer: &Option<AnswerId>) -> String {
    match answer {
        Some(answer) => format!("Answer {answer} of question {question}"),
        None => format!("Question {question}"),
    }
}
