use crate::{AnswerId, QuestionId, QuestionKind, Submission};

/// A transition the flow reducer refused.
///
/// The reducer never changes the state it was given, so after any of these
/// errors the session is exactly where it was before the action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Quiz has already been completed")]
    AlreadyCompleted,

    #[error("No question is awaiting an answer")]
    NoActiveQuestion,

    /// The answer was captured for a question that is no longer current.
    #[error("Answer for question {got} arrived while question {expected} is active")]
    StaleAnswer {
        expected: QuestionId,
        got: QuestionId,
    },

    #[error("Question {0} is not part of the quiz")]
    UnknownQuestion(QuestionId),

    #[error("Incomplete graph: question {question} leads to missing question {target}")]
    IncompleteGraph {
        question: QuestionId,
        target: QuestionId,
    },

    #[error("Incomplete graph: question {question} has no successor{}", via(.answer))]
    NoSuccessor {
        question: QuestionId,
        answer: Option<AnswerId>,
    },

    #[error("Question {question} expects a {expected} answer, got {actual}")]
    AnswerKindMismatch {
        question: QuestionId,
        expected: QuestionKind,
        actual: QuestionKind,
    },

    #[error("Answer {answer} is not offered by question {question}")]
    UnknownAnswer {
        question: QuestionId,
        answer: AnswerId,
    },

    #[error("Question {0} needs at least one selected answer")]
    EmptySelection(QuestionId),

    #[error("Selected answers of question {question} lead to different questions: {targets:?}")]
    AmbiguousSuccessor {
        question: QuestionId,
        targets: Vec<QuestionId>,
    },

    #[error("Quiz is not finished yet, question {0} is still awaiting an answer")]
    NotFinished(QuestionId),
}

fn via(answer: &Option<AnswerId>) -> String {
    match answer {
        Some(answer) => format!(" through answer {answer}"),
        None => String::new(),
    }
}

impl FlowError {
    /// Whether asking the same question again can fix this.
    ///
    /// Bad input from a widget is recoverable; a broken graph or a misuse of
    /// the session lifecycle is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AnswerKindMismatch { .. }
                | Self::UnknownAnswer { .. }
                | Self::EmptySelection(_)
                | Self::AmbiguousSuccessor { .. }
                | Self::StaleAnswer { .. }
        )
    }
}

/// Error type for running a quiz session end to end.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// User cancelled the quiz (Ctrl+C, Escape, closed window).
    #[error("Quiz cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Frontend-specific failure (I/O, terminal gone, script exhausted).
    #[error("Frontend error: {0}")]
    Frontend(anyhow::Error),

    /// The submitter rejected the payload. The payload is kept so it can be
    /// retried or saved.
    #[error("Submission failed: {source}")]
    Submission {
        submission: Box<Submission>,
        #[source]
        source: anyhow::Error,
    },
}

impl QuizError {
    pub fn frontend(err: impl Into<anyhow::Error>) -> Self {
        Self::Frontend(err.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The payload that could not be submitted, if that is what failed.
    pub fn unsubmitted(&self) -> Option<&Submission> {
        match self {
            Self::Submission { submission, .. } => Some(submission),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(QuizError::Cancelled.to_string(), "Quiz cancelled by user");

        let err = FlowError::NoSuccessor {
            question: QuestionId::new(3),
            answer: Some(AnswerId::new(4)),
        };
        assert_eq!(
            err.to_string(),
            "Incomplete graph: question 3 has no successor through answer 4"
        );

        let err = FlowError::IncompleteGraph {
            question: QuestionId::new(0),
            target: QuestionId::new(9),
        };
        assert!(err.to_string().starts_with("Incomplete graph"));
    }

    #[test]
    fn recoverable() {
        assert!(FlowError::EmptySelection(QuestionId::new(2)).is_recoverable());
        assert!(!FlowError::AlreadyCompleted.is_recoverable());
        assert!(
            !FlowError::IncompleteGraph {
                question: QuestionId::new(0),
                target: QuestionId::new(1),
            }
            .is_recoverable()
        );
    }
}
