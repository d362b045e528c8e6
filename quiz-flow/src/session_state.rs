use crate::{AnswerStore, QuestionGraph, QuestionId};

/// Where a session currently is in the question graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Waiting for an answer to this question.
    At(QuestionId),

    /// A terminal question has been answered; only `Complete` is left.
    Finished,
}

/// The state of one quiz session.
///
/// Values are never mutated by the reducer: every transition produces a new
/// `SessionState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    quiz_id: String,
    cursor: Cursor,
    answers: AnswerStore,
    completed: bool,
}

impl SessionState {
    /// A fresh session positioned at the graph's root question.
    pub fn new(graph: &QuestionGraph) -> Self {
        Self {
            quiz_id: graph.quiz_id().to_string(),
            cursor: Cursor::At(graph.root()),
            answers: AnswerStore::new(),
            completed: false,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The question awaiting an answer, if any.
    pub fn current_question_id(&self) -> Option<QuestionId> {
        match self.cursor {
            Cursor::At(id) => Some(id),
            Cursor::Finished => None,
        }
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn advanced(&self, answers: AnswerStore, cursor: Cursor) -> Self {
        Self {
            quiz_id: self.quiz_id.clone(),
            cursor,
            answers,
            completed: self.completed,
        }
    }

    pub(crate) fn marked_completed(&self) -> Self {
        Self {
            completed: true,
            ..self.clone()
        }
    }
}
