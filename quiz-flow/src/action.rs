use crate::{AnswerValue, QuestionId};

/// Events the flow reducer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A widget captured an answer for the question it was showing.
    AnswerQuestion {
        question: QuestionId,
        answer: AnswerValue,
    },

    /// The last question has been answered; store the quiz.
    Complete,
}

impl Action {
    pub fn answer(question: QuestionId, answer: impl Into<AnswerValue>) -> Self {
        Self::AnswerQuestion {
            question,
            answer: answer.into(),
        }
    }
}
