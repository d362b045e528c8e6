use serde::{Deserialize, Serialize};

use crate::AnswerStore;

/// The finished answer set of one session, as handed to a [`Submitter`](crate::Submitter).
///
/// Serializes to `{ "quizId": "...", "questionAnswers": [{ "id": "...", "answers": [...] }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub quiz_id: String,
    pub question_answers: Vec<QuestionAnswers>,
}

/// The answers recorded for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswers {
    /// The question id.
    pub id: String,
    pub answers: Vec<String>,
}

/// Wire envelope expected by the storage endpoint: `{ "quizData": <submission> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub quiz_data: Submission,
}

impl Submission {
    /// Shape an answer store into the submission payload, in recording order.
    pub fn from_answers(quiz_id: impl Into<String>, answers: &AnswerStore) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            question_answers: answers
                .iter()
                .map(|(question, value)| QuestionAnswers {
                    id: question.to_string(),
                    answers: value.to_strings(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.question_answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.question_answers.is_empty()
    }

    /// Wrap into the envelope the storage endpoint reads.
    pub fn into_quiz_data(self) -> QuizData {
        QuizData { quiz_data: self }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
