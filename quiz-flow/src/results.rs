//! Consolidated per-answer tallies for one quiz and month.
//!
//! Each raw submission is stored under its own key; the consolidated results
//! document counts how often each answer was given and lists the raw files
//! that contributed.
//!
//! ```json
//! {
//!   "quizId": "1",
//!   "questionData": [
//!     { "questionId": "0",
//!       "results": [{ "answerId": "0", "count": 1, "rawResponseFiles": ["1/6-2020/<uuid>.json"] }] }
//!   ]
//! }
//! ```

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Submission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub quiz_id: String,
    pub question_data: Vec<QuestionData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    pub question_id: String,
    pub results: Vec<AnswerTally>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerTally {
    pub answer_id: String,
    pub count: u32,
    pub raw_response_files: Vec<String>,
}

impl QuizResults {
    pub fn new(quiz_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            question_data: Vec::new(),
        }
    }

    /// Fold one submission, stored at `raw_file`, into the tallies.
    pub fn record(&mut self, submission: &Submission, raw_file: &str) {
        for question in &submission.question_answers {
            let data = match self
                .question_data
                .iter()
                .position(|data| data.question_id == question.id)
            {
                Some(index) => &mut self.question_data[index],
                None => {
                    self.question_data.push(QuestionData {
                        question_id: question.id.clone(),
                        results: Vec::new(),
                    });
                    let last = self.question_data.len() - 1;
                    &mut self.question_data[last]
                }
            };

            for answer in &question.answers {
                match data.results.iter_mut().find(|t| &t.answer_id == answer) {
                    Some(tally) => {
                        tally.count += 1;
                        tally.raw_response_files.push(raw_file.to_string());
                    }
                    None => data.results.push(AnswerTally {
                        answer_id: answer.clone(),
                        count: 1,
                        raw_response_files: vec![raw_file.to_string()],
                    }),
                }
            }
        }
    }

    /// How often `answer` was given to `question`.
    pub fn count(&self, question: &str, answer: &str) -> u32 {
        self.question_data
            .iter()
            .find(|data| data.question_id == question)
            .and_then(|data| data.results.iter().find(|t| t.answer_id == answer))
            .map_or(0, |tally| tally.count)
    }
}

/// `<quizId>/<month>-<year>`, the folder a month's responses live in.
fn month_folder(quiz_id: &str, date: impl Datelike) -> String {
    format!("{quiz_id}/{}-{}", date.month(), date.year())
}

/// Storage key of one raw response: `<quizId>/<month>-<year>/<uuid>.json`.
pub fn raw_response_key(quiz_id: &str, date: impl Datelike, id: Uuid) -> String {
    format!("{}/{id}.json", month_folder(quiz_id, date))
}

/// Storage key of the consolidated results: `<quizId>/<month>-<year>/<quizId>.json`.
pub fn results_key(quiz_id: &str, date: impl Datelike) -> String {
    format!("{}/{quiz_id}.json", month_folder(quiz_id, date))
}
