//! Scripted frontend for running quizzes without user interaction.
//!
//! `ScriptedFrontend` plays back pre-defined answers per question, feeding
//! them through the same capture widgets a real frontend uses. This is useful
//! for testing quiz definitions end to end.
//!
//! # Example
//!
//! ```rust
//! use quiz_flow::{
//!     Answer, Question, QuestionGraph, QuizDefinition, RecordingSubmitter, ScriptedFrontend,
//!     Session,
//! };
//!
//! let graph = QuestionGraph::new(QuizDefinition::new(
//!     "demo",
//!     vec![
//!         Question::button(0, "Ready?", vec![Answer::new(1, "Yes").leads_to(1)]),
//!         Question::text(1, "Say something").terminal(),
//!     ],
//! ))
//! .unwrap();
//!
//! let frontend = ScriptedFrontend::new()
//!     .with_choice(0, 1)
//!     .with_text(1, "hello");
//! let submitter = RecordingSubmitter::new();
//!
//! let submission = Session::start(&graph).run(&frontend, &submitter).unwrap();
//! assert_eq!(submission.question_answers.len(), 2);
//! assert_eq!(submitter.count(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::{
    Action, AnswerId, AnswerValue, CaptureError, ChoiceCapture, Frontend, MultiSelectCapture,
    Question, QuestionId, QuestionKind, RenderFlags, Submission, TextCapture, TextRules,
};

/// A frontend that answers from a script.
///
/// Each question has a queue of answers. Answers the capture widgets reject
/// are recorded as alerts and the next queued answer is tried, just like a
/// user correcting their input.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    script: RefCell<HashMap<QuestionId, VecDeque<AnswerValue>>>,
    cancel_at: Option<QuestionId>,
    fail_finish: bool,
    text_rules: TextRules,
    rendered: RefCell<Vec<(QuestionId, RenderFlags)>>,
    alerts: RefCell<Vec<(QuestionId, String)>>,
}

/// Error type for ScriptedFrontend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("No scripted answer left for question {0}")]
    Exhausted(QuestionId),

    #[error("Quiz cancelled by user")]
    Cancelled,

    #[error("Completion screen could not be shown")]
    Finish,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for a question.
    pub fn with_answer(self, question: impl Into<QuestionId>, answer: impl Into<AnswerValue>) -> Self {
        self.script
            .borrow_mut()
            .entry(question.into())
            .or_default()
            .push_back(answer.into());
        self
    }

    /// Queue a button click.
    pub fn with_choice(self, question: impl Into<QuestionId>, answer: u32) -> Self {
        self.with_answer(question, AnswerId::new(answer))
    }

    /// Queue a multi-select submission. An empty list submits nothing ticked.
    pub fn with_selection(self, question: impl Into<QuestionId>, answers: &[u32]) -> Self {
        self.with_answer(
            question,
            AnswerValue::Selection(answers.iter().copied().map(AnswerId::new).collect()),
        )
    }

    /// Queue a text submission.
    pub fn with_text(self, question: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        self.with_answer(question, AnswerValue::Text(text.into()))
    }

    /// Act as if the user quits when this question comes up.
    pub fn cancel_at(mut self, question: impl Into<QuestionId>) -> Self {
        self.cancel_at = Some(question.into());
        self
    }

    /// Fail when asked to show the completion screen.
    pub fn failing_finish(mut self) -> Self {
        self.fail_finish = true;
        self
    }

    pub fn with_text_rules(mut self, rules: TextRules) -> Self {
        self.text_rules = rules;
        self
    }

    /// Questions shown so far, with the widget flags they were shown with.
    pub fn rendered(&self) -> Vec<(QuestionId, RenderFlags)> {
        self.rendered.borrow().clone()
    }

    /// Validation messages shown so far.
    pub fn alerts(&self) -> Vec<(QuestionId, String)> {
        self.alerts.borrow().clone()
    }

    fn next_answer(&self, question: QuestionId) -> Option<AnswerValue> {
        self.script
            .borrow_mut()
            .get_mut(&question)
            .and_then(VecDeque::pop_front)
    }

    fn capture(&self, question: &Question, answer: AnswerValue) -> Result<Action, CaptureError> {
        match (question.kind(), answer) {
            (QuestionKind::Button, AnswerValue::Choice(id)) => ChoiceCapture::new(question).select(id),
            (QuestionKind::MultiSelect, AnswerValue::Selection(ids)) => {
                let mut capture = MultiSelectCapture::new(question);
                for id in ids {
                    capture.toggle(id)?;
                }
                capture.submit()
            }
            (QuestionKind::Text, AnswerValue::Text(text)) => {
                TextCapture::new(question, self.text_rules.clone()).submit(&text)
            }
            // Hand mismatched answers to the reducer untouched so its checks
            // can be exercised.
            (_, answer) => Ok(Action::answer(question.id(), answer)),
        }
    }
}

impl Frontend for ScriptedFrontend {
    type Error = ScriptError;

    fn ask(&self, question: &Question, flags: RenderFlags) -> Result<Action, Self::Error> {
        self.rendered.borrow_mut().push((question.id(), flags));

        if self.cancel_at == Some(question.id()) {
            return Err(ScriptError::Cancelled);
        }

        loop {
            let answer = self
                .next_answer(question.id())
                .ok_or(ScriptError::Exhausted(question.id()))?;
            match self.capture(question, answer) {
                Ok(action) => return Ok(action),
                Err(err) => self
                    .alerts
                    .borrow_mut()
                    .push((question.id(), err.to_string())),
            }
        }
    }

    fn alert(&self, question: &Question, message: &str) -> Result<(), Self::Error> {
        self.alerts
            .borrow_mut()
            .push((question.id(), message.to_string()));
        Ok(())
    }

    fn finish(&self, _submission: &Submission) -> Result<(), Self::Error> {
        if self.fail_finish {
            return Err(ScriptError::Finish);
        }
        Ok(())
    }

    fn is_cancelled(error: &Self::Error) -> bool {
        matches!(error, ScriptError::Cancelled)
    }
}
