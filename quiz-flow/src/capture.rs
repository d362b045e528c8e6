//! Input capture for the three widget kinds.
//!
//! Captures turn raw user input into an [`Action`] for the reducer, or into a
//! [`CaptureError`] the view shows without touching the session.

use serde::{Deserialize, Serialize};

use crate::{Action, AnswerId, AnswerValue, Question, QuestionId};

/// Alert shown when a multi-select is submitted with nothing ticked.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select one or more answers from the select.";

/// User-facing validation failures. None of them changes the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("Please select one or more answers from the select.")]
    EmptySelection,

    #[error("That answer is not one of the options")]
    NotAnOption(AnswerId),

    #[error("There is no option at position {0}")]
    NoOptionAt(usize),

    #[error("Please enter an answer.")]
    EmptyText,

    #[error("Please keep your answer under {max} characters ({len} entered).")]
    TextTooLong { len: usize, max: usize },
}

/// Button widget: one click is one answer.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceCapture<'q> {
    question: &'q Question,
}

impl<'q> ChoiceCapture<'q> {
    pub fn new(question: &'q Question) -> Self {
        Self { question }
    }

    /// Emit the answer for the clicked option.
    pub fn select(&self, answer: AnswerId) -> Result<Action, CaptureError> {
        if !self.question.offers(answer) {
            return Err(CaptureError::NotAnOption(answer));
        }
        Ok(Action::answer(self.question.id(), answer))
    }

    /// Emit the answer at a display position (e.g. a menu index).
    pub fn select_index(&self, index: usize) -> Result<Action, CaptureError> {
        match self.question.answers().get(index) {
            Some(answer) => self.select(answer.id),
            None => Err(CaptureError::NoOptionAt(index)),
        }
    }
}

/// Multi-select widget: tick any number of options, then continue.
#[derive(Debug, Clone)]
pub struct MultiSelectCapture<'q> {
    question: &'q Question,
    selected: Vec<AnswerId>,
}

impl<'q> MultiSelectCapture<'q> {
    pub fn new(question: &'q Question) -> Self {
        Self {
            question,
            selected: Vec::new(),
        }
    }

    /// Tick or untick an option. Returns whether it is ticked afterwards.
    pub fn toggle(&mut self, answer: AnswerId) -> Result<bool, CaptureError> {
        if !self.question.offers(answer) {
            return Err(CaptureError::NotAnOption(answer));
        }
        if let Some(pos) = self.selected.iter().position(|id| *id == answer) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(answer);
            Ok(true)
        }
    }

    /// Replace the selection with the options at the given display positions.
    pub fn set_indices(&mut self, indices: &[usize]) -> Result<(), CaptureError> {
        let mut selected = Vec::with_capacity(indices.len());
        for &index in indices {
            let answer = self
                .question
                .answers()
                .get(index)
                .ok_or(CaptureError::NoOptionAt(index))?;
            if !selected.contains(&answer.id) {
                selected.push(answer.id);
            }
        }
        self.selected = selected;
        Ok(())
    }

    pub fn selected(&self) -> &[AnswerId] {
        &self.selected
    }

    pub fn is_selected(&self, answer: AnswerId) -> bool {
        self.selected.contains(&answer)
    }

    /// Emit the selection, or refuse if nothing is ticked.
    pub fn submit(&self) -> Result<Action, CaptureError> {
        if self.selected.is_empty() {
            return Err(CaptureError::EmptySelection);
        }
        Ok(Action::answer(
            self.question.id(),
            AnswerValue::selection(self.selected.iter().copied()),
        ))
    }
}

/// Limits applied to free-text answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRules {
    /// Accept answers that are empty after trimming.
    pub allow_empty: bool,

    /// Maximum length in characters, after trimming.
    pub max_len: usize,
}

impl Default for TextRules {
    fn default() -> Self {
        Self {
            allow_empty: false,
            max_len: 500,
        }
    }
}

impl TextRules {
    /// Check a raw input and return the trimmed text to record.
    pub fn check<'a>(&self, input: &'a str) -> Result<&'a str, CaptureError> {
        let text = input.trim();
        if text.is_empty() && !self.allow_empty {
            return Err(CaptureError::EmptyText);
        }
        let len = text.chars().count();
        if len > self.max_len {
            return Err(CaptureError::TextTooLong {
                len,
                max: self.max_len,
            });
        }
        Ok(text)
    }
}

/// Text widget.
#[derive(Debug, Clone)]
pub struct TextCapture {
    question: QuestionId,
    rules: TextRules,
}

impl TextCapture {
    pub fn new(question: &Question, rules: TextRules) -> Self {
        Self {
            question: question.id(),
            rules,
        }
    }

    pub fn rules(&self) -> &TextRules {
        &self.rules
    }

    pub fn submit(&self, input: &str) -> Result<Action, CaptureError> {
        let text = self.rules.check(input)?;
        Ok(Action::answer(self.question, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Answer;

    fn multi() -> Question {
        Question::multi_select(
            2,
            "Pick",
            vec![Answer::new(7, "A"), Answer::new(8, "B"), Answer::new(9, "C")],
        )
        .then(5)
    }

    #[test]
    fn empty_multi_select_emits_nothing() {
        let question = multi();
        let capture = MultiSelectCapture::new(&question);

        let err = capture.submit().unwrap_err();
        assert_eq!(err, CaptureError::EmptySelection);
        assert_eq!(err.to_string(), EMPTY_SELECTION_MESSAGE);
    }

    #[test]
    fn toggling() {
        let question = multi();
        let mut capture = MultiSelectCapture::new(&question);

        assert!(capture.toggle(AnswerId::new(8)).unwrap());
        assert!(capture.toggle(AnswerId::new(7)).unwrap());
        assert!(capture.toggle(AnswerId::new(9)).unwrap());
        assert!(!capture.toggle(AnswerId::new(9)).unwrap());
        assert!(capture.toggle(AnswerId::new(1)).is_err());

        assert_eq!(
            capture.submit().unwrap(),
            Action::answer(
                QuestionId::new(2),
                vec![AnswerId::new(8), AnswerId::new(7)]
            )
        );
    }

    #[test]
    fn indices() {
        let question = multi();
        let mut capture = MultiSelectCapture::new(&question);

        capture.set_indices(&[0, 2]).unwrap();
        assert!(capture.is_selected(AnswerId::new(7)));
        assert!(capture.is_selected(AnswerId::new(9)));
        assert!(capture.set_indices(&[5]).is_err());
        assert_eq!(capture.selected().len(), 2);
    }

    #[test]
    fn choice() {
        let question = Question::button(0, "Go?", vec![Answer::new(1, "Yes").leads_to(2)]);
        let capture = ChoiceCapture::new(&question);

        assert_eq!(
            capture.select_index(0).unwrap(),
            Action::answer(QuestionId::new(0), AnswerId::new(1))
        );
        assert!(capture.select(AnswerId::new(3)).is_err());
        assert!(capture.select_index(4).is_err());
    }

    #[test]
    fn text_rules() {
        let question = Question::text(5, "Comments").terminal();
        let capture = TextCapture::new(
            &question,
            TextRules {
                allow_empty: false,
                max_len: 5,
            },
        );

        assert_eq!(capture.submit("   ").unwrap_err(), CaptureError::EmptyText);
        assert_eq!(
            capture.submit("far too long").unwrap_err(),
            CaptureError::TextTooLong { len: 12, max: 5 }
        );
        assert_eq!(
            capture.submit("  ok ").unwrap(),
            Action::answer(QuestionId::new(5), "ok")
        );
    }

    #[test]
    fn empty_text_when_allowed() {
        let rules = TextRules {
            allow_empty: true,
            ..TextRules::default()
        };
        assert_eq!(rules.check(" ").unwrap(), "");
    }
}
