//! Dialoguer implementation of the quiz-flow `Frontend` trait.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{FuzzySelect, Input, MultiSelect, Select};
use quiz_flow::{
    Action, CaptureError, ChoiceCapture, Frontend, MultiSelectCapture, Question, QuestionGraph,
    QuestionId, QuestionKind, RenderFlags, Submission, TextCapture, TextRules,
};
use thiserror::Error;
use tracing::debug;

/// Error type for the Dialoguer frontend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the quiz (e.g., pressed Ctrl+C or Escape).
    #[error("Quiz cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Question {0} has no answers to choose from")]
    NoOptions(QuestionId),
}

/// Button questions with more answers than this get a type-to-filter list.
const FUZZY_AFTER: usize = 8;

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Terminal frontend: a select list for buttons, a checkbox list for
/// multi-selects and a line prompt for text.
///
/// Invalid input (nothing ticked, empty or overlong text) is reported right
/// under the prompt and the question is asked again.
#[derive(Debug, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
    text_rules: TextRules,
}

impl Default for DialoguerFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerFrontend {
    /// Create a new Dialoguer frontend with default (colorful) theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            text_rules: TextRules::default(),
        }
    }

    /// Create a frontend with plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            ..Self::new()
        }
    }

    pub fn with_text_rules(mut self, rules: TextRules) -> Self {
        self.text_rules = rules;
        self
    }

    pub fn is_colorful(&self) -> bool {
        self.colorful
    }

    pub fn text_rules(&self) -> &TextRules {
        &self.text_rules
    }

    fn with_theme<R>(&self, prompt: impl FnOnce(&dyn Theme) -> R) -> R {
        if self.colorful {
            prompt(&ColorfulTheme::default())
        } else {
            prompt(&SimpleTheme)
        }
    }

    fn labels(question: &Question) -> Result<Vec<&str>, DialoguerError> {
        if question.answers().is_empty() {
            return Err(DialoguerError::NoOptions(question.id()));
        }
        Ok(question.answers().iter().map(|a| a.text.as_str()).collect())
    }

    fn report(&self, err: &CaptureError) {
        println!("Error: {err}");
    }

    fn ask_button(&self, question: &Question) -> Result<Action, DialoguerError> {
        let items = Self::labels(question)?;
        let capture = ChoiceCapture::new(question);
        loop {
            let index = self
                .with_theme(|theme| {
                    if items.len() > FUZZY_AFTER {
                        FuzzySelect::with_theme(theme)
                            .with_prompt(question.title())
                            .items(&items)
                            .default(0)
                            .interact()
                    } else {
                        Select::with_theme(theme)
                            .with_prompt(question.title())
                            .items(&items)
                            .default(0)
                            .interact()
                    }
                })
                .map_err(prompt_error)?;

            match capture.select_index(index) {
                Ok(action) => return Ok(action),
                Err(err) => self.report(&err),
            }
        }
    }

    fn ask_multi_select(&self, question: &Question) -> Result<Action, DialoguerError> {
        let items = Self::labels(question)?;
        let mut capture = MultiSelectCapture::new(question);
        loop {
            let ticked: Vec<bool> = question
                .answers()
                .iter()
                .map(|answer| capture.is_selected(answer.id))
                .collect();
            let indices = self
                .with_theme(|theme| {
                    MultiSelect::with_theme(theme)
                        .with_prompt(question.title())
                        .items(&items)
                        .defaults(&ticked)
                        .interact()
                })
                .map_err(prompt_error)?;

            let result = capture
                .set_indices(&indices)
                .and_then(|()| capture.submit());
            match result {
                Ok(action) => return Ok(action),
                Err(err) => self.report(&err),
            }
        }
    }

    fn ask_text(&self, question: &Question) -> Result<Action, DialoguerError> {
        let capture = TextCapture::new(question, self.text_rules.clone());
        loop {
            let input = self
                .with_theme(|theme| {
                    Input::<String>::with_theme(theme)
                        .with_prompt(question.title())
                        .allow_empty(true)
                        .interact_text()
                })
                .map_err(prompt_error)?;

            match capture.submit(&input) {
                Ok(action) => return Ok(action),
                Err(err) => self.report(&err),
            }
        }
    }
}

impl Frontend for DialoguerFrontend {
    type Error = DialoguerError;

    fn begin(&self, graph: &QuestionGraph) -> Result<(), Self::Error> {
        if let Some(title) = graph.title() {
            println!("{title}");
            println!();
        }
        Ok(())
    }

    fn ask(&self, question: &Question, flags: RenderFlags) -> Result<Action, Self::Error> {
        debug!(question = %question.id(), ?flags, "prompting");
        match flags.active() {
            QuestionKind::Button => self.ask_button(question),
            QuestionKind::MultiSelect => self.ask_multi_select(question),
            QuestionKind::Text => self.ask_text(question),
        }
    }

    fn alert(&self, _question: &Question, message: &str) -> Result<(), Self::Error> {
        println!("Error: {message}");
        Ok(())
    }

    fn finish(&self, submission: &Submission) -> Result<(), Self::Error> {
        println!();
        println!(
            "Thanks! {} answers submitted.",
            submission.question_answers.len()
        );
        Ok(())
    }

    fn is_cancelled(error: &Self::Error) -> bool {
        matches!(error, DialoguerError::Cancelled)
    }
}
