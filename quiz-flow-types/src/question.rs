use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AnswerId, GraphError, QuestionId};

/// A single question in a quiz graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,

    /// The prompt shown above the widget.
    title: String,

    /// Which widget collects the answer.
    #[serde(rename = "type")]
    kind: QuestionKind,

    /// Explicit successor. Takes precedence over the answers' successors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_question_id: Option<QuestionId>,

    /// Offered answers, in display order (button and multi-select only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    answers: Vec<Answer>,

    /// Answering this question ends the quiz.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    terminal: bool,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            next_question_id: None,
            answers: Vec::new(),
            terminal: false,
        }
    }

    /// A single-choice question rendered as one button per answer.
    pub fn button(id: impl Into<QuestionId>, title: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self::new(id, title, QuestionKind::Button).with_answers(answers)
    }

    /// A question where any number of answers (but at least one) can be picked.
    pub fn multi_select(
        id: impl Into<QuestionId>,
        title: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Self {
        Self::new(id, title, QuestionKind::MultiSelect).with_answers(answers)
    }

    /// A free-text question.
    pub fn text(id: impl Into<QuestionId>, title: impl Into<String>) -> Self {
        Self::new(id, title, QuestionKind::Text)
    }

    pub fn with_answers(mut self, answers: Vec<Answer>) -> Self {
        self.answers = answers;
        self
    }

    /// Set the explicit successor.
    pub fn then(mut self, next: impl Into<QuestionId>) -> Self {
        self.next_question_id = Some(next.into());
        self
    }

    /// Mark this question as the last one of the quiz.
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn next_question_id(&self) -> Option<QuestionId> {
        self.next_question_id
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Find one of this question's answers by id.
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id == id)
    }

    pub fn offers(&self, id: AnswerId) -> bool {
        self.answer(id).is_some()
    }
}

/// The declared type of a question, i.e. which input widget it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuestionKind {
    /// Pick exactly one answer; submitted as soon as it is clicked.
    Button,

    /// Pick one or more answers, then continue.
    MultiSelect,

    /// Type a free-form answer.
    Text,
}

impl QuestionKind {
    /// The type tag used in quiz definitions.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::MultiSelect => "multiSelect",
            Self::Text => "text",
        }
    }

    /// Whether questions of this kind offer a list of answers.
    pub fn has_answers(self) -> bool {
        matches!(self, Self::Button | Self::MultiSelect)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for QuestionKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "button" => Ok(Self::Button),
            "multiSelect" => Ok(Self::MultiSelect),
            "text" => Ok(Self::Text),
            other => Err(GraphError::UnknownQuestionKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for QuestionKind {
    type Error = GraphError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        kind.tag().to_string()
    }
}

/// An answer offered by a button or multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,

    /// Label shown on the button or checkbox.
    pub text: String,

    /// Where to go when this answer is chosen and the question has no
    /// successor of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question_id: Option<QuestionId>,
}

impl Answer {
    pub fn new(id: impl Into<AnswerId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_question_id: None,
        }
    }

    /// Set the successor reached through this answer.
    pub fn leads_to(mut self, next: impl Into<QuestionId>) -> Self {
        self.next_question_id = Some(next.into());
        self
    }
}
