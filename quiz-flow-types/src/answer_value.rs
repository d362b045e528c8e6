use crate::{AnswerId, QuestionKind};

/// The answer given to one question.
///
/// This is the value stored in the `AnswerStore` for each answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// The answer picked on a button question.
    Choice(AnswerId),

    /// The answers ticked on a multi-select question, in the order they were picked.
    Selection(Vec<AnswerId>),

    /// Free text typed into a text question.
    Text(String),
}

impl AnswerValue {
    /// Build a selection, dropping repeated ids but keeping first-pick order.
    pub fn selection(ids: impl IntoIterator<Item = AnswerId>) -> Self {
        let mut picked = Vec::new();
        for id in ids {
            if !picked.contains(&id) {
                picked.push(id);
            }
        }
        Self::Selection(picked)
    }

    /// The question kind that produces this value.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Choice(_) => QuestionKind::Button,
            Self::Selection(_) => QuestionKind::MultiSelect,
            Self::Text(_) => QuestionKind::Text,
        }
    }

    /// Answer ids referenced by this value (empty for text).
    pub fn answer_ids(&self) -> &[AnswerId] {
        match self {
            Self::Choice(id) => std::slice::from_ref(id),
            Self::Selection(ids) => ids,
            Self::Text(_) => &[],
        }
    }

    pub fn as_choice(&self) -> Option<AnswerId> {
        match self {
            Self::Choice(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[AnswerId]> {
        match self {
            Self::Selection(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Flatten into the string list used by the submission payload.
    ///
    /// Single answers become a one-element list.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::Choice(id) => vec![id.to_string()],
            Self::Selection(ids) => ids.iter().map(ToString::to_string).collect(),
            Self::Text(s) => vec![s.clone()],
        }
    }
}

impl From<AnswerId> for AnswerValue {
    fn from(id: AnswerId) -> Self {
        Self::Choice(id)
    }
}

impl From<Vec<AnswerId>> for AnswerValue {
    fn from(ids: Vec<AnswerId>) -> Self {
        Self::selection(ids)
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
