use crate::{AnswerId, AnswerValue, QuestionId};

/// Error type for typed answer access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("No answer recorded for question {0}")]
    Missing(QuestionId),

    #[error("Answer to question {question} is a {actual} answer, expected {expected}")]
    KindMismatch {
        question: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected during one quiz session.
///
/// Entries keep the order in which questions were first answered. Keys are
/// never removed; answering a question again (a revisit through a cycle in the
/// graph) replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    entries: Vec<(QuestionId, AnswerValue)>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record the answer for a question visit.
    pub fn record(&mut self, question: QuestionId, value: impl Into<AnswerValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(id, _)| *id == question) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((question, value)),
        }
    }

    /// Like [`record`](Self::record), but consumes and returns the store.
    pub fn with(mut self, question: QuestionId, value: impl Into<AnswerValue>) -> Self {
        self.record(question, value);
        self
    }

    pub fn get(&self, question: QuestionId) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|(id, _)| *id == question)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, question: QuestionId) -> bool {
        self.get(question).is_some()
    }

    /// Iterate over `(question, answer)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &AnswerValue)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // === Typed accessors ===

    pub fn get_choice(&self, question: QuestionId) -> Result<AnswerId, AnswerError> {
        match self.get(question) {
            Some(AnswerValue::Choice(id)) => Ok(*id),
            Some(other) => Err(mismatch(question, "button", other)),
            None => Err(AnswerError::Missing(question)),
        }
    }

    pub fn get_selection(&self, question: QuestionId) -> Result<&[AnswerId], AnswerError> {
        match self.get(question) {
            Some(AnswerValue::Selection(ids)) => Ok(ids),
            Some(other) => Err(mismatch(question, "multiSelect", other)),
            None => Err(AnswerError::Missing(question)),
        }
    }

    pub fn get_text(&self, question: QuestionId) -> Result<&str, AnswerError> {
        match self.get(question) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(mismatch(question, "text", other)),
            None => Err(AnswerError::Missing(question)),
        }
    }
}

fn mismatch(question: QuestionId, expected: &'static str, actual: &AnswerValue) -> AnswerError {
    AnswerError::KindMismatch {
        question,
        expected,
        actual: actual.kind().tag(),
    }
}

impl<'a> IntoIterator for &'a AnswerStore {
    type Item = (QuestionId, &'a AnswerValue);
    type IntoIter = Box<dyn Iterator<Item = (QuestionId, &'a AnswerValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: u32) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn record_and_get() {
        let mut store = AnswerStore::new();
        store.record(q(0), AnswerId::new(1));
        store.record(q(2), vec![AnswerId::new(7), AnswerId::new(8)]);
        store.record(q(5), "free text");

        assert_eq!(store.get_choice(q(0)).unwrap(), AnswerId::new(1));
        assert_eq!(
            store.get_selection(q(2)).unwrap(),
            &[AnswerId::new(7), AnswerId::new(8)]
        );
        assert_eq!(store.get_text(q(5)).unwrap(), "free text");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn keeps_first_answer_order() {
        let store = AnswerStore::new()
            .with(q(4), "a")
            .with(q(1), "b")
            .with(q(4), "c");

        assert_eq!(store.question_ids().collect::<Vec<_>>(), vec![q(4), q(1)]);
        assert_eq!(store.get_text(q(4)).unwrap(), "c");
    }

    #[test]
    fn kind_mismatch_error() {
        let store = AnswerStore::new().with(q(0), AnswerId::new(1));
        assert!(matches!(
            store.get_text(q(0)),
            Err(AnswerError::KindMismatch { expected: "text", actual: "button", .. })
        ));
        assert!(matches!(store.get_choice(q(9)), Err(AnswerError::Missing(_))));
    }
}
