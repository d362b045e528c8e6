use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Answer, AnswerId, GraphError, Question, QuestionId};

/// A quiz as it is authored: an id, a root and a flat list of questions.
///
/// This is the serialized form. Build a [`QuestionGraph`] from it before
/// running a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDefinition {
    /// Quiz identifier, sent along with every submission.
    pub id: String,

    /// Optional heading shown before the first question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The question shown first.
    #[serde(default = "root_default")]
    pub root: QuestionId,

    pub questions: Vec<Question>,
}

fn root_default() -> QuestionId {
    QuestionId::ROOT
}

impl QuizDefinition {
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: None,
            root: QuestionId::ROOT,
            questions,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<QuestionId>) -> Self {
        self.root = root.into();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(GraphError::parse)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, GraphError> {
        toml::from_str(toml).map_err(GraphError::parse)
    }

    /// Load a definition from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(GraphError::parse)
    }
}

/// The question graph of one quiz, indexed for traversal.
///
/// Construction only checks what lookups depend on (unique ids, an existing
/// root). Successor links are checked by [`validate`](Self::validate) and, at
/// run time, by the flow reducer.
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    quiz_id: String,
    title: Option<String>,
    root: QuestionId,
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
    answer_owner: HashMap<AnswerId, QuestionId>,
}

impl QuestionGraph {
    pub fn new(definition: QuizDefinition) -> Result<Self, GraphError> {
        let QuizDefinition {
            id,
            title,
            root,
            questions,
        } = definition;

        let mut by_id = HashMap::with_capacity(questions.len());
        let mut answer_owner = HashMap::new();

        for (index, question) in questions.iter().enumerate() {
            if by_id.insert(question.id(), index).is_some() {
                return Err(GraphError::DuplicateQuestion(question.id()));
            }
            for answer in question.answers() {
                if answer_owner.insert(answer.id, question.id()).is_some() {
                    return Err(GraphError::DuplicateAnswer(answer.id));
                }
            }
        }

        if !by_id.contains_key(&root) {
            return Err(GraphError::MissingRoot(root));
        }

        Ok(Self {
            quiz_id: id,
            title,
            root,
            questions,
            by_id,
            answer_owner,
        })
    }

    /// Build and validate in one go, failing on the first problem found.
    pub fn checked(definition: QuizDefinition) -> Result<Self, GraphError> {
        let graph = Self::new(definition)?;
        match graph.validate().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(graph),
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn root(&self) -> QuestionId {
        self.root
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.by_id.get(&id).map(|&index| &self.questions[index])
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Look up an answer anywhere in the graph, together with its question.
    pub fn answer(&self, id: AnswerId) -> Option<(&Question, &Answer)> {
        let question = self.question(*self.answer_owner.get(&id)?)?;
        question.answer(id).map(|answer| (question, answer))
    }

    /// Questions in definition order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Report every structural problem that would stop traversal.
    pub fn validate(&self) -> Vec<GraphError> {
        let mut problems = Vec::new();

        for question in &self.questions {
            let id = question.id();

            if question.kind().has_answers() && question.answers().is_empty() {
                problems.push(GraphError::NoAnswers(id, question.kind()));
            }

            if let Some(target) = question.next_question_id()
                && !self.contains(target)
            {
                problems.push(GraphError::DanglingSuccessor {
                    question: id,
                    answer: None,
                    target,
                });
            }

            for answer in question.answers() {
                if let Some(target) = answer.next_question_id
                    && !self.contains(target)
                {
                    problems.push(GraphError::DanglingSuccessor {
                        question: id,
                        answer: Some(answer.id),
                        target,
                    });
                }
            }

            if question.is_terminal() || question.next_question_id().is_some() {
                continue;
            }

            if !question.kind().has_answers() {
                problems.push(GraphError::MissingSuccessor {
                    question: id,
                    answer: None,
                });
                continue;
            }

            for answer in question.answers() {
                if answer.next_question_id.is_none() {
                    problems.push(GraphError::MissingSuccessor {
                        question: id,
                        answer: Some(answer.id),
                    });
                }
            }

            if question.kind() == crate::QuestionKind::MultiSelect {
                let targets: HashSet<_> = question
                    .answers()
                    .iter()
                    .filter_map(|answer| answer.next_question_id)
                    .collect();
                if targets.len() > 1 {
                    problems.push(GraphError::DivergentMultiSelect(id));
                }
            }
        }

        problems
    }

    /// Every question a successor link can lead to from `id`.
    pub fn successors(&self, id: QuestionId) -> Vec<QuestionId> {
        let Some(question) = self.question(id) else {
            return Vec::new();
        };
        if question.is_terminal() {
            return Vec::new();
        }
        if let Some(next) = question.next_question_id() {
            return vec![next];
        }

        let mut next: Vec<_> = question
            .answers()
            .iter()
            .filter_map(|answer| answer.next_question_id)
            .collect();
        next.dedup();
        next
    }

    /// Questions that no path from the root reaches, in definition order.
    pub fn unreachable(&self) -> Vec<QuestionId> {
        let mut seen = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);

        while let Some(id) = queue.pop_front() {
            for next in self.successors(id) {
                if self.contains(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        self.questions
            .iter()
            .map(Question::id)
            .filter(|id| !seen.contains(id))
            .collect()
    }
}

impl TryFrom<QuizDefinition> for QuestionGraph {
    type Error = GraphError;

    fn try_from(definition: QuizDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionKind;

    fn sample() -> QuizDefinition {
        QuizDefinition::new(
            "sample",
            vec![
                Question::button(
                    0,
                    "Start",
                    vec![Answer::new(1, "Left").leads_to(2), Answer::new(3, "Right").leads_to(4)],
                ),
                Question::multi_select(2, "Pick", vec![Answer::new(7, "A"), Answer::new(8, "B")])
                    .then(5),
                Question::text(4, "Why?").then(5),
                Question::text(5, "Anything else?").terminal(),
            ],
        )
    }

    #[test]
    fn lookups() {
        let graph = QuestionGraph::new(sample()).unwrap();
        assert_eq!(graph.quiz_id(), "sample");
        assert_eq!(graph.root(), QuestionId::ROOT);
        assert_eq!(graph.len(), 4);
        assert_eq!(
            graph.question(QuestionId::new(2)).unwrap().kind(),
            QuestionKind::MultiSelect
        );

        let (owner, answer) = graph.answer(AnswerId::new(8)).unwrap();
        assert_eq!(owner.id(), QuestionId::new(2));
        assert_eq!(answer.text, "B");
        assert!(graph.answer(AnswerId::new(99)).is_none());
    }

    #[test]
    fn valid_graph_has_no_problems() {
        let graph = QuestionGraph::new(sample()).unwrap();
        assert!(graph.validate().is_empty());
        assert!(graph.unreachable().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut definition = sample();
        definition.questions.push(Question::text(5, "Again").terminal());
        assert!(matches!(
            QuestionGraph::new(definition),
            Err(GraphError::DuplicateQuestion(id)) if id == QuestionId::new(5)
        ));

        let mut definition = sample();
        definition
            .questions
            .push(Question::button(9, "Dup", vec![Answer::new(7, "Again")]).terminal());
        assert!(matches!(
            QuestionGraph::new(definition),
            Err(GraphError::DuplicateAnswer(id)) if id == AnswerId::new(7)
        ));
    }

    #[test]
    fn missing_root() {
        let definition = sample().with_root(42);
        assert!(matches!(
            QuestionGraph::new(definition),
            Err(GraphError::MissingRoot(_))
        ));
    }

    #[test]
    fn validate_reports_broken_links() {
        let definition = QuizDefinition::new(
            "broken",
            vec![
                Question::button(0, "Start", vec![Answer::new(1, "Go").leads_to(6), Answer::new(2, "Stay")]),
                Question::multi_select(
                    3,
                    "Pick",
                    vec![Answer::new(4, "A").leads_to(0), Answer::new(5, "B").leads_to(3)],
                ),
                Question::text(7, "Dead end"),
                Question::button(8, "Empty", vec![]).terminal(),
            ],
        );
        let graph = QuestionGraph::new(definition).unwrap();
        let problems = graph.validate();

        assert!(problems.iter().any(|p| matches!(
            p,
            GraphError::DanglingSuccessor { target, .. } if *target == QuestionId::new(6)
        )));
        assert!(problems.iter().any(|p| matches!(
            p,
            GraphError::MissingSuccessor { answer: Some(a), .. } if *a == AnswerId::new(2)
        )));
        assert!(problems.iter().any(|p| matches!(p, GraphError::DivergentMultiSelect(_))));
        assert!(problems.iter().any(|p| matches!(
            p,
            GraphError::MissingSuccessor { question, answer: None } if *question == QuestionId::new(7)
        )));
        assert!(problems.iter().any(|p| matches!(p, GraphError::NoAnswers(_, _))));
        assert!(QuestionGraph::checked(graph_definition_clone(&graph)).is_err());
    }

    fn graph_definition_clone(graph: &QuestionGraph) -> QuizDefinition {
        QuizDefinition::new(graph.quiz_id(), graph.questions().to_vec()).with_root(graph.root())
    }

    #[test]
    fn unreachable_questions() {
        let mut definition = sample();
        definition.questions.push(Question::text(10, "Orphan").terminal());
        let graph = QuestionGraph::new(definition).unwrap();
        assert_eq!(graph.unreachable(), vec![QuestionId::new(10)]);
    }

    #[test]
    fn json_definition() {
        let json = r#"{
            "id": "1",
            "questions": [
                { "id": 0, "title": "First", "type": "button",
                  "answers": [{ "id": 1, "text": "A", "nextQuestionId": 2 }] },
                { "id": 2, "title": "Last", "type": "text", "terminal": true }
            ]
        }"#;
        let definition = QuizDefinition::from_json_str(json).unwrap();
        assert_eq!(definition.root, QuestionId::ROOT);
        let graph = QuestionGraph::checked(definition).unwrap();
        assert!(graph.question(QuestionId::new(2)).unwrap().is_terminal());
    }

    #[test]
    fn toml_definition() {
        let toml = r#"
            id = "toml-quiz"
            title = "From TOML"

            [[questions]]
            id = 0
            title = "First"
            type = "multiSelect"
            nextQuestionId = 1

            [[questions.answers]]
            id = 10
            text = "A"

            [[questions]]
            id = 1
            title = "Done?"
            type = "text"
            terminal = true
        "#;
        let definition = QuizDefinition::from_toml_str(toml).unwrap();
        assert_eq!(definition.title.as_deref(), Some("From TOML"));
        assert!(QuestionGraph::checked(definition).is_ok());
    }

    #[test]
    fn unknown_type_fails_to_load() {
        let json = r#"{ "id": "1", "questions": [{ "id": 0, "title": "?", "type": "dropdown" }] }"#;
        let err = QuizDefinition::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("dropdown"));
    }
}
