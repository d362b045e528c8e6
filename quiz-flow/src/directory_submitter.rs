//! Submitter that stores answers as JSON files in a local directory.
//!
//! Raw responses land at `<root>/<quizId>/<month>-<year>/<uuid>.json`, and the
//! month's consolidated tallies at `<root>/<quizId>/<month>-<year>/<quizId>.json`.
//! The quiz id must be a single plain folder name.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::results::{self, QuizResults};
use crate::{SubmitError, Submission, Submitter};

#[derive(Debug, Clone)]
pub struct DirectorySubmitter {
    root: PathBuf,
}

impl DirectorySubmitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store a submission as of `date` under the raw response id `id`.
    ///
    /// Returns the raw response key. The month's results are read before
    /// anything is written, so a corrupt results file fails the call early.
    pub fn store(
        &self,
        submission: &Submission,
        date: NaiveDate,
        id: Uuid,
    ) -> Result<String, SubmitError> {
        let quiz_id = &submission.quiz_id;
        let results_path = self.root.join(results::results_key(folder_name(quiz_id)?, date));
        let mut results = read_results(&results_path)?
            .unwrap_or_else(|| QuizResults::new(quiz_id.clone()));

        let raw_key = results::raw_response_key(quiz_id, date, id);
        let raw_path = self.root.join(&raw_key);
        if let Some(parent) = raw_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(&submission.clone().into_quiz_data())?;
        fs::write(&raw_path, body)?;

        results.record(submission, &raw_key);
        fs::write(&results_path, serde_json::to_vec_pretty(&results)?)?;

        debug!(raw = %raw_path.display(), results = %results_path.display(), "submission stored");
        Ok(raw_key)
    }

    /// Read back the consolidated results for a quiz and month.
    pub fn results(&self, quiz_id: &str, date: NaiveDate) -> Result<Option<QuizResults>, SubmitError> {
        read_results(&self.root.join(results::results_key(folder_name(quiz_id)?, date)))
    }
}

/// Accept `quiz_id` only if it names exactly one folder below the root.
fn folder_name(quiz_id: &str) -> Result<&str, SubmitError> {
    let mut components = Path::new(quiz_id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !quiz_id.contains(['/', '\\']) => Ok(quiz_id),
        _ => Err(SubmitError::InvalidQuizId(quiz_id.to_owned())),
    }
}

fn read_results(path: &Path) -> Result<Option<QuizResults>, SubmitError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Submitter for DirectorySubmitter {
    type Error = SubmitError;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error> {
        self.store(submission, Local::now().date_naive(), Uuid::new_v4())
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QuizData, QuestionAnswers};

    fn submission(answer: &str) -> Submission {
        Submission {
            quiz_id: "1".into(),
            question_answers: vec![QuestionAnswers {
                id: "0".into(),
                answers: vec![answer.into()],
            }],
        }
    }

    #[test]
    fn stores_raw_response_and_results() {
        let dir = tempfile::tempdir().unwrap();
        let submitter = DirectorySubmitter::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();

        let first = submitter.store(&submission("0"), date, Uuid::new_v4()).unwrap();
        submitter.store(&submission("0"), date, Uuid::new_v4()).unwrap();
        submitter.store(&submission("3"), date, Uuid::new_v4()).unwrap();

        assert!(first.starts_with("1/6-2020/"));
        let raw: QuizData =
            serde_json::from_slice(&fs::read(dir.path().join(&first)).unwrap()).unwrap();
        assert_eq!(raw.quiz_data, submission("0"));

        let results = submitter.results("1", date).unwrap().unwrap();
        assert_eq!(results.count("0", "0"), 2);
        assert_eq!(results.count("0", "3"), 1);
        assert_eq!(
            results.question_data[0].results[0].raw_response_files[0],
            first
        );
    }

    #[test]
    fn no_results_yet() {
        let dir = tempfile::tempdir().unwrap();
        let submitter = DirectorySubmitter::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(submitter.results("1", date).unwrap().is_none());
    }

    #[test]
    fn quiz_ids_stay_below_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let submitter = DirectorySubmitter::new(dir.path().join("answers"));
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();

        for quiz_id in ["../escaped", "/tmp/escaped", "a/b", "a\\b", "..", ".", ""] {
            let mut outside = submission("0");
            outside.quiz_id = quiz_id.into();
            assert!(
                matches!(
                    submitter.store(&outside, date, Uuid::new_v4()),
                    Err(SubmitError::InvalidQuizId(ref id)) if id == quiz_id
                ),
                "{quiz_id:?} was accepted"
            );
            assert!(matches!(
                submitter.results(quiz_id, date),
                Err(SubmitError::InvalidQuizId(_))
            ));
        }

        assert!(!dir.path().join("escaped").exists());
        assert!(!dir.path().join("answers").exists());
    }

    #[test]
    fn corrupt_results_leave_no_raw_file() {
        let dir = tempfile::tempdir().unwrap();
        let submitter = DirectorySubmitter::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let results_path = dir.path().join(results::results_key("1", date));
        fs::create_dir_all(results_path.parent().unwrap()).unwrap();
        fs::write(&results_path, "not json").unwrap();

        assert!(matches!(
            submitter.store(&submission("0"), date, Uuid::new_v4()),
            Err(SubmitError::Json(_))
        ));

        let files: Vec<_> = fs::read_dir(results_path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files, vec![results_path]);
    }

    #[test]
    fn submit_uses_today() {
        let dir = tempfile::tempdir().unwrap();
        let submitter = DirectorySubmitter::new(dir.path());
        submitter.submit(&submission("0")).unwrap();

        let today = Local::now().date_naive();
        assert!(submitter.results("1", today).unwrap().is_some());
    }
}
