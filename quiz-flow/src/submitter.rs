use std::cell::{Cell, RefCell};

use crate::Submission;

/// The collaborator that stores a finished quiz.
///
/// Implementations decide where the payload goes (an HTTP endpoint, a
/// directory, memory). Failures are returned, never dropped: the session
/// surfaces them as [`QuizError::Submission`](crate::QuizError::Submission).
pub trait Submitter {
    /// The error type for this submitter.
    type Error: Into<anyhow::Error>;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error>;
}

impl<S: Submitter + ?Sized> Submitter for &S {
    type Error = S::Error;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error> {
        (**self).submit(submission)
    }
}

/// Error type for [`RecordingSubmitter`].
#[derive(Debug, thiserror::Error)]
#[error("Submission rejected ({remaining} more rejections queued)")]
pub struct Rejected {
    pub remaining: u32,
}

/// A submitter that keeps every payload in memory.
///
/// Useful in tests, and as a sink when no endpoint is configured. It can be
/// told to reject the first few submissions to exercise failure handling.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    submissions: RefCell<Vec<Submission>>,
    rejections: Cell<u32>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next `times` submissions.
    pub fn rejecting(times: u32) -> Self {
        Self {
            submissions: RefCell::new(Vec::new()),
            rejections: Cell::new(times),
        }
    }

    /// All accepted submissions, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }

    pub fn last(&self) -> Option<Submission> {
        self.submissions.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.submissions.borrow().len()
    }
}

impl Submitter for RecordingSubmitter {
    type Error = Rejected;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error> {
        let rejections = self.rejections.get();
        if rejections > 0 {
            self.rejections.set(rejections - 1);
            return Err(Rejected {
                remaining: rejections - 1,
            });
        }
        self.submissions.borrow_mut().push(submission.clone());
        Ok(())
    }
}
