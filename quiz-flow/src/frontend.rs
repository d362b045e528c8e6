use crate::{Action, Question, QuestionGraph, RenderFlags, Submission};

/// Trait for view layers that show questions and capture answers.
///
/// A frontend is asked one question at a time, together with the flags that
/// say which widget to show. It returns the [`Action`] its widget produced.
/// Input validation (empty multi-select, text rules) happens inside the
/// frontend's own retry loop; `ask` only returns once there is something to
/// dispatch, or on error/cancellation.
pub trait Frontend {
    /// The error type for this frontend.
    type Error: Into<anyhow::Error>;

    /// Called once before the first question.
    fn begin(&self, _graph: &QuestionGraph) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Show `question` with the widget selected by `flags` and capture an answer.
    fn ask(&self, question: &Question, flags: RenderFlags) -> Result<Action, Self::Error>;

    /// Show a message about the last answer, which was not accepted.
    fn alert(&self, _question: &Question, _message: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after the answers were submitted.
    fn finish(&self, _submission: &Submission) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Whether `error` means the user abandoned the quiz.
    fn is_cancelled(_error: &Self::Error) -> bool {
        false
    }
}

impl<F: Frontend + ?Sized> Frontend for &F {
    type Error = F::Error;

    fn begin(&self, graph: &QuestionGraph) -> Result<(), Self::Error> {
        (**self).begin(graph)
    }

    fn ask(&self, question: &Question, flags: RenderFlags) -> Result<Action, Self::Error> {
        (**self).ask(question, flags)
    }

    fn alert(&self, question: &Question, message: &str) -> Result<(), Self::Error> {
        (**self).alert(question, message)
    }

    fn finish(&self, submission: &Submission) -> Result<(), Self::Error> {
        (**self).finish(submission)
    }

    fn is_cancelled(error: &Self::Error) -> bool {
        F::is_cancelled(error)
    }
}
