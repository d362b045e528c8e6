use tracing::{debug, info, warn};

use crate::reducer::{self, Effect};
use crate::{
    Action, Cursor, FlowError, Frontend, Question, QuestionGraph, QuizError, RenderFlags,
    SessionState, Submission, Submitter,
};

/// One run through a quiz.
///
/// Holds the graph and the current [`SessionState`], and replaces the state
/// wholesale with whatever the reducer returns.
#[derive(Debug, Clone)]
pub struct Session<'g> {
    graph: &'g QuestionGraph,
    state: SessionState,
}

impl<'g> Session<'g> {
    /// Start a session at the graph's root question.
    pub fn start(graph: &'g QuestionGraph) -> Self {
        let state = SessionState::new(graph);
        info!(
            quiz = graph.quiz_id(),
            root = %graph.root(),
            questions = graph.len(),
            "quiz session started"
        );
        Self { graph, state }
    }

    pub fn graph(&self) -> &'g QuestionGraph {
        self.graph
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Option<&'g Question> {
        self.state
            .current_question_id()
            .and_then(|id| self.graph.question(id))
    }

    /// Widget flags for the current question.
    pub fn render_flags(&self) -> Option<RenderFlags> {
        self.current_question()
            .map(|question| RenderFlags::for_kind(question.kind()))
    }

    /// Feed one action through the reducer.
    ///
    /// On error the session keeps its previous state.
    pub fn dispatch(&mut self, action: Action) -> Result<Effect, FlowError> {
        let transition = reducer::reduce(self.graph, &self.state, action)?;
        self.state = transition.state;
        Ok(transition.effect)
    }

    /// Complete a finished session and return the payload to submit.
    pub fn complete(&mut self) -> Result<Submission, FlowError> {
        let (state, submission) = reducer::complete(&self.state)?;
        self.state = state;
        Ok(submission)
    }

    /// Ask every question on the path through the graph, then submit.
    ///
    /// Answers the reducer rejects as bad input are reported to the frontend
    /// and the same question is asked again. A broken graph ends the run.
    /// Once the submitter accepted the answers the run succeeds, even if the
    /// frontend fails to show its completion screen.
    pub fn run<F, S>(mut self, frontend: F, submitter: S) -> Result<Submission, QuizError>
    where
        F: Frontend,
        S: Submitter,
    {
        let graph = self.graph;
        let frontend_error = |err: F::Error| {
            if F::is_cancelled(&err) {
                info!(quiz = graph.quiz_id(), "quiz cancelled");
                QuizError::Cancelled
            } else {
                QuizError::frontend(err)
            }
        };

        frontend.begin(graph).map_err(frontend_error)?;

        while let Cursor::At(id) = self.state.cursor() {
            let question = graph
                .question(id)
                .ok_or(FlowError::UnknownQuestion(id))?;
            let flags = RenderFlags::for_kind(question.kind());

            let action = frontend.ask(question, flags).map_err(frontend_error)?;
            match self.dispatch(action) {
                Ok(effect) => debug!(?effect, "transition"),
                Err(err) if err.is_recoverable() => {
                    warn!(question = %id, %err, "answer rejected");
                    frontend
                        .alert(question, &err.to_string())
                        .map_err(frontend_error)?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        let submission = self.complete()?;
        if let Err(err) = submitter.submit(&submission) {
            let source: anyhow::Error = err.into();
            warn!(quiz = %submission.quiz_id, error = %source, "submission failed");
            return Err(QuizError::Submission {
                submission: Box::new(submission),
                source,
            });
        }
        info!(quiz = %submission.quiz_id, "answers submitted");

        if let Err(err) = frontend.finish(&submission) {
            let err: anyhow::Error = err.into();
            warn!(quiz = %submission.quiz_id, error = %err, "could not show completion");
        }
        Ok(submission)
    }
}
