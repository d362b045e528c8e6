//! The flow reducer: one pure step from a session state and an action to the
//! next state.

use tracing::{debug, info};

use crate::{
    Action, AnswerId, AnswerValue, Cursor, FlowError, Question, QuestionGraph, QuestionId,
    RenderFlags, SessionState, Submission,
};

/// What the view layer should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Switch to the widget for the question that is now current.
    Render {
        question: QuestionId,
        flags: RenderFlags,
    },

    /// The terminal question was answered; dispatch [`Action::Complete`].
    ReadyToComplete,

    /// Hand this payload to the submitter.
    Submit(Submission),
}

/// The result of a successful reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Effect,
}

/// Apply `action` to `state`.
///
/// `state` is left untouched; on success the returned transition carries the
/// replacement state.
pub fn reduce(
    graph: &QuestionGraph,
    state: &SessionState,
    action: Action,
) -> Result<Transition, FlowError> {
    match action {
        Action::AnswerQuestion { question, answer } => {
            answer_question(graph, state, question, answer)
        }
        Action::Complete => {
            let (state, submission) = complete(state)?;
            Ok(Transition {
                state,
                effect: Effect::Submit(submission),
            })
        }
    }
}

/// Record an answer for the current question and move to its successor.
pub fn answer_question(
    graph: &QuestionGraph,
    state: &SessionState,
    question_id: QuestionId,
    answer: AnswerValue,
) -> Result<Transition, FlowError> {
    if state.is_completed() {
        return Err(FlowError::AlreadyCompleted);
    }
    let current = state
        .current_question_id()
        .ok_or(FlowError::NoActiveQuestion)?;
    if current != question_id {
        return Err(FlowError::StaleAnswer {
            expected: current,
            got: question_id,
        });
    }
    let question = graph
        .question(current)
        .ok_or(FlowError::UnknownQuestion(current))?;

    check_answer(graph, question, &answer)?;

    let (cursor, effect) = match resolve_successor(question, &answer)? {
        None => (Cursor::Finished, Effect::ReadyToComplete),
        Some(target) => {
            let next = graph.question(target).ok_or(FlowError::IncompleteGraph {
                question: current,
                target,
            })?;
            (
                Cursor::At(target),
                Effect::Render {
                    question: target,
                    flags: RenderFlags::for_kind(next.kind()),
                },
            )
        }
    };

    debug!(question = %current, ?answer, ?cursor, "answer recorded");

    let answers = state.answers().clone().with(current, answer);
    Ok(Transition {
        state: state.advanced(answers, cursor),
        effect,
    })
}

/// Mark a finished session completed and build its submission.
pub fn complete(state: &SessionState) -> Result<(SessionState, Submission), FlowError> {
    if state.is_completed() {
        return Err(FlowError::AlreadyCompleted);
    }
    if let Cursor::At(current) = state.cursor() {
        return Err(FlowError::NotFinished(current));
    }

    let submission = Submission::from_answers(state.quiz_id(), state.answers());
    info!(
        quiz = state.quiz_id(),
        answered = submission.len(),
        "quiz completed"
    );
    Ok((state.marked_completed(), submission))
}

fn check_answer(
    graph: &QuestionGraph,
    question: &Question,
    answer: &AnswerValue,
) -> Result<(), FlowError> {
    if answer.kind() != question.kind() {
        return Err(FlowError::AnswerKindMismatch {
            question: question.id(),
            expected: question.kind(),
            actual: answer.kind(),
        });
    }
    if let AnswerValue::Selection(ids) = answer
        && ids.is_empty()
    {
        return Err(FlowError::EmptySelection(question.id()));
    }

    // Answer ids are global; make sure each one belongs to this question.
    for &id in answer.answer_ids() {
        let owned = graph
            .answer(id)
            .is_some_and(|(owner, _)| owner.id() == question.id());
        if !owned {
            return Err(FlowError::UnknownAnswer {
                question: question.id(),
                answer: id,
            });
        }
    }
    Ok(())
}

/// `None` means the quiz ends after this question.
///
/// An explicit successor on the question always wins. Otherwise the chosen
/// answer decides; for multi-select every selected answer has to agree.
fn resolve_successor(
    question: &Question,
    answer: &AnswerValue,
) -> Result<Option<QuestionId>, FlowError> {
    if question.is_terminal() {
        return Ok(None);
    }
    if let Some(next) = question.next_question_id() {
        return Ok(Some(next));
    }

    let via = |id: AnswerId| {
        question
            .answer(id)
            .and_then(|a| a.next_question_id)
            .ok_or(FlowError::NoSuccessor {
                question: question.id(),
                answer: Some(id),
            })
    };

    match answer {
        AnswerValue::Choice(id) => via(*id).map(Some),
        AnswerValue::Selection(ids) => {
            let mut targets = Vec::new();
            for &id in ids {
                let target = via(id)?;
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            match targets.as_slice() {
                [single] => Ok(Some(*single)),
                _ => Err(FlowError::AmbiguousSuccessor {
                    question: question.id(),
                    targets,
                }),
            }
        }
        AnswerValue::Text(_) => Err(FlowError::NoSuccessor {
            question: question.id(),
            answer: None,
        }),
    }
}
