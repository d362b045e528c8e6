use example_quizzes::{builtin, course_feedback, sandwich, spooky_forest};
use quiz_flow::{
    AnswerId, Cursor, QuestionGraph, QuestionId, RecordingSubmitter, ScriptedFrontend, Session,
};

#[test]
fn every_builtin_is_a_valid_graph() -> anyhow::Result<()> {
    let quizzes = example_quizzes::all()?;
    assert_eq!(quizzes.len(), example_quizzes::NAMES.len());

    for (name, definition) in quizzes {
        let graph = QuestionGraph::checked(definition)?;
        assert!(graph.validate().is_empty(), "{name} has findings");
        assert!(graph.unreachable().is_empty(), "{name} has unreachable questions");
    }
    Ok(())
}

#[test]
fn unknown_name() {
    assert!(builtin("pizza").is_none());
}

#[test]
fn unhappy_feedback_path() -> anyhow::Result<()> {
    let graph = QuestionGraph::checked(course_feedback())?;
    let frontend = ScriptedFrontend::new()
        .with_choice(0, 5)
        .with_selection(2, &[6, 8])
        .with_text(3, "More evening slots");
    let submitter = RecordingSubmitter::new();

    let submission = Session::start(&graph).run(&frontend, &submitter)?;

    assert_eq!(submission.quiz_id, "1");
    let ids: Vec<_> = submission
        .question_answers
        .iter()
        .map(|qa| qa.id.as_str())
        .collect();
    assert_eq!(ids, vec!["0", "2", "3"]);
    assert_eq!(submission.question_answers[1].answers, vec!["6", "8"]);
    Ok(())
}

#[test]
fn wrap_fillings_share_a_successor() -> anyhow::Result<()> {
    let graph = QuestionGraph::checked(sandwich())?;
    let frontend = ScriptedFrontend::new()
        .with_choice(0, 2)
        .with_selection(2, &[5, 7])
        .with_selection(3, &[10])
        .with_text(4, "Sam");

    let submission = Session::start(&graph).run(&frontend, RecordingSubmitter::new())?;

    let shown: Vec<_> = frontend.rendered().into_iter().map(|(id, _)| id.get()).collect();
    assert_eq!(shown, vec![0, 2, 3, 4]);
    assert_eq!(submission.question_answers.len(), 4);
    Ok(())
}

#[test]
fn revisiting_the_fork_replaces_its_answer() -> anyhow::Result<()> {
    let graph = QuestionGraph::checked(spooky_forest())?;
    let mut session = Session::start(&graph);

    for (question, answer) in [(0, 0), (1, 2), (2, 4), (1, 3)] {
        session.dispatch(quiz_flow::Action::answer(
            QuestionId::new(question),
            AnswerId::new(answer),
        ))?;
    }

    assert_eq!(session.state().cursor(), Cursor::At(QuestionId::new(3)));
    let answers = session.state().answers();
    assert_eq!(answers.get_choice(QuestionId::new(1))?, AnswerId::new(3));
    let order: Vec<_> = answers.question_ids().map(QuestionId::get).collect();
    assert_eq!(order, vec![0, 1, 2]);
    Ok(())
}

#[test]
fn coffee_loads_from_json() -> anyhow::Result<()> {
    let graph = QuestionGraph::checked(example_quizzes::coffee()?)?;
    assert_eq!(graph.quiz_id(), "coffee");
    assert_eq!(graph.title(), Some("Coffee break"));

    let frontend = ScriptedFrontend::new().with_choice(0, 1).with_text(2, "Shortbread");
    let submission = Session::start(&graph).run(&frontend, RecordingSubmitter::new())?;
    assert_eq!(submission.question_answers.len(), 2);
    Ok(())
}
