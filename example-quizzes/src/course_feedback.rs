use quiz_flow::{Answer, Question, QuizDefinition};

/// End-of-course feedback. Happy students are asked what helped, unhappy
/// ones what got in the way; both end on a free-text question.
pub fn course_feedback() -> QuizDefinition {
    QuizDefinition::new(
        "1",
        vec![
            Question::button(
                0,
                "How did you find the course?",
                vec![
                    Answer::new(0, "Loved it").leads_to(1),
                    Answer::new(1, "It was fine").leads_to(1),
                    Answer::new(5, "Not for me").leads_to(2),
                ],
            ),
            Question::multi_select(
                1,
                "Which parts helped you most?",
                vec![
                    Answer::new(2, "Videos"),
                    Answer::new(3, "Exercises"),
                    Answer::new(4, "Live sessions"),
                ],
            )
            .then(3),
            Question::multi_select(
                2,
                "What got in the way?",
                vec![
                    Answer::new(6, "Pace"),
                    Answer::new(7, "Difficulty"),
                    Answer::new(8, "Scheduling"),
                ],
            )
            .then(3),
            Question::text(3, "Anything else you would like to tell us?").terminal(),
        ],
    )
    .with_title("Course feedback")
}
