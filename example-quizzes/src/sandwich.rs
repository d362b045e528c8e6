use quiz_flow::{Answer, Question, QuizDefinition};

/// Sandwich order. Wraps skip the toasting question and get their own
/// fillings; every wrap filling leads on to the sauces.
pub fn sandwich() -> QuizDefinition {
    QuizDefinition::new(
        "sandwich",
        vec![
            Question::button(
                0,
                "Pick your bread",
                vec![
                    Answer::new(0, "Italian").leads_to(1),
                    Answer::new(1, "Wheat").leads_to(1),
                    Answer::new(2, "Wrap").leads_to(2),
                ],
            ),
            Question::button(
                1,
                "Toasted?",
                vec![
                    Answer::new(3, "Yes please").leads_to(3),
                    Answer::new(4, "No thanks").leads_to(3),
                ],
            ),
            Question::multi_select(
                2,
                "Wrap fillings",
                vec![
                    Answer::new(5, "Chicken").leads_to(3),
                    Answer::new(6, "Falafel").leads_to(3),
                    Answer::new(7, "Halloumi").leads_to(3),
                ],
            ),
            Question::multi_select(
                3,
                "Sauces",
                vec![
                    Answer::new(8, "Mayo"),
                    Answer::new(9, "Chipotle"),
                    Answer::new(10, "Garlic"),
                ],
            )
            .then(4),
            Question::text(4, "Name for the order").terminal(),
        ],
    )
    .with_title("Sandwich order")
}
