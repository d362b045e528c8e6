use quiz_flow::{Answer, Question, QuizDefinition};

/// A short adventure with a loop: turning back at the whispering trees
/// returns to the fork, and the fork's answer is replaced on the second visit.
pub fn spooky_forest() -> QuizDefinition {
    QuizDefinition::new(
        "spooky-forest",
        vec![
            Question::button(
                0,
                "You stand at the edge of a dark forest.",
                vec![
                    Answer::new(0, "Enter").leads_to(1),
                    Answer::new(1, "Walk away").leads_to(4),
                ],
            ),
            Question::button(
                1,
                "The path forks.",
                vec![
                    Answer::new(2, "Go left").leads_to(2),
                    Answer::new(3, "Go right").leads_to(3),
                ],
            ),
            Question::button(
                2,
                "The trees are whispering. Turn back to the fork?",
                vec![
                    Answer::new(4, "Turn back").leads_to(1),
                    Answer::new(5, "Keep going").leads_to(3),
                ],
            ),
            Question::multi_select(
                3,
                "You find an old chest. What do you take?",
                vec![
                    Answer::new(6, "Lantern"),
                    Answer::new(7, "Map"),
                    Answer::new(8, "Rope"),
                ],
            )
            .then(4),
            Question::text(4, "Write a line in the traveller's log").terminal(),
        ],
    )
    .with_title("The spooky forest")
}
