pub mod course_feedback;
pub mod sandwich;
pub mod spooky_forest;

pub use course_feedback::course_feedback;
pub use sandwich::sandwich;
pub use spooky_forest::spooky_forest;

use quiz_flow::{GraphError, QuizDefinition};

const COFFEE_JSON: &str = include_str!("../quizzes/coffee.json");

/// A quiz authored as JSON, parsed on demand.
pub fn coffee() -> Result<QuizDefinition, GraphError> {
    QuizDefinition::from_json_str(COFFEE_JSON)
}

/// Names accepted by [`builtin`].
pub const NAMES: [&str; 4] = ["course-feedback", "sandwich", "spooky-forest", "coffee"];

/// Look up a built-in quiz by name.
pub fn builtin(name: &str) -> Option<Result<QuizDefinition, GraphError>> {
    match name {
        "course-feedback" => Some(Ok(course_feedback())),
        "sandwich" => Some(Ok(sandwich())),
        "spooky-forest" => Some(Ok(spooky_forest())),
        "coffee" => Some(coffee()),
        _ => None,
    }
}

/// Every built-in quiz with its name.
pub fn all() -> Result<Vec<(&'static str, QuizDefinition)>, GraphError> {
    NAMES
        .iter()
        .filter_map(|&name| builtin(name).map(|quiz| quiz.map(|quiz| (name, quiz))))
        .collect()
}
