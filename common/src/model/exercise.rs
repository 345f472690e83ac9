use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of answer options every exercise carries.
pub const OPTION_COUNT: usize = 4;

/// Identifies the right answer of an exercise.
///
/// Clients send either the 0-based position of the option or the option text
/// itself. Both are persisted in the same text column; a stored value that
/// parses as an integer is read back as an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectOption {
    Index(i64),
    Text(String),
}

impl CorrectOption {
    /// Rebuilds the value from its stored column representation.
    pub fn from_stored(value: String) -> Self {
        match value.trim().parse::<i64>() {
            Ok(index) => CorrectOption::Index(index),
            Err(_) => CorrectOption::Text(value),
        }
    }
}

impl fmt::Display for CorrectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectOption::Index(index) => write!(f, "{}", index),
            CorrectOption::Text(text) => f.write_str(text),
        }
    }
}

/// An exercise as returned to its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub exercise_id: i64,
    pub question: String,
    /// Path of the stored question image, empty when the exercise has none.
    pub question_image: String,
    pub options: Vec<String>,
    pub correct_option: CorrectOption,
}

/// An exercise as published to students, with the authoring teacher's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicExercise {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub teacher_name: String,
}
