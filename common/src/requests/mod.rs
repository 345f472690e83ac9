//! Typed request payloads, one per endpoint.
//!
//! Form and query payloads arrive URL-encoded, so every value is text there;
//! JSON clients may send `topic_index` either as a number or as a numeric
//! string. `topic_index` fields accept both.

use crate::model::exercise::CorrectOption;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// `POST /register_now` form.
///
/// Fields default to empty so that a missing field reaches the handler and is
/// reported with the same message as a blank one.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub role: String,
}

/// `POST /login_now` form. Students submit no password.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// `topic_index` carried in a form body (`POST /delete_all`).
#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(deserialize_with = "topic_index")]
    pub topic_index: i64,
}

/// `topic_index` carried in a query string (the listing endpoints).
#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    #[serde(deserialize_with = "topic_index")]
    pub topic_index: i64,
}

/// `POST /delete` body.
#[derive(Debug, Deserialize)]
pub struct DeleteVideoRequest {
    pub url: String,
}

/// `POST /save_exercise` body.
#[derive(Debug, Deserialize)]
pub struct SaveExerciseRequest {
    #[serde(deserialize_with = "topic_index")]
    pub topic_index: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: CorrectOption,
    /// Optional `data:<mime>;base64,<payload>` image.
    #[serde(default)]
    pub question_image: Option<String>,
}

/// `POST /delete_exercise` body.
#[derive(Debug, Deserialize)]
pub struct DeleteExerciseRequest {
    pub exercise_id: i64,
}

/// Deserializes a topic index from either an integer or a numeric string.
pub fn topic_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct TopicIndexVisitor;

    impl Visitor<'_> for TopicIndexVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer topic index")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::custom("topic index out of range"))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid topic index '{}'", value)))
        }
    }

    deserializer.deserialize_any(TopicIndexVisitor)
}
