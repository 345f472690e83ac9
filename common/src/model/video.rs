use serde::{Deserialize, Serialize};

/// A video published by a teacher for a topic, as shown to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicVideo {
    pub file_url: String,
    pub teacher_name: String,
}
