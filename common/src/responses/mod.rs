//! JSON bodies returned by the API.

use crate::model::exercise::{Exercise, TopicExercise};
use crate::model::video::TopicVideo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Stored paths of a teacher's videos (`/upload`, `/get_uploaded_videos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUrlsResponse {
    pub file_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicVideosResponse {
    pub videos: Vec<TopicVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveExerciseResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisesResponse {
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicExercisesResponse {
    pub exercises: Vec<TopicExercise>,
}
