use serde::{Deserialize, Serialize};

/// One answered (or skipped) question in the replayed history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    /// Absent means the user picked "don't know".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    pub fn answered(name: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answer: Some(answer.into()),
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuessRequest {
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuessResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub guess: Option<String>,
}

/// Which of the three response shapes the backend produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    NextQuestion { name: String, values: Vec<String> },
    Guess(String),
    Empty,
}

impl GuessResponse {
    /// A populated `guess` wins over a `question` carried in the same payload.
    pub fn outcome(&self) -> GuessOutcome {
        if let Some(guess) = self.guess.as_ref().filter(|g| !g.is_empty()) {
            return GuessOutcome::Guess(guess.clone());
        }
        match self.question.as_ref().filter(|q| !q.is_empty()) {
            Some(name) => GuessOutcome::NextQuestion {
                name: name.clone(),
                values: self.values.clone().unwrap_or_default(),
            },
            None => GuessOutcome::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMetadata {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionMetadataResponse {
    #[serde(default)]
    pub metadata: Option<Vec<QuestionMetadata>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    #[serde(rename = "thumbnailLink")]
    pub thumbnail_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaResponse {
    #[serde(default)]
    pub files: Option<Vec<MediaFile>>,
}

impl MediaResponse {
    pub fn first_thumbnail(&self) -> Option<&str> {
        self.files
            .as_deref()
            .and_then(|files| files.first())
            .map(|file| file.thumbnail_link.as_str())
    }
}
