use serde::{Deserialize, Serialize};

use super::{ExamId, QuestionId};

/// Exam content for one attempt: fetched fresh, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExamId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: QuestionId,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Entry of the assigned-exam list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExamId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Exam {
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}
