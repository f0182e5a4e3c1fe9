use serde::{Deserialize, Serialize};

use super::QuestionId;

/// One submitted answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub answer: String,
}

/// Selected option per question, keyed by question id.
///
/// Keys are unique and keep first-answered order; re-answering a question
/// overwrites its option in place. Unanswered questions are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(QuestionId, String)>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `question_id`. Last write wins.
    pub fn set(&mut self, question_id: QuestionId, option: impl Into<String>) {
        let option = option.into();
        match self.entries.iter_mut().find(|(id, _)| *id == question_id) {
            Some((_, existing)) => *existing = option,
            None => self.entries.push((question_id, option)),
        }
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, option)| option.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Submission payload: one entry per answered question.
    #[must_use]
    pub fn to_entries(&self) -> Vec<AnswerEntry> {
        self.entries
            .iter()
            .map(|(question_id, answer)| AnswerEntry {
                question_id: question_id.clone(),
                answer: answer.clone(),
            })
            .collect()
    }
}
