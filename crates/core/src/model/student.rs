use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ExamId;

/// The logged-in student's identity and academic record, as returned by the login call.
///
/// Field names follow the portal API wire format so the same shape can be persisted
/// and rehydrated without a mapping layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub registration_no: String,
    pub course: Option<String>,
    #[serde(rename = "courseduration", alias = "courseDuration")]
    pub course_duration: Option<String>,
    pub date_of_admission: Option<String>,
    pub dob: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub address: Option<String>,
    pub grade: Option<String>,
    pub avatar: Option<String>,
    pub qr_code: Option<String>,
    #[serde(rename = "hasAssignedExams", alias = "assignedExams")]
    pub assigned_exams: Vec<ExamId>,
    pub completed_exams: Vec<CompletedExam>,
}

/// Score record of an exam the student has already attempted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletedExam {
    #[serde(rename = "exam", alias = "examId")]
    pub exam_id: ExamId,
    pub attended_questions: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    // The API spells this field `percentge`.
    #[serde(alias = "percentge")]
    pub percentage: f64,
}

impl StudentProfile {
    /// True when the student already has a score recorded for the exam.
    #[must_use]
    pub fn has_completed(&self, exam_id: &ExamId) -> bool {
        self.completed_exams
            .iter()
            .any(|completed| &completed.exam_id == exam_id)
    }

    /// First character of the name, upper-cased, for avatar placeholders.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }

    #[must_use]
    pub fn admission_date(&self) -> Option<NaiveDate> {
        self.date_of_admission.as_deref().and_then(parse_api_date)
    }

    #[must_use]
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.dob.as_deref().and_then(parse_api_date)
    }
}

/// Parses the date formats the API emits: full RFC 3339 timestamps or bare `YYYY-MM-DD`.
#[must_use]
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
