use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score counts returned by the server after an exam submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutcome {
    pub attended_questions: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl AttemptOutcome {
    /// `correct / total * 100`. An exam with no questions scores 0.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) / f64::from(self.total_questions) * 100.0
    }
}

/// What the results view shows for a finished attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub exam_name: String,
    pub attended_questions: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub percentage: f64,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultParamError {
    #[error("result parameter is not valid UTF-8")]
    Encoding,
    #[error("result parameter is not a valid summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResultSummary {
    #[must_use]
    pub fn from_outcome(exam_name: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self {
            exam_name: exam_name.into(),
            attended_questions: outcome.attended_questions,
            correct_answers: outcome.correct_answers,
            total_questions: outcome.total_questions,
            percentage: outcome.percentage(),
        }
    }

    /// URL-encoded JSON, ready to be placed in a query string.
    #[must_use]
    pub fn to_query_param(&self) -> String {
        // Serializing a plain struct of strings and numbers cannot fail.
        let json = serde_json::to_string(self).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    /// Decode a value produced by [`ResultSummary::to_query_param`].
    ///
    /// Accepts both still-encoded and already-decoded input, since routers differ
    /// in whether they decode query values before handing them over.
    ///
    /// # Errors
    ///
    /// Returns `ResultParamError` if the value is not valid UTF-8 after decoding
    /// or does not hold a summary.
    pub fn from_query_param(raw: &str) -> Result<Self, ResultParamError> {
        let decoded = urlencoding::decode(raw).map_err(|_| ResultParamError::Encoding)?;
        Ok(serde_json::from_str(&decoded)?)
    }
}
