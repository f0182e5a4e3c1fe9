use portal_core::model::ResultSummary;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq)]
pub struct ResultVm {
    pub exam_name: String,
    pub attended: u32,
    pub correct: u32,
    pub total: u32,
    pub percentage: String,
}

impl From<&ResultSummary> for ResultVm {
    fn from(summary: &ResultSummary) -> Self {
        Self {
            exam_name: summary.exam_name.clone(),
            attended: summary.attended_questions,
            correct: summary.correct_answers,
            total: summary.total_questions,
            percentage: format!("{:.2}%", summary.percentage),
        }
    }
}

/// Decode the results route `data` parameter.
///
/// # Errors
///
/// Returns `ViewError::MissingResult` when the parameter is absent or does not
/// decode to a summary.
pub fn decode_result(data: &str) -> Result<ResultVm, ViewError> {
    if data.trim().is_empty() {
        return Err(ViewError::MissingResult);
    }
    ResultSummary::from_query_param(data)
        .map(|summary| ResultVm::from(&summary))
        .map_err(|_| ViewError::MissingResult)
}
