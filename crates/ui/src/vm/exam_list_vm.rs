use portal_core::model::ExamId;
use services::AssignedExam;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamListItemVm {
    pub id: ExamId,
    pub title: String,
    pub description: String,
    pub attempted: bool,
}

impl ExamListItemVm {
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.attempted {
            "Already attempted"
        } else {
            "Start"
        }
    }
}

#[must_use]
pub fn map_exam_list(exams: &[AssignedExam]) -> Vec<ExamListItemVm> {
    exams
        .iter()
        .map(|exam| ExamListItemVm {
            id: exam.summary.id.clone(),
            title: exam.summary.title.clone(),
            description: exam.summary.description.clone(),
            attempted: exam.attempted,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use portal_core::model::ExamSummary;

    use super::*;

    #[test]
    fn attempted_exams_are_labelled() {
        let exams = vec![
            AssignedExam {
                summary: ExamSummary {
                    id: ExamId::new("e1"),
                    title: "Basics".into(),
                    description: String::new(),
                },
                attempted: true,
            },
            AssignedExam {
                summary: ExamSummary {
                    id: ExamId::new("e2"),
                    title: "Office".into(),
                    description: "Word and Excel".into(),
                },
                attempted: false,
            },
        ];

        let items = map_exam_list(&exams);

        assert_eq!(items[0].status_label(), "Already attempted");
        assert_eq!(items[1].status_label(), "Start");
        assert_eq!(items[1].description, "Word and Excel");
    }
}
