use portal_core::model::{ExamId, StudentProfile};

#[derive(Clone, Debug, PartialEq)]
pub struct CompletedExamVm {
    pub exam_id: ExamId,
    pub score: String,
    pub percentage: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileVm {
    pub name: String,
    pub initial: String,
    pub avatar: Option<String>,
    pub details: Vec<(&'static str, String)>,
    pub assigned: Vec<ExamId>,
    pub completed: Vec<CompletedExamVm>,
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

#[must_use]
pub fn map_profile(student: &StudentProfile) -> ProfileVm {
    let admission = student
        .admission_date()
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| or_dash(student.date_of_admission.as_deref()));
    let birth = student
        .birth_date()
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| or_dash(student.dob.as_deref()));

    ProfileVm {
        name: student.name.clone(),
        initial: student.initial().map(String::from).unwrap_or_default(),
        avatar: student
            .avatar
            .clone()
            .filter(|url| !url.trim().is_empty()),
        details: vec![
            ("Registration No", student.registration_no.clone()),
            ("Course", or_dash(student.course.as_deref())),
            ("Course Duration", or_dash(student.course_duration.as_deref())),
            ("Date of Admission", admission),
            ("Date of Birth", birth),
            ("Father's Name", or_dash(student.father_name.as_deref())),
            ("Mother's Name", or_dash(student.mother_name.as_deref())),
            ("Address", or_dash(student.address.as_deref())),
            ("Grade", or_dash(student.grade.as_deref())),
        ],
        assigned: student.assigned_exams.clone(),
        completed: student
            .completed_exams
            .iter()
            .map(|exam| CompletedExamVm {
                exam_id: exam.exam_id.clone(),
                score: format!("{} / {}", exam.correct_answers, exam.total_questions),
                percentage: format!("{:.2}%", exam.percentage),
            })
            .collect(),
    }
}
