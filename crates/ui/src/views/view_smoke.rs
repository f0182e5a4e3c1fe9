use portal_core::model::{AttemptOutcome, ResultSummary};

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_offers_login_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Home, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Log in with your registration number"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_requires_login() {
    let mut harness = setup_view_harness(ViewKind::Profile, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("You are not logged in"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_renders_student_record() {
    let mut harness = setup_view_harness(ViewKind::Profile, true).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Asha Verma"), "{html}");
    assert!(html.contains("GRTC-001"), "{html}");
    assert!(html.contains("75.00%"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exams_view_marks_attempted_exams() {
    let mut harness = setup_view_harness(ViewKind::Exams, true).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Computer Basics"), "{html}");
    assert!(html.contains("Already attempted"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exams_view_prompts_login_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Exams, false).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Go to Login"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_detail_view_waits_for_start() {
    let mut harness = setup_view_harness(ViewKind::ExamDetail("e1".into()), true).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Computer Basics"), "{html}");
    assert!(html.contains("Start Test"), "{html}");
    assert!(!html.contains("2 + 2?"), "questions shown before start: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_detail_view_redirects_to_login_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::ExamDetail("e1".into()), false).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("login route"), "{html}");
    assert!(!html.contains("Start Test"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_decodes_summary() {
    let summary = ResultSummary::from_outcome(
        "Computer Basics",
        AttemptOutcome {
            attended_questions: 1,
            correct_answers: 1,
            total_questions: 2,
        },
    );
    let view = ViewKind::Result {
        id: "e1".into(),
        data: summary.to_query_param(),
    };
    let mut harness = setup_view_harness(view, true).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Computer Basics"), "{html}");
    assert!(html.contains("50.00%"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_reports_missing_data() {
    let view = ViewKind::Result {
        id: "e1".into(),
        data: String::new(),
    };
    let mut harness = setup_view_harness(view, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No result data available."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn verification_view_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Verification, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Student Verification"), "{html}");
    assert!(harness.services.session().student().is_none());
}
