use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use portal_core::model::{
    AnswerEntry, AttemptOutcome, CompletedExam, Exam, ExamId, ExamSummary, Question, QuestionId,
    RegistrationRecord, StudentProfile,
};
use portal_core::time::{fixed_clock, fixed_now};
use portal_core::token::unsigned_token_expiring_at;
use services::{ApiError, ErrorBody, LoginResponse, PortalApi, PortalServices, StatusCode};
use storage::repository::Storage;

use crate::context::{SessionRevision, UiApp, build_app_context};
use crate::views::{
    ExamDetailView, ExamsView, HomeView, LoginView, ProfileView, ResultView, VerificationView,
};

pub const REG_NO: &str = "GRTC-001";
pub const PASSWORD: &str = "secret";

pub struct FakeApi;

fn invalid_credentials() -> ApiError {
    ApiError::rejected(
        StatusCode::BAD_REQUEST,
        ErrorBody {
            message: Some("Invalid credentials".into()),
            errors: Vec::new(),
        },
    )
}

#[async_trait]
impl PortalApi for FakeApi {
    async fn login(
        &self,
        registration_no: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        if registration_no != REG_NO || password != PASSWORD {
            return Err(invalid_credentials());
        }
        Ok(LoginResponse {
            token: unsigned_token_expiring_at(fixed_now() + Duration::hours(1)),
            student: StudentProfile {
                name: "Asha Verma".into(),
                registration_no: REG_NO.into(),
                course: Some("DCA".into()),
                assigned_exams: vec![ExamId::new("e1"), ExamId::new("e2")],
                completed_exams: vec![CompletedExam {
                    exam_id: ExamId::new("e2"),
                    correct_answers: 3,
                    total_questions: 4,
                    percentage: 75.0,
                    ..CompletedExam::default()
                }],
                ..StudentProfile::default()
            },
        })
    }

    async fn exam_detail(&self, _token: &str, exam_id: &ExamId) -> Result<Exam, ApiError> {
        Ok(Exam {
            id: exam_id.clone(),
            title: "Computer Basics".into(),
            description: "Ten minutes of warm-up".into(),
            questions: vec![Question {
                id: QuestionId::new("q1"),
                question_text: "2 + 2?".into(),
                options: vec!["3".into(), "4".into()],
            }],
        })
    }

    async fn attend_exam(
        &self,
        _token: &str,
        _exam_id: &ExamId,
        answers: &[AnswerEntry],
    ) -> Result<AttemptOutcome, ApiError> {
        let attended = u32::try_from(answers.len()).unwrap_or(u32::MAX);
        Ok(AttemptOutcome {
            attended_questions: attended,
            correct_answers: attended,
            total_questions: 1,
        })
    }

    async fn assigned_exams(&self, _token: &str) -> Result<Vec<ExamSummary>, ApiError> {
        Ok(vec![
            ExamSummary {
                id: ExamId::new("e1"),
                title: "Computer Basics".into(),
                description: "Hardware and software".into(),
            },
            ExamSummary {
                id: ExamId::new("e2"),
                title: "Office Tools".into(),
                description: String::new(),
            },
        ])
    }

    async fn verify_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<RegistrationRecord>, ApiError> {
        Ok((registration_no == REG_NO).then(|| RegistrationRecord {
            name: "Asha Verma".into(),
            registration_no: REG_NO.into(),
            ..RegistrationRecord::default()
        }))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Login,
    Profile,
    Exams,
    ExamDetail(String),
    Result { id: String, data: String },
    Verification,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<PortalServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| SessionRevision::new(Signal::new(0)));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/login")]
    LoginLanding {},
}

#[component]
fn LoginLanding() -> Element {
    rsx! { p { "login route" } }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Exams => rsx! { ExamsView {} },
        ViewKind::ExamDetail(id) => rsx! { ExamDetailView { id } },
        ViewKind::Result { id, data } => rsx! { ResultView { id, data } },
        ViewKind::Verification => rsx! { VerificationView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: Arc<PortalServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over an in-memory session; `logged_in` performs a real login first.
pub async fn setup_view_harness(view: ViewKind, logged_in: bool) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = Arc::new(
        PortalServices::from_parts(Arc::new(FakeApi), storage.session, fixed_clock()).await,
    );
    if logged_in {
        assert!(services.session().login(REG_NO, PASSWORD).await);
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
        },
    );

    ViewHarness { dom, services }
}
