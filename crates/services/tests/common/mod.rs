#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use portal_core::model::{
    AnswerEntry, AttemptOutcome, CompletedExam, Exam, ExamId, ExamSummary, Question, QuestionId,
    RegistrationRecord, StudentProfile,
};
use portal_core::time::fixed_now;
use portal_core::token::unsigned_token_expiring_at;
use reqwest::StatusCode;
use services::{ApiError, ErrorBody, FieldError, LoginResponse, PortalApi};
use storage::repository::{SessionEntryRepository, SessionKey, StorageError};
use tokio::sync::Notify;

pub const REG_NO: &str = "GRTC-001";
pub const PASSWORD: &str = "secret";

pub fn student() -> StudentProfile {
    StudentProfile {
        name: "Asha Verma".into(),
        registration_no: REG_NO.into(),
        course: Some("DCA".into()),
        assigned_exams: vec![ExamId::new("e1"), ExamId::new("e2")],
        completed_exams: vec![CompletedExam {
            exam_id: ExamId::new("e2"),
            attended_questions: 3,
            correct_answers: 2,
            total_questions: 4,
            percentage: 50.0,
        }],
        ..StudentProfile::default()
    }
}

/// A token valid for an hour past the fixed test instant.
pub fn valid_token() -> String {
    unsigned_token_expiring_at(fixed_now() + Duration::hours(1))
}

pub fn expired_token() -> String {
    unsigned_token_expiring_at(fixed_now() - Duration::minutes(1))
}

pub fn exam(question_count: usize) -> Exam {
    Exam {
        id: ExamId::new("e1"),
        title: "Computer Basics".into(),
        description: String::new(),
        questions: (1..=question_count)
            .map(|n| Question {
                id: QuestionId::new(format!("q{n}")),
                question_text: format!("Question {n}?"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            })
            .collect(),
    }
}

pub fn rejected(status: u16, message: Option<&str>, field_msg: Option<&str>) -> ApiError {
    let body = ErrorBody {
        message: message.map(str::to_string),
        errors: field_msg
            .map(|msg| {
                vec![FieldError {
                    msg: Some(msg.to_string()),
                }]
            })
            .unwrap_or_default(),
    };
    ApiError::rejected(
        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
        body,
    )
}

/// Scripted failure for a fake endpoint.
#[derive(Clone, Debug)]
pub struct Rejection {
    pub status: u16,
    pub message: Option<String>,
    pub field_msg: Option<String>,
}

impl Rejection {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            message: None,
            field_msg: None,
        }
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn field_msg(mut self, msg: &str) -> Self {
        self.field_msg = Some(msg.into());
        self
    }

    fn to_error(&self) -> ApiError {
        rejected(self.status, self.message.as_deref(), self.field_msg.as_deref())
    }
}

/// In-process `PortalApi` with scripted answers and call counters.
pub struct FakePortalApi {
    pub token: String,
    pub student: StudentProfile,
    pub exam: Mutex<Result<Exam, Rejection>>,
    pub attend: Mutex<VecDeque<Result<AttemptOutcome, Rejection>>>,
    pub assigned: Mutex<Result<Vec<ExamSummary>, Rejection>>,
    pub registrations: HashMap<String, RegistrationRecord>,
    pub submitted: Mutex<Vec<Vec<AnswerEntry>>>,
    pub login_gate: Option<Arc<Notify>>,
    pub login_calls: AtomicUsize,
    pub exam_calls: AtomicUsize,
    pub attend_calls: AtomicUsize,
    pub assigned_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
}

impl Default for FakePortalApi {
    fn default() -> Self {
        Self {
            token: valid_token(),
            student: student(),
            exam: Mutex::new(Ok(exam(2))),
            attend: Mutex::new(VecDeque::new()),
            assigned: Mutex::new(Ok(vec![
                ExamSummary {
                    id: ExamId::new("e1"),
                    title: "Computer Basics".into(),
                    description: String::new(),
                },
                ExamSummary {
                    id: ExamId::new("e2"),
                    title: "Office Tools".into(),
                    description: String::new(),
                },
            ])),
            registrations: HashMap::new(),
            submitted: Mutex::new(Vec::new()),
            login_gate: None,
            login_calls: AtomicUsize::new(0),
            exam_calls: AtomicUsize::new(0),
            attend_calls: AtomicUsize::new(0),
            assigned_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
        }
    }
}

impl FakePortalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exam(self, exam: Result<Exam, Rejection>) -> Self {
        *self.exam.lock().unwrap() = exam;
        self
    }

    pub fn with_attend(self, outcome: Result<AttemptOutcome, Rejection>) -> Self {
        self.attend.lock().unwrap().push_back(outcome);
        self
    }

    pub fn with_assigned(self, assigned: Result<Vec<ExamSummary>, Rejection>) -> Self {
        *self.assigned.lock().unwrap() = assigned;
        self
    }

    pub fn with_registration(mut self, record: RegistrationRecord) -> Self {
        self.registrations
            .insert(record.registration_no.clone(), record);
        self
    }

    pub fn with_login_gate(mut self, gate: Arc<Notify>) -> Self {
        self.login_gate = Some(gate);
        self
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortalApi for FakePortalApi {
    async fn login(
        &self,
        registration_no: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.login_gate {
            gate.notified().await;
        }
        if registration_no == REG_NO && password == PASSWORD {
            Ok(LoginResponse {
                token: self.token.clone(),
                student: self.student.clone(),
            })
        } else {
            Err(rejected(400, Some("Invalid credentials"), None))
        }
    }

    async fn exam_detail(&self, _token: &str, _exam_id: &ExamId) -> Result<Exam, ApiError> {
        self.exam_calls.fetch_add(1, Ordering::SeqCst);
        self.exam.lock().unwrap().clone().map_err(|r| r.to_error())
    }

    async fn attend_exam(
        &self,
        _token: &str,
        _exam_id: &ExamId,
        answers: &[AnswerEntry],
    ) -> Result<AttemptOutcome, ApiError> {
        self.attend_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(answers.to_vec());
        let scripted = self.attend.lock().unwrap().pop_front();
        match scripted {
            Some(outcome) => outcome.map_err(|r| r.to_error()),
            None => Err(rejected(500, None, None)),
        }
    }

    async fn assigned_exams(&self, _token: &str) -> Result<Vec<ExamSummary>, ApiError> {
        self.assigned_calls.fetch_add(1, Ordering::SeqCst);
        self.assigned.lock().unwrap().clone().map_err(|r| r.to_error())
    }

    async fn verify_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<RegistrationRecord>, ApiError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.registrations.get(registration_no).cloned())
    }
}

/// Session repository whose writes fail after `ok_writes` successful ones.
#[derive(Default)]
pub struct FlakyRepository {
    entries: Mutex<HashMap<SessionKey, String>>,
    ok_writes: usize,
    writes: AtomicUsize,
}

impl FlakyRepository {
    pub fn failing_after(ok_writes: usize) -> Self {
        Self {
            ok_writes,
            ..Self::default()
        }
    }

    pub fn stored(&self, key: SessionKey) -> Option<String> {
        self.entries.lock().unwrap().get(&key).cloned()
    }
}

#[async_trait]
impl SessionEntryRepository for FlakyRepository {
    async fn get_entry(&self, key: SessionKey) -> Result<Option<String>, StorageError> {
        Ok(self.stored(key))
    }

    async fn put_entry(&self, key: SessionKey, value: &str) -> Result<(), StorageError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.ok_writes {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.entries.lock().unwrap().insert(key, value.to_string());
        Ok(())
    }

    async fn remove_entry(&self, key: SessionKey) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(&key);
        Ok(())
    }
}
