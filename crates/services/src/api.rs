use async_trait::async_trait;
use portal_core::model::{
    AnswerEntry, AttemptOutcome, Exam, ExamId, ExamSummary, RegistrationRecord, StudentProfile,
};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PortalConfig;
use crate::error::{ApiError, ErrorBody};

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub student: StudentProfile,
}

/// Remote portal API contract.
///
/// Every call is single-shot: no retries, no de-duplication.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// `POST /students/login`
    async fn login(&self, registration_no: &str, password: &str)
    -> Result<LoginResponse, ApiError>;

    /// `GET /exam/{id}/studentId`
    async fn exam_detail(&self, token: &str, exam_id: &ExamId) -> Result<Exam, ApiError>;

    /// `POST /exam/{id}/attend`
    async fn attend_exam(
        &self,
        token: &str,
        exam_id: &ExamId,
        answers: &[AnswerEntry],
    ) -> Result<AttemptOutcome, ApiError>;

    /// `GET /exam/student`
    async fn assigned_exams(&self, token: &str) -> Result<Vec<ExamSummary>, ApiError>;

    /// `GET {verification}/studentReg/{registrationNo}`; `None` when no such student.
    async fn verify_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<RegistrationRecord>, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    registration_no: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AttendRequest<'a> {
    answers: &'a [AnswerEntry],
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    #[serde(default)]
    data: Option<RegistrationRecord>,
}

/// `PortalApi` over HTTPS with `reqwest`.
#[derive(Clone)]
pub struct HttpPortalApi {
    client: Client,
    config: PortalConfig,
}

impl HttpPortalApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: PortalConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    fn api_url(&self, segments: &[&str]) -> Url {
        endpoint(self.config.api_base_url(), segments)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        read_json(response).await
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Config only admits http(s) base URLs, which always accept path segments.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    debug!(%status, "portal API rejected request");
    Err(ApiError::rejected(status, body))
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(
        &self,
        registration_no: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let url = self.api_url(&["students", "login"]);
        debug!(%url, "login request");
        let payload = LoginRequest {
            registration_no,
            password,
        };
        self.send(self.client.post(url).json(&payload)).await
    }

    async fn exam_detail(&self, token: &str, exam_id: &ExamId) -> Result<Exam, ApiError> {
        let url = self.api_url(&["exam", exam_id.as_str(), "studentId"]);
        debug!(%url, "exam detail request");
        self.send(self.client.get(url).bearer_auth(token)).await
    }

    async fn attend_exam(
        &self,
        token: &str,
        exam_id: &ExamId,
        answers: &[AnswerEntry],
    ) -> Result<AttemptOutcome, ApiError> {
        let url = self.api_url(&["exam", exam_id.as_str(), "attend"]);
        debug!(%url, answered = answers.len(), "exam submission request");
        let payload = AttendRequest { answers };
        self.send(self.client.post(url).bearer_auth(token).json(&payload))
            .await
    }

    async fn assigned_exams(&self, token: &str) -> Result<Vec<ExamSummary>, ApiError> {
        let url = self.api_url(&["exam", "student"]);
        debug!(%url, "assigned exams request");
        self.send(self.client.get(url).bearer_auth(token)).await
    }

    async fn verify_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<RegistrationRecord>, ApiError> {
        let url = endpoint(
            self.config.verification_base_url(),
            &["studentReg", registration_no],
        );
        debug!(%url, "registration lookup request");
        let body: VerificationResponse = self.send(self.client.get(url)).await?;
        Ok(body.data)
    }
}
