mod common;

use std::sync::Arc;

use common::{FakePortalApi, PASSWORD, REG_NO, Rejection};
use portal_core::model::{ExamId, RegistrationRecord};
use portal_core::time::fixed_clock;
use services::{
    AssignedExamsService, ExamListError, PortalApi, SessionStore, VerificationError,
    VerificationService,
};
use storage::repository::{InMemoryRepository, SessionEntryRepository, SessionKey};

async fn session_for(api: &Arc<FakePortalApi>) -> SessionStore {
    let session = SessionStore::new(
        Arc::clone(api) as Arc<dyn PortalApi>,
        Arc::new(InMemoryRepository::new()),
    );
    assert!(session.login(REG_NO, PASSWORD).await);
    session
}

#[tokio::test]
async fn lists_exams_and_marks_completed_ones() {
    let api = Arc::new(FakePortalApi::new());
    let session = session_for(&api).await;
    let service = AssignedExamsService::new(Arc::clone(&api) as Arc<dyn PortalApi>, fixed_clock());

    let exams = service.list(&session).await.unwrap();

    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0].summary.id, ExamId::new("e1"));
    assert!(!exams[0].attempted);
    assert!(exams[1].attempted);
}

#[tokio::test]
async fn expired_token_is_refused_without_a_request() {
    let api = Arc::new(FakePortalApi::new());
    let repo = InMemoryRepository::new();
    repo.put_entry(SessionKey::Token, &common::expired_token())
        .await
        .unwrap();
    repo.put_entry(
        SessionKey::StudentData,
        &serde_json::to_string(&common::student()).unwrap(),
    )
    .await
    .unwrap();
    let session =
        SessionStore::rehydrate(Arc::clone(&api) as Arc<dyn PortalApi>, Arc::new(repo)).await;
    let service = AssignedExamsService::new(Arc::clone(&api) as Arc<dyn PortalApi>, fixed_clock());

    let err = service.list(&session).await.unwrap_err();

    assert!(matches!(err, ExamListError::SessionExpired));
    assert_eq!(FakePortalApi::calls(&api.assigned_calls), 0);
}

#[tokio::test]
async fn token_without_expiry_still_fetches_the_list() {
    let api = Arc::new(FakePortalApi::new());
    let repo = InMemoryRepository::new();
    // Payload: {"id":"s1","iat":1700000000}
    repo.put_entry(
        SessionKey::Token,
        "eyJhbGciOiJIUzI1NiJ9.eyJpZCI6InMxIiwiaWF0IjoxNzAwMDAwMDAwfQ.sig",
    )
    .await
    .unwrap();
    repo.put_entry(
        SessionKey::StudentData,
        &serde_json::to_string(&common::student()).unwrap(),
    )
    .await
    .unwrap();
    let session =
        SessionStore::rehydrate(Arc::clone(&api) as Arc<dyn PortalApi>, Arc::new(repo)).await;
    let service = AssignedExamsService::new(Arc::clone(&api) as Arc<dyn PortalApi>, fixed_clock());

    let exams = service.list(&session).await.unwrap();

    assert_eq!(exams.len(), 2);
    assert_eq!(FakePortalApi::calls(&api.assigned_calls), 1);
}

#[tokio::test]
async fn unauthorized_response_means_session_expired() {
    let api = Arc::new(FakePortalApi::new().with_assigned(Err(Rejection::new(401))));
    let session = session_for(&api).await;
    let service = AssignedExamsService::new(Arc::clone(&api) as Arc<dyn PortalApi>, fixed_clock());

    let err = service.list(&session).await.unwrap_err();

    assert!(matches!(err, ExamListError::SessionExpired));
}

#[tokio::test]
async fn listing_requires_login() {
    let api: Arc<dyn PortalApi> = Arc::new(FakePortalApi::new());
    let session = SessionStore::new(Arc::clone(&api), Arc::new(InMemoryRepository::new()));
    let service = AssignedExamsService::new(api, fixed_clock());

    let err = service.list(&session).await.unwrap_err();

    assert!(matches!(err, ExamListError::NotAuthenticated));
}

#[tokio::test]
async fn verification_trims_input_and_reports_missing_students() {
    let api = Arc::new(FakePortalApi::new().with_registration(RegistrationRecord {
        name: "Asha Verma".into(),
        registration_no: "R1".into(),
        ..RegistrationRecord::default()
    }));
    let service = VerificationService::new(Arc::clone(&api) as Arc<dyn PortalApi>);

    let record = service.verify("  R1 ").await.unwrap();
    assert_eq!(record.name, "Asha Verma");

    let missing = service.verify("R9").await.unwrap_err();
    assert!(matches!(missing, VerificationError::NotFound));
    assert_eq!(
        missing.to_string(),
        "No student available with this registration number"
    );
}

#[tokio::test]
async fn blank_registration_number_makes_no_request() {
    let api = Arc::new(FakePortalApi::new());
    let service = VerificationService::new(Arc::clone(&api) as Arc<dyn PortalApi>);

    let err = service.verify("   ").await.unwrap_err();

    assert!(matches!(err, VerificationError::EmptyRegistrationNo));
    assert_eq!(FakePortalApi::calls(&api.verify_calls), 0);
}
