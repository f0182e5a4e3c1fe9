use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use portal_core::Clock;
use portal_core::model::StudentProfile;
use portal_core::token;
use storage::repository::{SessionEntryRepository, SessionKey, StorageError};
use tracing::{info, warn};

use crate::api::PortalApi;

/// Message shown when the server gives no reason for a failed login.
pub const LOGIN_FAILED: &str = "Login failed";

/// Observable session state.
///
/// `student` and `token` are written together by `login` and cleared together by
/// `logout`. Rehydration reads them independently, so a store built from
/// partially written storage may hold one without the other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub student: Option<StudentProfile>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Single source of truth for who is logged in.
///
/// Built once by the composition root and shared by `Arc`.
pub struct SessionStore {
    api: Arc<dyn PortalApi>,
    repo: Arc<dyn SessionEntryRepository>,
    state: Mutex<SessionState>,
    login_in_flight: AtomicBool,
}

impl SessionStore {
    /// A logged-out store that ignores whatever is persisted.
    #[must_use]
    pub fn new(api: Arc<dyn PortalApi>, repo: Arc<dyn SessionEntryRepository>) -> Self {
        Self::with_state(api, repo, SessionState::default())
    }

    /// Restore the last session from durable storage.
    ///
    /// The token and the student record are read independently and are not
    /// cross-checked, nor is the token's expiry inspected: a stale session is
    /// trusted until the API rejects it. Unreadable or undecodable entries are
    /// logged and treated as absent.
    pub async fn rehydrate(
        api: Arc<dyn PortalApi>,
        repo: Arc<dyn SessionEntryRepository>,
    ) -> Self {
        let token = read_entry(repo.as_ref(), SessionKey::Token).await;
        let student = read_entry(repo.as_ref(), SessionKey::StudentData)
            .await
            .and_then(|raw| match serde_json::from_str::<StudentProfile>(&raw) {
                Ok(student) => Some(student),
                Err(err) => {
                    warn!(error = %err, "discarding undecodable persisted student record");
                    None
                }
            });

        if token.is_some() != student.is_some() {
            warn!(
                has_token = token.is_some(),
                has_student = student.is_some(),
                "persisted session is only partially present"
            );
        }

        Self::with_state(
            api,
            repo,
            SessionState {
                student,
                token,
                ..SessionState::default()
            },
        )
    }

    fn with_state(
        api: Arc<dyn PortalApi>,
        repo: Arc<dyn SessionEntryRepository>,
        state: SessionState,
    ) -> Self {
        Self {
            api,
            repo,
            state: Mutex::new(state),
            login_in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    #[must_use]
    pub fn student(&self) -> Option<StudentProfile> {
        self.lock().student.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// The portal is open to whoever has a student profile loaded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().student.is_some()
    }

    /// True when a token is held and its `exp` has passed (or the token cannot be
    /// read). No token, or no `exp` claim, means nothing to expire.
    #[must_use]
    pub fn token_expired(&self, clock: &Clock) -> bool {
        self.lock()
            .token
            .as_deref()
            .is_some_and(|raw| token::is_expired(raw, clock))
    }

    /// Check credentials against the API and, on success, persist and adopt the session.
    ///
    /// Never fails past this boundary: the outcome is the return value, and the
    /// reason for a failure is left in [`SessionState::error`]. A call made while
    /// another login is in flight returns `false` without touching any state.
    pub async fn login(&self, registration_no: &str, password: &str) -> bool {
        if self
            .login_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("login ignored: another login is already in flight");
            return false;
        }
        let _in_flight = InFlight { store: self };
        self.lock().loading = true;

        let response = match self.api.login(registration_no, password).await {
            Ok(response) => response,
            Err(err) => {
                let message = err.server_message().unwrap_or(LOGIN_FAILED).to_string();
                info!(registration_no, error = %err, "login rejected");
                self.lock().error = Some(message);
                return false;
            }
        };

        if let Err(err) = self.persist(&response.token, &response.student).await {
            warn!(error = %err, "could not persist session");
            self.lock().error = Some(LOGIN_FAILED.to_string());
            return false;
        }

        {
            let mut state = self.lock();
            state.student = Some(response.student);
            state.token = Some(response.token);
            state.error = None;
        }
        info!(registration_no, "student logged in");
        true
    }

    /// Forget the session in memory and in durable storage. Safe to repeat.
    pub async fn logout(&self) {
        {
            let mut state = self.lock();
            state.student = None;
            state.token = None;
        }
        for key in SessionKey::ALL {
            if let Err(err) = self.repo.remove_entry(key).await {
                warn!(%key, error = %err, "could not clear persisted session entry");
            }
        }
        info!("student logged out");
    }

    async fn persist(&self, token: &str, student: &StudentProfile) -> Result<(), StorageError> {
        let student_json = serde_json::to_string(student)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let previous = [
            (SessionKey::Token, read_entry(self.repo.as_ref(), SessionKey::Token).await),
            (
                SessionKey::StudentData,
                read_entry(self.repo.as_ref(), SessionKey::StudentData).await,
            ),
        ];

        let written = async {
            self.repo.put_entry(SessionKey::Token, token).await?;
            self.repo
                .put_entry(SessionKey::StudentData, &student_json)
                .await
        }
        .await;

        if written.is_err() {
            for (key, value) in previous {
                self.restore_entry(key, value.as_deref()).await;
            }
        }
        written
    }

    /// Put back what was stored before a failed write, so durable storage keeps
    /// matching the in-memory session.
    async fn restore_entry(&self, key: SessionKey, value: Option<&str>) {
        let restored = match value {
            Some(value) => self.repo.put_entry(key, value).await,
            None => self.repo.remove_entry(key).await,
        };
        if let Err(err) = restored {
            warn!(%key, error = %err, "could not restore persisted session entry");
        }
    }
}

async fn read_entry(repo: &dyn SessionEntryRepository, key: SessionKey) -> Option<String> {
    match repo.get_entry(key).await {
        Ok(value) => value,
        Err(err) => {
            warn!(%key, error = %err, "could not read persisted session entry");
            None
        }
    }
}

/// Clears the in-flight flag and the loading indicator when a login ends,
/// including when its future is dropped mid-request.
struct InFlight<'a> {
    store: &'a SessionStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.lock().loading = false;
        self.store.login_in_flight.store(false, Ordering::Release);
    }
}
