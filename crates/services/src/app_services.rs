use std::sync::Arc;

use storage::repository::{SessionEntryRepository, Storage};

use crate::Clock;
use crate::api::{HttpPortalApi, PortalApi};
use crate::config::PortalConfig;
use crate::error::AppServicesError;
use crate::exams::{AssignedExamsService, ExamSessionService};
use crate::session_store::SessionStore;
use crate::verification::VerificationService;

/// Assembles the app-facing services around one shared session store.
#[derive(Clone)]
pub struct PortalServices {
    session: Arc<SessionStore>,
    exam_sessions: Arc<ExamSessionService>,
    assigned_exams: Arc<AssignedExamsService>,
    verification: Arc<VerificationService>,
}

impl PortalServices {
    /// Build services talking HTTP to the configured portal, restoring any
    /// persisted session from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be built.
    pub async fn bootstrap(
        config: PortalConfig,
        storage: &Storage,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let api: Arc<dyn PortalApi> = Arc::new(HttpPortalApi::new(config)?);
        Ok(Self::from_parts(api, Arc::clone(&storage.session), clock).await)
    }

    /// Build services over any API implementation.
    pub async fn from_parts(
        api: Arc<dyn PortalApi>,
        repo: Arc<dyn SessionEntryRepository>,
        clock: Clock,
    ) -> Self {
        let session = Arc::new(SessionStore::rehydrate(Arc::clone(&api), repo).await);
        Self {
            session,
            exam_sessions: Arc::new(ExamSessionService::new(Arc::clone(&api))),
            assigned_exams: Arc::new(AssignedExamsService::new(Arc::clone(&api), clock)),
            verification: Arc::new(VerificationService::new(api)),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn exam_sessions(&self) -> Arc<ExamSessionService> {
        Arc::clone(&self.exam_sessions)
    }

    #[must_use]
    pub fn assigned_exams(&self) -> Arc<AssignedExamsService> {
        Arc::clone(&self.assigned_exams)
    }

    #[must_use]
    pub fn verification(&self) -> Arc<VerificationService> {
        Arc::clone(&self.verification)
    }
}
