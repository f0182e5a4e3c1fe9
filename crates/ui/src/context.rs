use std::sync::Arc;

use dioxus::prelude::*;
use services::{
    AssignedExamsService, ExamSessionService, PortalServices, SessionStore, VerificationService,
};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn exam_sessions(&self) -> Arc<ExamSessionService>;
    fn assigned_exams(&self) -> Arc<AssignedExamsService>;
    fn verification(&self) -> Arc<VerificationService>;
}

impl UiApp for PortalServices {
    fn session(&self) -> Arc<SessionStore> {
        PortalServices::session(self)
    }

    fn exam_sessions(&self) -> Arc<ExamSessionService> {
        PortalServices::exam_sessions(self)
    }

    fn assigned_exams(&self) -> Arc<AssignedExamsService> {
        PortalServices::assigned_exams(self)
    }

    fn verification(&self) -> Arc<VerificationService> {
        PortalServices::verification(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    exam_sessions: Arc<ExamSessionService>,
    assigned_exams: Arc<AssignedExamsService>,
    verification: Arc<VerificationService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            exam_sessions: app.exam_sessions(),
            assigned_exams: app.assigned_exams(),
            verification: app.verification(),
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

/// Bumped after login and logout so session-dependent views re-render.
#[derive(Clone, Copy)]
pub struct SessionRevision(Signal<u64>);

impl SessionRevision {
    #[must_use]
    pub fn new(signal: Signal<u64>) -> Self {
        Self(signal)
    }

    /// Subscribe the calling component to session changes.
    pub fn track(&self) {
        let _ = *self.0.read();
    }

    pub fn bump(&mut self) {
        *self.0.write() += 1;
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
