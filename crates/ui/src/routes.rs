use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{AppContext, SessionRevision};
use crate::views::{
    ExamDetailView, ExamsView, HomeView, LoginView, ProfileView, ResultView, VerificationView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/exams", ExamsView)] Exams {},
        #[route("/exams/:id", ExamDetailView)] ExamDetail { id: String },
        #[route("/result/:id?:data", ResultView)] ExamResult { id: String, data: String },
        #[route("/verification", VerificationView)] Verification {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = use_navigator();
    revision.track();

    let session = ctx.session();
    let student_name = session.student().map(|student| student.name);

    let logout = move |_| {
        let session = session.clone();
        spawn(async move {
            session.logout().await;
            revision.bump();
            navigator.replace(Route::Login {});
        });
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Student Portal" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Profile {}, "Profile" } }
                li { Link { to: Route::Exams {}, "Exams" } }
                li { Link { to: Route::Verification {}, "Verification" } }
            }
            if let Some(name) = student_name {
                div { class: "sidebar-session",
                    p { "Signed in as {name}" }
                    button { class: "btn secondary", onclick: logout, "Logout" }
                }
            } else {
                Link { class: "btn", to: Route::Login {}, "Login" }
            }
        }
    }
}
