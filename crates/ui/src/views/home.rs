use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, SessionRevision};
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<SessionRevision>();
    revision.track();
    let student = ctx.session().student();

    rsx! {
        div { class: "page",
            h2 { "Welcome" }
            if let Some(student) = student {
                p { "Hello, {student.name}." }
                ul { class: "home-links",
                    li { Link { to: Route::Profile {}, "View your profile" } }
                    li { Link { to: Route::Exams {}, "Take an assigned exam" } }
                }
            } else {
                p { "Log in with your registration number to see your profile and exams." }
                Link { class: "btn", to: Route::Login {}, "Login" }
            }
            p { class: "muted",
                "Need to confirm a certificate? "
                Link { to: Route::Verification {}, "Verify a registration number" }
            }
        }
    }
}
