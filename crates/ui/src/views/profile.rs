use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, SessionRevision};
use crate::routes::Route;
use crate::views::{LoginPrompt, ViewError};
use crate::vm::map_profile;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<SessionRevision>();
    revision.track();

    let Some(student) = ctx.session().student() else {
        return rsx! {
            LoginPrompt { error: ViewError::NotLoggedIn }
        };
    };
    let vm = map_profile(&student);

    rsx! {
        div { class: "page profile",
            div { class: "profile-header",
                if let Some(avatar) = vm.avatar.clone() {
                    img { class: "avatar", src: "{avatar}", alt: "{vm.name}" }
                } else {
                    span { class: "avatar placeholder", "{vm.initial}" }
                }
                h2 { "{vm.name}" }
            }
            table { class: "details",
                tbody {
                    for (label, value) in vm.details.iter().cloned() {
                        tr { key: "{label}",
                            th { "{label}" }
                            td { "{value}" }
                        }
                    }
                }
            }
            section {
                h3 { "Assigned Exams" }
                if vm.assigned.is_empty() {
                    p { "No exams assigned yet." }
                } else {
                    ul {
                        for exam_id in vm.assigned.iter().cloned() {
                            li { key: "{exam_id}",
                                Link { to: Route::ExamDetail { id: exam_id.to_string() }, "{exam_id}" }
                            }
                        }
                    }
                }
            }
            section {
                h3 { "Completed Exams" }
                if vm.completed.is_empty() {
                    p { "No exams completed yet." }
                } else {
                    table {
                        thead {
                            tr {
                                th { "Exam" }
                                th { "Score" }
                                th { "Percentage" }
                            }
                        }
                        tbody {
                            for exam in vm.completed.iter().cloned() {
                                tr { key: "{exam.exam_id}",
                                    td { "{exam.exam_id}" }
                                    td { "{exam.score}" }
                                    td { "{exam.percentage}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
