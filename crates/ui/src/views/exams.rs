use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, SessionRevision};
use crate::routes::Route;
use crate::views::{LoginPrompt, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExamListItemVm, map_exam_list};

#[component]
pub fn ExamsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let session = ctx.session();
    let listing = ctx.assigned_exams();

    let resource = use_resource(move || {
        let session = session.clone();
        let listing = listing.clone();
        async move {
            match listing.list(&session).await {
                Ok(exams) => Ok(map_exam_list(&exams)),
                Err(err) => {
                    let err = ViewError::from(err);
                    if err == ViewError::SessionExpired {
                        session.logout().await;
                        revision.bump();
                    }
                    Err(err)
                }
            }
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Assigned Exams" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { "No exams available at the moment." }
                    } else {
                        table { class: "exam-list",
                            thead {
                                tr {
                                    th { "Exam Name" }
                                    th { "Description" }
                                    th { "Action" }
                                }
                            }
                            tbody {
                                for item in items {
                                    ExamRow { key: "{item.id}", item }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) if err.needs_login() => rsx! {
                    LoginPrompt { error: err }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ExamRow(item: ExamListItemVm) -> Element {
    rsx! {
        tr {
            td { "{item.title}" }
            td { "{item.description}" }
            td {
                if item.attempted {
                    span { class: "done", "{item.status_label()}" }
                } else {
                    Link { class: "btn", to: Route::ExamDetail { id: item.id.to_string() },
                        "{item.status_label()}"
                    }
                }
            }
        }
    }
}
