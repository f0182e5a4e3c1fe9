use dioxus::prelude::*;
use dioxus_router::use_navigator;
use portal_core::model::{ExamId, QuestionId};
use services::ExamPhase;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{LoginPrompt, ViewError};
use crate::vm::{ExamVm, QuestionRowVm, START_INSTRUCTIONS};

/// Re-render on every countdown tick until the countdown task ends.
fn watch_countdown(mut vm: Signal<ExamVm>) {
    let updates = vm.read().countdown_updates();
    if let Some(mut updates) = updates {
        spawn(async move {
            while updates.changed().await.is_ok() {
                vm.write().sync();
            }
            vm.write().sync();
        });
    }
}

#[component]
pub fn ExamDetailView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = ctx.session();
    let service = ctx.exam_sessions();

    let parsed_id = id.parse::<ExamId>().ok();
    let invalid_id = parsed_id.is_none();
    let mut vm = use_signal(move || ExamVm::new(parsed_id.unwrap_or_default()));
    let mut error = use_signal(|| None::<ViewError>);

    {
        let session = session.clone();
        let service = service.clone();
        use_future(move || {
            let session = session.clone();
            let service = service.clone();
            async move {
                if invalid_id {
                    error.set(Some(ViewError::ExamUnavailable));
                    return;
                }
                let ticket = vm.write().begin_load(&session);
                let loaded = match ticket {
                    Ok(ticket) => {
                        let fetched = service.fetch_exam(&ticket).await;
                        vm.write().finish_load(fetched)
                    }
                    Err(err) => Err(err),
                };
                match loaded {
                    Err(ViewError::NotLoggedIn) => {
                        navigator.replace(Route::Login {});
                    }
                    Err(err) => error.set(Some(err)),
                    Ok(()) => {}
                }
            }
        });
    }

    let start = move |_| {
        let started = vm.write().start();
        match started {
            Ok(()) => watch_countdown(vm),
            Err(err) => error.set(Some(err)),
        }
    };

    let submit = move |_| {
        let session = session.clone();
        let service = service.clone();
        spawn(async move {
            let ticket = vm.write().begin_submit(&session);
            let ticket = match ticket {
                Ok(ticket) => ticket,
                Err(err) => {
                    error.set(Some(err));
                    return;
                }
            };
            error.set(None);
            let outcome = service.send_answers(&ticket).await;
            let finished = vm.write().finish_submit(outcome);
            match finished {
                Ok(summary) => {
                    navigator.push(Route::ExamResult {
                        id: ticket.exam_id.to_string(),
                        data: summary.to_query_param(),
                    });
                }
                Err(err) => {
                    error.set(Some(err));
                    watch_countdown(vm);
                }
            }
        });
    };

    let current_error = error.read().clone();
    if let Some(err) = current_error.clone().filter(ViewError::needs_login) {
        return rsx! {
            LoginPrompt { error: err }
        };
    }

    let (phase, title, description, rows, countdown, notice, can_submit, submit_label, locked) = {
        let view = vm.read();
        (
            view.phase(),
            view.title().to_string(),
            view.description().to_string(),
            view.rows(),
            view.countdown_text(),
            view.time_up_notice(),
            view.can_submit(),
            view.submit_label(),
            view.answers_locked(),
        )
    };

    rsx! {
        div { class: "page exam",
            match phase {
                ExamPhase::Locked => rsx! {
                    if let Some(err) = current_error {
                        p { class: "error", "{err.message()}" }
                    } else {
                        p { "Loading..." }
                    }
                },
                ExamPhase::Unstarted => rsx! {
                    h2 { "{title}" }
                    p { class: "instructions", "{START_INSTRUCTIONS}" }
                    button { class: "btn", onclick: start, "Start Test" }
                },
                ExamPhase::Done => rsx! {
                    p { "Exam submitted successfully!" }
                },
                ExamPhase::Running | ExamPhase::Submitting | ExamPhase::Expired => rsx! {
                    div { class: "exam-header",
                        h2 { "{title}" }
                        span { class: "countdown", "{countdown}" }
                    }
                    p { "{description}" }
                    for row in rows {
                        QuestionRow {
                            key: "{row.id}",
                            row,
                            locked,
                            on_choose: move |(question_id, option): (QuestionId, String)| {
                                vm.write().choose(question_id, option);
                            },
                        }
                    }
                    if let Some(notice) = notice {
                        p { class: "notice", "{notice}" }
                    }
                    if let Some(err) = current_error {
                        p { class: "error", "{err.message()}" }
                    }
                    button {
                        class: "btn",
                        disabled: !can_submit,
                        onclick: submit,
                        "{submit_label}"
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionRow(
    row: QuestionRowVm,
    locked: bool,
    on_choose: EventHandler<(QuestionId, String)>,
) -> Element {
    rsx! {
        div { class: "question",
            h3 { "{row.number}. {row.text}" }
            for option in row.options.iter().cloned() {
                label { key: "{option.label}", class: "option",
                    input {
                        r#type: "radio",
                        name: "question-{row.id}",
                        value: "{option.label}",
                        checked: option.selected,
                        disabled: locked,
                        onchange: {
                            let question_id = row.id.clone();
                            let label = option.label.clone();
                            move |_| on_choose.call((question_id.clone(), label.clone()))
                        },
                    }
                    "{option.label}"
                }
            }
        }
    }
}
