use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{VerificationVm, map_verification};

#[component]
pub fn VerificationView() -> Element {
    let ctx = use_context::<AppContext>();
    let verification = ctx.verification();

    let mut registration_no = use_signal(String::new);
    let mut found = use_signal(|| None::<VerificationVm>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut searching = use_signal(|| false);

    let search = move |_| {
        let verification = verification.clone();
        let query = registration_no.read().clone();
        searching.set(true);
        error.set(None);
        found.set(None);
        spawn(async move {
            match verification.verify(&query).await {
                Ok(record) => found.set(Some(map_verification(&record))),
                Err(err) => error.set(Some(ViewError::from(err))),
            }
            searching.set(false);
        });
    };

    let busy = searching();

    rsx! {
        div { class: "page verification",
            h2 { "Student Verification" }
            div { class: "form inline",
                input {
                    r#type: "text",
                    placeholder: "Enter Registration Number",
                    value: "{registration_no}",
                    oninput: move |evt| registration_no.set(evt.value()),
                }
                button { class: "btn", disabled: busy, onclick: search,
                    if busy { "Searching..." } else { "Verify" }
                }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            if let Some(vm) = found() {
                div { class: "verification-card",
                    if let Some(photo) = vm.photo.clone() {
                        img { class: "avatar", src: "{photo}", alt: "{vm.name}" }
                    }
                    h3 { "{vm.name}" }
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
                    if let Some(certificate) = vm.certificate.clone() {
                        a { class: "btn", href: "{certificate}", target: "_blank", "View Certificate" }
                    }
                }
            }
        }
    }
}
