use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, SessionRevision};
use crate::routes::Route;
use crate::vm::LoginForm;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = use_navigator();
    revision.track();

    let session = ctx.session();
    let mut form = use_signal(LoginForm::default);
    let mut message = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let already_logged_in = session.is_authenticated();
    use_effect(move || {
        if already_logged_in {
            navigator.replace(Route::Profile {});
        }
    });

    let submit = move |_| {
        let session = session.clone();
        let current = form.read().clone();
        let (registration_no, password) = match current.credentials() {
            Ok((registration_no, password)) => (registration_no.to_string(), password.to_string()),
            Err(err) => {
                message.set(Some(err.to_string()));
                return;
            }
        };
        message.set(None);
        loading.set(true);
        spawn(async move {
            let ok = session.login(&registration_no, &password).await;
            loading.set(false);
            if ok {
                revision.bump();
                navigator.replace(Route::Profile {});
            } else {
                message.set(session.error());
            }
        });
    };

    let busy = loading();
    let label = LoginForm::submit_label(busy);

    rsx! {
        div { class: "page login",
            h2 { "Student Login" }
            div { class: "form",
                input {
                    r#type: "text",
                    placeholder: "Registration Number",
                    value: "{form.read().registration_no}",
                    oninput: move |evt| form.write().registration_no = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{form.read().password}",
                    oninput: move |evt| form.write().password = evt.value(),
                }
                button { class: "btn", disabled: busy, onclick: submit, "{label}" }
            }
            if let Some(message) = message() {
                p { class: "error", "{message}" }
            }
        }
    }
}
