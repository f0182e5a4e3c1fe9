use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn LoginPrompt(error: ViewError) -> Element {
    rsx! {
        div { class: "page login-prompt",
            h2 { "You are not logged in" }
            p { "{error.message()}" }
            Link { class: "btn", to: Route::Login {}, "Go to Login" }
        }
    }
}
