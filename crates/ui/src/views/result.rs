use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::decode_result;

#[component]
pub fn ResultView(id: String, data: String) -> Element {
    let decoded = decode_result(&data);

    rsx! {
        div { class: "page result", "data-exam-id": "{id}",
            h2 { "Exam Results" }
            match decoded {
                Ok(result) => rsx! {
                    h3 { "{result.exam_name}" }
                    dl { class: "result-grid",
                        dt { "Attended Questions" }
                        dd { "{result.attended}" }
                        dt { "Correct Answers" }
                        dd { "{result.correct}" }
                        dt { "Total Questions" }
                        dd { "{result.total}" }
                        dt { "Percentage" }
                        dd { "{result.percentage}" }
                    }
                },
                Err(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
            Link { class: "btn", to: Route::Exams {}, "Back to Exams" }
        }
    }
}
