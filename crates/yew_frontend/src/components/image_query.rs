//! Image upload and description

use crate::api;
use crate::components::QueryOutcome;
use gloo::file::callbacks::{read_as_data_url, FileReader};
use gloo::file::File;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlInputElement};
use yew::prelude::*;

#[function_component(ImageQuery)]
pub fn image_query() -> Html {
    let busy = use_state(|| false);
    let preview = use_state(|| None::<String>);
    let outcome = use_state(QueryOutcome::default);
    // The reader task is dropped when the read finishes or a new file is
    // chosen; it must stay alive until then.
    let reader = use_state(|| None::<FileReader>);

    let on_file_change = {
        let busy = busy.clone();
        let preview = preview.clone();
        let outcome = outcome.clone();
        let reader = reader.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|list| list.get(0));
            let Some(file) = file else {
                outcome.set(QueryOutcome {
                    answer: None,
                    warning: None,
                });
                return;
            };

            let file = File::from(file);
            let file_name = file.name();
            busy.set(true);
            preview.set(None);
            outcome.set(QueryOutcome::default());

            let busy = busy.clone();
            let preview = preview.clone();
            let outcome = outcome.clone();
            let task = read_as_data_url(&file, move |result| match result {
                Ok(data_url) => {
                    let data_b64 = api::base64_of_data_url(&data_url).to_string();
                    preview.set(Some(data_url));
                    spawn_local(async move {
                        match api::post_image_query(&file_name, &data_b64).await {
                            Ok(answer) => outcome.set(QueryOutcome {
                                answer: Some(answer),
                                warning: None,
                            }),
                            Err(message) => outcome.set(QueryOutcome {
                                answer: None,
                                warning: Some(message),
                            }),
                        }
                        busy.set(false);
                    });
                }
                Err(err) => {
                    outcome.set(QueryOutcome {
                        answer: None,
                        warning: Some(format!("failed to read file: {}", err)),
                    });
                    busy.set(false);
                }
            });
            reader.set(Some(task));
        })
    };

    html! {
        <div class="image-query">
            <h2>{ "Image Input" }</h2>
            <input
                type="file"
                accept=".png,.jpg,.jpeg"
                onchange={on_file_change}
                disabled={*busy}
            />
            if let Some(url) = &(*preview) {
                <figure class="preview">
                    <img src={url.clone()} alt="Uploaded Image" />
                    <figcaption>{ "Uploaded Image" }</figcaption>
                </figure>
            }
            if *busy {
                <p class="spinner">{ "Analyzing image..." }</p>
            }
            if let Some(warning) = &outcome.warning {
                <p class="warning">{ warning.clone() }</p>
            }
            if let Some(answer) = &outcome.answer {
                <div class="result">
                    <p class="success">{ "Image analysis completed!" }</p>
                    <h3>{ "Description:" }</h3>
                    <p>{ answer.clone() }</p>
                </div>
            }
            if preview.is_none() && !*busy && *outcome == QueryOutcome::default() {
                <p class="info">{ "Please upload an image file." }</p>
            }
        </div>
    }
}
