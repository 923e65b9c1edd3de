//! Text query form

use crate::api;
use crate::components::QueryOutcome;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, InputEvent};
use yew::prelude::*;

#[function_component(TextQuery)]
pub fn text_query() -> Html {
    let drug_name = use_state(String::new);
    let busy = use_state(|| false);
    let outcome = use_state(QueryOutcome::default);

    let on_input = {
        let drug_name = drug_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            drug_name.set(input.value());
        })
    };

    let on_submit = {
        let drug_name = drug_name.clone();
        let busy = busy.clone();
        let outcome = outcome.clone();
        Callback::from(move |_: MouseEvent| {
            if *busy {
                return;
            }
            // Empty input never reaches the server.
            let query = drug_name.trim().to_string();
            if query.is_empty() {
                outcome.set(QueryOutcome {
                    answer: None,
                    warning: Some("Please enter a drug name.".to_string()),
                });
                return;
            }

            busy.set(true);
            outcome.set(QueryOutcome::default());

            let busy = busy.clone();
            let outcome = outcome.clone();
            spawn_local(async move {
                match api::post_text_query(&query).await {
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
        })
    };

    html! {
        <div class="text-query">
            <h2>{ "Text Input" }</h2>
            <input
                type="text"
                placeholder="e.g., Nicotine, Alcohol"
                value={(*drug_name).clone()}
                oninput={on_input}
                disabled={*busy}
            />
            <button onclick={on_submit} disabled={*busy}>{ "Submit Text" }</button>
            if *busy {
                <p class="spinner">{ "Processing..." }</p>
            }
            if let Some(warning) = &outcome.warning {
                <p class="warning">{ warning.clone() }</p>
            }
            if let Some(answer) = &outcome.answer {
                <div class="result">
                    <p class="success">{ "Here's the information:" }</p>
                    <p>{ answer.clone() }</p>
                </div>
            }
        </div>
    }
}
