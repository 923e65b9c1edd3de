//! Main application component

use crate::components::image_query::ImageQuery;
use crate::components::text_query::TextQuery;
use web_sys::{Event, HtmlSelectElement};
use yew::prelude::*;

/// The two input modalities offered by the UI
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Image,
}

#[function_component(App)]
pub fn app() -> Html {
    let mode = use_state(|| InputMode::Text);

    let on_mode_change = {
        let mode = mode.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let next = match select.value().as_str() {
                "Image" => InputMode::Image,
                _ => InputMode::Text,
            };
            mode.set(next);
        })
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{ "💬 Multimodal Chatbot for Drug Information" }</h1>
                <p>{ "This application processes both text and image inputs to provide \
                      drug information and analyze medical reports. Simply enter the \
                      drug name or upload an image for analysis." }</p>
            </header>
            <aside class="input-options">
                <h2>{ "Input Options" }</h2>
                <p>{ "Select Input Type" }</p>
                <select onchange={on_mode_change}>
                    <option value="Text" selected={*mode == InputMode::Text}>{ "Text" }</option>
                    <option value="Image" selected={*mode == InputMode::Image}>{ "Image" }</option>
                </select>
            </aside>
            <main class="app-main">
                {
                    match *mode {
                        InputMode::Text => html! { <TextQuery /> },
                        InputMode::Image => html! { <ImageQuery /> },
                    }
                }
            </main>
        </div>
    }
}
