//! Small form and feedback controls shared by every screen.

use dioxus::prelude::*;

use crate::icons::{FaSort, FaSpinner, FaTriangleExclamation};
use crate::Icon;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Destructive,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Outline => "btn btn-outline",
            ButtonVariant::Destructive => "btn btn-destructive",
            ButtonVariant::Ghost => "btn btn-ghost",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] class: String,
    #[props(default)] disabled: bool,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] title: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "{variant.class()} {class}",
            r#type: "{r#type}",
            disabled,
            title: "{title}",
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "field-label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] inputmode: String,
    #[props(default)] maxlength: Option<usize>,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "field-input {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            inputmode: "{inputmode}",
            maxlength: maxlength.map(|m| m.to_string()),
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// Dismissable error banner. Renders nothing without a message.
#[component]
pub fn ErrorBanner(message: Option<String>, on_dismiss: Option<EventHandler<()>>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
            span { class: "error-banner-text", "{message}" }
            if let Some(dismiss) = on_dismiss {
                button {
                    class: "error-banner-close",
                    title: "Dismiss",
                    onclick: move |_| dismiss.call(()),
                    "×"
                }
            }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading…".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "spinner",
            span { class: "spinner-icon", Icon { icon: FaSpinner, width: 18, height: 18 } }
            span { "{label}" }
        }
    }
}

/// Search box over a list; reports every keystroke.
#[component]
pub fn SearchInput(value: String, placeholder: String, oninput: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "search-input",
            Input {
                r#type: "search",
                placeholder,
                value,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

/// Clickable table header with the current sort marker.
#[component]
pub fn SortHeader(label: String, indicator: &'static str, onclick: EventHandler<()>) -> Element {
    rsx! {
        th {
            class: "sortable",
            onclick: move |_| onclick.call(()),
            span { "{label}" }
            if indicator.is_empty() {
                span { class: "sort-hint", Icon { icon: FaSort, width: 10, height: 10 } }
            } else {
                span { class: "sort-indicator", " {indicator}" }
            }
        }
    }
}
