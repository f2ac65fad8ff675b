//! Floating activity panel and its footer toggle. The panel filters the
//! session log by record kind (one chip per collection that has entries) or
//! down to failures, and clears only what the current filter shows.

use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogFilter};
use crate::icons::FaListUl;
use crate::Icon;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

#[component]
fn FilterChip(label: String, active: bool, onclick: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: if active { "activity-chip active" } else { "activity-chip" },
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let current = log.read();
    if !current.visible {
        return rsx! {};
    }

    let filter = current.filter;
    let shown = current.shown();
    let collections = current.collections();
    let total = current.entries.len();
    let errors = current.error_count();
    let clear_label = if filter == LogFilter::All { "Clear" } else { "Clear shown" };
    let empty_label = match filter {
        LogFilter::All => "No activity yet.".to_string(),
        LogFilter::Errors => "No failures.".to_string(),
        LogFilter::Collection(name) => format!("No activity for {name}."),
    };
    drop(current);

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity" }
                div {
                    class: "activity-log-header-actions",
                    button {
                        onclick: move |_| log.write().clear_shown(),
                        "{clear_label}"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "activity-log-filters",
                FilterChip {
                    label: format!("All {total}"),
                    active: filter == LogFilter::All,
                    onclick: move |_| log.write().filter = LogFilter::All,
                }
                FilterChip {
                    label: format!("Errors {errors}"),
                    active: filter == LogFilter::Errors,
                    onclick: move |_| log.write().filter = LogFilter::Errors,
                }
                for (name, count) in collections {
                    FilterChip {
                        key: "{name}",
                        label: format!("{name} {count}"),
                        active: filter == LogFilter::Collection(name),
                        onclick: move |_| log.write().filter = LogFilter::Collection(name),
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if shown.is_empty() {
                    div { class: "activity-log-empty", "{empty_label}" }
                }
                for entry in shown {
                    div {
                        class: "activity-log-entry {entry.level.css_class()}",
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        if let Some(subject) = entry.subject {
                            span { class: "activity-log-subject", "{subject.label()}" }
                        }
                        span { class: "activity-log-message", "{entry.message}" }
                    }
                }
            }
        }
    }
}

/// Footer button: entry count, highlighted while any failure is logged.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log.read().entries.len();
    let errors = log.read().error_count();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }
        button {
            class: if errors > 0 { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity log",
            onclick: move |_| {
                let mut log = log.write();
                log.visible = !log.visible;
                if errors > 0 && log.visible {
                    log.filter = LogFilter::Errors;
                }
            },
            Icon { icon: FaListUl, width: 12, height: 12 }
            if count > 0 {
                span { " {count}" }
            }
            if errors > 0 {
                span { class: "activity-log-error-count", " ({errors} failed)" }
            }
        }
    }
}
