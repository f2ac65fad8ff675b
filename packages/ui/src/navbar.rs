use dioxus::prelude::*;

use crate::activity_log_panel::ActivityLogToggle;
use crate::clock::current_year;
use crate::icons::FaHospital;
use crate::Icon;

/// Page header. Route links are passed as children so this crate stays
/// independent of the app's router.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaHospital, width: 18, height: 18 }
                span { "{title}" }
            }
            nav {
                class: "navbar-links",
                {children}
            }
        }
    }
}

#[component]
pub fn Footer(owner: String) -> Element {
    let year = current_year();
    rsx! {
        footer {
            class: "footer",
            span { "© {year} {owner}. All rights reserved." }
            ActivityLogToggle {}
        }
    }
}
