use dioxus::prelude::*;

use ui::views::{AppointmentsView, DoctorsView, PatientsView};
use ui::{ActivityLogPanel, Footer, Navbar};

use crate::Route;

/// Header, routed page and footer. Every page below remounts on navigation,
/// so banners and in-flight requests never carry over.
#[component]
pub fn Shell() -> Element {
    rsx! {
        div {
            class: "app-shell",
            Navbar {
                title: "QubeHealth",
                Link { to: Route::Patients {}, active_class: "active", "Patients" }
                Link { to: Route::Doctors {}, active_class: "active", "Doctors" }
                Link { to: Route::Appointments {}, active_class: "active", "Appointments" }
            }
            main {
                class: "app-main",
                Outlet::<Route> {}
            }
            Footer { owner: "QubeHealth" }
            ActivityLogPanel {}
        }
    }
}

#[component]
pub fn Patients() -> Element {
    rsx! { PatientsView {} }
}

#[component]
pub fn Doctors() -> Element {
    rsx! { DoctorsView {} }
}

#[component]
pub fn Appointments() -> Element {
    rsx! { AppointmentsView {} }
}
