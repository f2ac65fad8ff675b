//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{use_clinic, ClinicContext, ClinicProvider};

pub mod views;

pub const CLINIC_CSS: Asset = asset!("/assets/clinic.css");

mod navbar;
pub use navbar::{Footer, Navbar};

mod clock;

mod debounce;
pub use debounce::{use_debounced, Debounced};

mod remote_list;
pub use remote_list::{use_remote_list, RemoteList, SaveOutcome};

mod dialogs;
pub use dialogs::{AppointmentDialog, DoctorDialog, PatientDialog};

mod calendar;
pub use calendar::AppointmentCalendar;

pub mod activity_log;
pub use activity_log::{log_activity, log_entity_activity, use_activity_log, ActivityLog, LogFilter, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
