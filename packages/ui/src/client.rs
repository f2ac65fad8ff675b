//! Backend client and configuration context.
//!
//! [`ClinicProvider`] sits at the top of the app and makes three things
//! available to every screen: the parsed [`ClinicConfig`], one shared
//! [`ClinicClient`], and the activity log signal.

use api::ClinicClient;
use dioxus::prelude::*;
use store::ClinicConfig;

use crate::activity_log::{log_activity, ActivityLog, LogLevel};

#[derive(Clone, Debug)]
pub struct ClinicContext {
    pub config: ClinicConfig,
    pub client: ClinicClient,
}

pub fn use_clinic() -> ClinicContext {
    use_context::<ClinicContext>()
}

#[component]
pub fn ClinicProvider(config: ClinicConfig, children: Element) -> Element {
    let mut log = use_context_provider(|| Signal::new(ActivityLog::default()));
    use_context_provider(|| {
        log_activity(
            &mut log,
            LogLevel::Info,
            &format!("Using clinic backend at {}", config.base_url()),
        );
        ClinicContext {
            client: ClinicClient::new(config.base_url()),
            config: config.clone(),
        }
    });

    rsx! {
        {children}
    }
}
