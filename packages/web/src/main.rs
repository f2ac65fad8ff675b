use dioxus::prelude::*;

use store::ClinicConfig;
use ui::ClinicProvider;
use views::{Appointments, Doctors, Patients, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/patients")]
        Patients {},
        #[route("/doctors")]
        Doctors {},
        #[route("/appointments")]
        Appointments {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Configuration baked in at build time.
const CLINIC_TOML: &str = include_str!("../clinic.toml");

fn main() {
    dioxus::launch(App);
}

/// Embedded `clinic.toml`, with the base URL overridable through the
/// `CLINIC_API_BASE` environment variable at compile time.
fn load_config() -> ClinicConfig {
    let config = match ClinicConfig::from_toml(CLINIC_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ClinicConfig::filename(), e);
            ClinicConfig::default()
        }
    };
    match option_env!("CLINIC_API_BASE") {
        Some(base) if !base.trim().is_empty() => config.with_base_url(base.trim()),
        _ => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Title { "QubeHealth Admin" }
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::CLINIC_CSS }

        ClinicProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/patients`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Patients {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = ClinicConfig::from_toml(CLINIC_TOML).unwrap();
        assert_eq!(config.list.search_debounce_ms, 400);
        assert_eq!(config.calendar.slot_minutes, 30);
    }

    #[test]
    fn test_routes_render_paths() {
        assert_eq!(Route::Patients {}.to_string(), "/patients");
        assert_eq!(Route::Doctors {}.to_string(), "/doctors");
        assert_eq!(Route::Appointments {}.to_string(), "/appointments");
        assert_eq!("/".parse::<Route>().ok(), Some(Route::Root {}));
    }
}
