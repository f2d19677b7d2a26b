// Week Planner Application
// Main entry point

use chrono::Local;
use week_planner::models::settings::Settings;
use week_planner::services::api::{CalendarApi, HttpCalendarApi};
use week_planner::services::import::initial_store;
use week_planner::services::settings::SettingsService;
use week_planner::ui_egui::CalendarApp;

fn load_settings() -> Settings {
    match SettingsService::from_default_location() {
        Ok(service) => service.load_or_default(),
        Err(e) => {
            log::warn!("{:#}, using default settings", e);
            Settings::default()
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    log::info!("Starting Week Planner");

    let settings = load_settings();
    let api = if settings.load_from_api {
        HttpCalendarApi::from_settings(&settings)
            .map_err(|e| log::warn!("Calendar API unavailable: {:#}", e))
            .ok()
    } else {
        None
    };
    let store = initial_store(
        &settings,
        api.as_ref().map(|api| api as &dyn CalendarApi),
        Local::now().date_naive(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Week Planner")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Week Planner",
        options,
        Box::new(move |cc| Ok(Box::new(CalendarApp::new(cc, store, settings)))),
    )
}
