use chrono::Local;
use std::rc::Rc;

use crate::models::settings::Settings;
use crate::services::store::{CalendarState, Command, EventStore};
use crate::ui_egui::event_dialog::{render_event_dialog, EventDialogState};
use crate::ui_egui::gesture::{EguiPointerCapture, InteractionEngine, PointerListeners};
use crate::ui_egui::views::header::WeekHeader;
use crate::ui_egui::views::task_sidebar::TaskSidebar;
use crate::ui_egui::views::week_view::WeekView;
use crate::utils::geometry::GridMetrics;

const SIDEBAR_WIDTH: f32 = 220.0;

pub struct CalendarApp {
    /// Single source of truth for events, catalog and selection
    store: EventStore,
    engine: InteractionEngine,
    settings: Settings,
    /// Open while the store's selection says the modal is open
    event_dialog_state: Option<EventDialogState>,
    scroll_to_now: bool,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.store.snapshot();
        let days = state.week_days(self.settings.first_day_of_week);
        let mut commands: Vec<Command> = Vec::new();

        egui::SidePanel::left("task_sidebar")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    commands.extend(TaskSidebar::show(ui, &state));
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            commands.extend(WeekHeader::show(ui, &state, &days, &self.settings));
            commands.extend(WeekView::show(
                ui,
                &state,
                &days,
                &mut self.engine,
                &self.settings,
                &mut self.scroll_to_now,
            ));
        });

        if let Some(dialog) = self.event_dialog_state.as_mut() {
            commands.extend(render_event_dialog(ctx, dialog));
        }

        if self.store.dispatch_all(commands) > 0 {
            self.sync_dialog(&state);
        }
    }
}

impl CalendarApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: EventStore, settings: Settings) -> Self {
        let listeners: Rc<dyn PointerListeners> = Rc::new(EguiPointerCapture::new(cc.egui_ctx.clone()));
        let engine = InteractionEngine::new(listeners, GridMetrics::from_settings(&settings));

        let mut app = Self {
            store,
            engine,
            settings,
            event_dialog_state: None,
            scroll_to_now: true,
        };
        let initial = CalendarState::new(app.store.state().selection.selected_date);
        app.sync_dialog(&initial);
        app
    }

    /// Opens, rebuilds or closes the form after the selection changed.
    fn sync_dialog(&mut self, previous: &CalendarState) {
        let selection = &self.store.state().selection;
        if !selection.modal_open {
            self.event_dialog_state = None;
            return;
        }

        let before = &previous.selection;
        let retargeted = !before.modal_open
            || before.editing_event != selection.editing_event
            || before.clicked_time_slot != selection.clicked_time_slot;

        if retargeted || self.event_dialog_state.is_none() {
            let now = Local::now().time();
            self.event_dialog_state = Some(EventDialogState::from_selection(
                selection,
                now,
                self.settings.slot_minutes,
            ));
        }
    }
}
