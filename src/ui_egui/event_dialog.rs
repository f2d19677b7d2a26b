use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use egui::{Color32, RichText};

use crate::models::color::Rgb;
use crate::models::event::{CalendarEvent, EventCategory, EventId, EventValidationError};
use crate::models::ui::{TimeSlot, UiSelection};
use crate::services::store::Command;
use crate::utils::date::floor_to_slot;
use crate::utils::id::generate_unique_id;

/// Form state for creating or editing one event.
pub struct EventDialogState {
    /// Empty for new events and task drafts
    pub event_id: EventId,
    pub title: String,
    pub category: EventCategory,
    pub color: Rgb,
    /// The edited event had its own color, so category changes keep it
    pub carries_color: bool,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Days between `date` and the end, for events running past midnight
    pub end_day_offset: u64,
    pub error_message: Option<String>,
}

impl EventDialogState {
    /// One-hour `work` event starting at the slot.
    pub fn from_slot(slot: TimeSlot) -> Self {
        let start = slot.start();
        let end = start + Duration::hours(1);
        let category = EventCategory::default();
        Self {
            event_id: EventId::new(),
            title: String::new(),
            category,
            color: category.default_color(),
            carries_color: false,
            date: slot.day,
            start_time: start.time(),
            end_time: end.time(),
            end_day_offset: days_between(slot.day, end.date()),
            error_message: None,
        }
    }

    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            category: event.category,
            color: event.display_color(),
            carries_color: event.color.is_some(),
            date: event.start.date(),
            start_time: event.start.time(),
            end_time: event.end.time(),
            end_day_offset: days_between(event.start.date(), event.end.date()),
            error_message: None,
        }
    }

    /// Form for whatever the selection opened the modal on.
    ///
    /// Without an event or slot the form starts on the selected date at `now`
    /// floored to the slot size.
    pub fn from_selection(selection: &UiSelection, now: NaiveTime, slot_minutes: u32) -> Self {
        match (&selection.editing_event, selection.clicked_time_slot) {
            (Some(event), _) => Self::from_event(event),
            (None, Some(slot)) => Self::from_slot(slot),
            (None, None) => {
                let (hour, minute) = floor_to_slot(now, slot_minutes);
                Self::from_slot(TimeSlot::new(selection.selected_date, hour, minute))
            }
        }
    }

    pub fn is_new(&self) -> bool {
        self.event_id.is_empty()
    }

    pub fn set_category(&mut self, category: EventCategory) {
        self.category = category;
        if !self.carries_color {
            self.color = category.default_color();
        }
    }

    /// Start and end the form describes, checked for `end > start`.
    fn span(&self) -> Result<(NaiveDateTime, NaiveDateTime), EventValidationError> {
        let start = self.date.and_time(self.start_time);
        let end = self
            .date
            .checked_add_days(Days::new(self.end_day_offset))
            .map(|day| day.and_time(self.end_time))
            .ok_or(EventValidationError::EndNotAfterStart)?;
        if end <= start {
            return Err(EventValidationError::EndNotAfterStart);
        }
        Ok((start, end))
    }

    /// The event the form describes; new events get a fresh id.
    pub fn to_event(&self) -> Result<CalendarEvent, EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        let (start, end) = self.span()?;

        let id = if self.is_new() {
            generate_unique_id()
        } else {
            self.event_id.clone()
        };

        CalendarEvent::builder()
            .id(id)
            .title(self.title.trim())
            .category(self.category)
            .start(start)
            .end(end)
            .color(self.color)
            .build()
    }

    /// Commands for pressing Save. On a validation error the message is kept
    /// in the form and nothing is returned.
    pub fn submit(&mut self) -> Vec<Command> {
        match self.to_event() {
            Ok(event) => {
                self.error_message = None;
                let command = if self.is_new() {
                    Command::AddEvent(event)
                } else {
                    Command::UpdateEvent(event)
                };
                vec![command, Command::CloseModal]
            }
            Err(err) => {
                log::debug!("Event form rejected: {}", err);
                self.error_message = Some(err.to_string());
                Vec::new()
            }
        }
    }

    /// Commands for pressing Delete; drafts have nothing to delete.
    pub fn delete(&self) -> Vec<Command> {
        if self.is_new() {
            return Vec::new();
        }
        vec![Command::DeleteEvent(self.event_id.clone()), Command::CloseModal]
    }
}

pub fn render_event_dialog(ctx: &egui::Context, state: &mut EventDialogState) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut open = true;

    egui::Window::new(if state.is_new() { "Create Event" } else { "Edit Event" })
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref error) = state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(8.0);
            }

            egui::Grid::new("event_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut state.title);
                    ui.end_row();

                    ui.label("Category:");
                    let mut category = state.category;
                    egui::ComboBox::from_id_source("event_category")
                        .selected_text(category.label())
                        .show_ui(ui, |ui| {
                            for option in EventCategory::ALL {
                                ui.selectable_value(&mut category, option, option.label());
                            }
                        });
                    if category != state.category {
                        state.set_category(category);
                    }
                    ui.end_row();

                    ui.label("Color:");
                    let mut rgb = [state.color.r, state.color.g, state.color.b];
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        state.color = Rgb::new(rgb[0], rgb[1], rgb[2]);
                    }
                    ui.end_row();

                    ui.label("Date:");
                    ui.add(egui_extras::DatePickerButton::new(&mut state.date).id_source("event_date"));
                    ui.end_row();

                    ui.label("Start:");
                    render_time_picker(ui, "start", &mut state.start_time);
                    ui.end_row();

                    ui.label("End:");
                    ui.horizontal(|ui| {
                        render_time_picker(ui, "end", &mut state.end_time);
                        if state.end_day_offset > 1 {
                            ui.label(format!("+{} days", state.end_day_offset));
                        } else {
                            let mut next_day = state.end_day_offset == 1;
                            if ui.checkbox(&mut next_day, "next day").changed() {
                                state.end_day_offset = u64::from(next_day);
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(12.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    commands.extend(state.submit());
                }
                if ui.button("Cancel").clicked() {
                    commands.push(Command::CloseModal);
                }
                if !state.is_new() {
                    ui.add_space(20.0);
                    if ui.button(RichText::new("Delete").color(Color32::RED)).clicked() {
                        commands.extend(state.delete());
                    }
                }
            });
        });

    if !open {
        commands.push(Command::CloseModal);
    }
    commands
}

fn days_between(from: NaiveDate, to: NaiveDate) -> u64 {
    u64::try_from((to - from).num_days()).unwrap_or(0)
}

/// Hour and minute dropdowns.
fn render_time_picker(ui: &mut egui::Ui, id: &str, time: &mut NaiveTime) {
    let mut hour = time.hour();
    let mut minute = time.minute();

    ui.horizontal(|ui| {
        egui::ComboBox::from_id_source(format!("{}_hour", id))
            .width(50.0)
            .selected_text(format!("{:02}", hour))
            .show_ui(ui, |ui| {
                for h in 0..24 {
                    ui.selectable_value(&mut hour, h, format!("{:02}", h));
                }
            });

        ui.label(":");

        egui::ComboBox::from_id_source(format!("{}_minute", id))
            .width(50.0)
            .selected_text(format!("{:02}", minute))
            .show_ui(ui, |ui| {
                for m in (0..60).step_by(5) {
                    ui.selectable_value(&mut minute, m, format!("{:02}", m));
                }
            });
    });

    if let Some(new_time) = NaiveTime::from_hms_opt(hour, minute, 0) {
        *time = new_time;
    }
}
