use chrono::{Duration, Local, NaiveDate};
use egui::{pos2, vec2, Align2, FontId, Rect, Rounding, Sense, Stroke};

use super::palette::HeaderPalette;
use super::GridLayout;
use crate::models::settings::Settings;
use crate::models::ui::TimeSlot;
use crate::services::store::{CalendarState, Command};
use crate::utils::date::{floor_to_slot, format_month_year};

const DAY_ROW_HEIGHT: f32 = 44.0;

/// Navigation bar and day header row above the week grid.
pub struct WeekHeader;

impl WeekHeader {
    pub fn show(
        ui: &mut egui::Ui,
        state: &CalendarState,
        days: &[NaiveDate; 7],
        settings: &Settings,
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        let selected = state.selection.selected_date;
        let now = Local::now().naive_local();

        ui.horizontal(|ui| {
            if ui.button("Today").clicked() {
                commands.push(Command::SetSelectedDate(now.date()));
            }
            if ui.button("◀").on_hover_text("Previous week").clicked() {
                commands.push(Command::SetSelectedDate(selected - Duration::days(7)));
            }
            if ui.button("▶").on_hover_text("Next week").clicked() {
                commands.push(Command::SetSelectedDate(selected + Duration::days(7)));
            }
            ui.add_space(8.0);
            ui.heading(format_month_year(days[0]));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Create Event").clicked() {
                    let (hour, minute) = floor_to_slot(now.time(), settings.slot_minutes);
                    commands.push(Command::OpenModal(Some(TimeSlot::new(selected, hour, minute))));
                }
            });
        });

        ui.add_space(6.0);
        Self::day_row(ui, days, now.date());
        ui.add_space(4.0);

        commands
    }

    fn day_row(ui: &mut egui::Ui, days: &[NaiveDate; 7], today: NaiveDate) {
        let palette = HeaderPalette::from_visuals(ui.visuals());
        let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), DAY_ROW_HEIGHT), Sense::hover());
        let layout = GridLayout::new(rect);
        let painter = ui.painter();

        for (index, date) in days.iter().enumerate() {
            let is_today = *date == today;
            let cell = Rect::from_min_size(
                pos2(layout.column_left(index), rect.top()),
                vec2(layout.col_width, DAY_ROW_HEIGHT),
            );
            let (fill, border) = if is_today {
                (palette.today_bg, palette.today_border)
            } else {
                (palette.cell_bg, palette.border)
            };
            painter.rect(cell, Rounding::same(6.0), fill, Stroke::new(1.0, border));

            painter.text(
                pos2(cell.center().x, cell.top() + 13.0),
                Align2::CENTER_CENTER,
                date.format("%a").to_string(),
                FontId::proportional(12.0),
                palette.muted_text,
            );
            painter.text(
                pos2(cell.center().x, cell.bottom() - 14.0),
                Align2::CENTER_CENTER,
                date.format("%-d").to_string(),
                FontId::proportional(if is_today { 17.0 } else { 15.0 }),
                palette.text,
            );
        }
    }
}
