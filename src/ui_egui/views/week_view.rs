//! Week grid: hour rows, day columns, event blocks and the drop targets.
//!
//! The view owns no calendar state. It reads a store snapshot, feeds pointer
//! input into the [`InteractionEngine`] and returns the commands produced
//! this frame for the app to dispatch.

use chrono::{Local, NaiveDate, NaiveDateTime};
use egui::{pos2, vec2, Align2, CursorIcon, FontId, Id, Rect, Rounding, Sense, Stroke};

use super::palette::{with_alpha, TimeGridPalette};
use super::{initial_scroll_offset, GridLayout, TaskPayload};
use crate::models::event::CalendarEvent;
use crate::models::settings::Settings;
use crate::services::store::{CalendarState, Command};
use crate::ui_egui::gesture::{EguiPointerCapture, GestureOutcome, InteractionEngine, Preview};
use crate::ui_egui::resize::HANDLE_SIZE;
use crate::utils::date::{format_hour_label, format_time};
use crate::utils::geometry::{event_position, events_on_day, GridMetrics, HOURS_PER_DAY};

/// Blocks at least this tall also show their time range.
const TIME_RANGE_MIN_HEIGHT: f32 = 30.0;
const DRAG_ALPHA: u8 = 150;
const GHOST_ALPHA: u8 = 60;

/// Interactive rect of one rendered block.
struct BlockHit<'a> {
    event: &'a CalendarEvent,
    day_index: usize,
    rect: Rect,
}

pub struct WeekView;

impl WeekView {
    pub fn show(
        ui: &mut egui::Ui,
        state: &CalendarState,
        days: &[NaiveDate; 7],
        engine: &mut InteractionEngine,
        settings: &Settings,
        scroll_to_now: &mut bool,
    ) -> Vec<Command> {
        let metrics = *engine.metrics();
        let now = Local::now().naive_local();
        let mut commands = Vec::new();

        let mut scroll = egui::ScrollArea::vertical()
            .id_source("week_grid")
            .auto_shrink([false, false]);
        if *scroll_to_now {
            scroll = scroll.vertical_scroll_offset(initial_scroll_offset(now.time(), &metrics));
            *scroll_to_now = false;
        }

        scroll.show(ui, |ui| {
            let palette = TimeGridPalette::from_visuals(ui.visuals());
            let (rect, _) = ui.allocate_exact_size(
                vec2(ui.available_width(), metrics.grid_height()),
                Sense::hover(),
            );
            let layout = GridLayout::new(rect);

            paint_background(ui, &layout, days, now.date(), &metrics, &palette, settings.uses_24h_clock());

            let capturing = EguiPointerCapture::is_capturing(ui.ctx());
            for (index, day) in days.iter().enumerate() {
                column_targets(ui, &layout, index, *day, &metrics, &palette, capturing, &mut commands);
            }

            let mut hits = Vec::new();
            for (index, day) in days.iter().enumerate() {
                for event in events_on_day(&state.events, *day) {
                    let position = event_position(event, &metrics);
                    let rect = layout.block_rect(index, position.top, position.display_height(&metrics));
                    block_interactions(ui, event, rect, &layout, engine, &mut commands);
                    hits.push(BlockHit {
                        event,
                        day_index: index,
                        rect,
                    });
                }
            }

            if engine.is_active() {
                drive_gesture(ui, engine, &mut commands);
            }

            let preview = engine.preview();
            paint_blocks(ui, &hits, preview.as_ref(), &palette, settings.uses_24h_clock());

            if let Some(day_index) = days.iter().position(|day| *day == now.date()) {
                paint_now_indicator(ui, &layout, day_index, now, &metrics, &palette);
            }
        });

        commands
    }
}

fn paint_background(
    ui: &egui::Ui,
    layout: &GridLayout,
    days: &[NaiveDate; 7],
    today: NaiveDate,
    metrics: &GridMetrics,
    palette: &TimeGridPalette,
    use_24h: bool,
) {
    let painter = ui.painter();
    painter.rect_filled(layout.label_rect(), Rounding::ZERO, palette.label_bg);

    for (index, day) in days.iter().enumerate() {
        let fill = if *day == today {
            palette.today_bg
        } else {
            palette.column_bg
        };
        painter.rect_filled(layout.column_rect(index), Rounding::ZERO, fill);
    }

    let left = layout.column_left(0);
    let right = layout.column_left(6) + layout.col_width;
    for hour in 0..HOURS_PER_DAY {
        let y = layout.origin.y + hour as f32 * metrics.row_height;
        painter.hline(left..=right, y, Stroke::new(1.0, palette.hour_line));

        for slot in 1..metrics.slots_per_hour() {
            let slot_y = y + slot as f32 * metrics.slot_height();
            painter.hline(left..=right, slot_y, Stroke::new(0.5, palette.slot_line));
        }

        painter.text(
            pos2(layout.origin.x + super::TIME_LABEL_WIDTH - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format_hour_label(hour, use_24h),
            FontId::proportional(11.0),
            palette.label_text,
        );
    }
}

/// Empty-slot clicks and task drops on one day column.
#[allow(clippy::too_many_arguments)]
fn column_targets(
    ui: &mut egui::Ui,
    layout: &GridLayout,
    index: usize,
    day: NaiveDate,
    metrics: &GridMetrics,
    palette: &TimeGridPalette,
    capturing: bool,
    commands: &mut Vec<Command>,
) {
    let column = layout.column_rect(index);
    let response = ui.interact(column, Id::new(("day_column", day)), Sense::click());
    let pointer = ui.input(|i| i.pointer.hover_pos());

    if let Some(pos) = pointer.filter(|pos| column.contains(*pos)) {
        let slot = layout.slot_at(pos, day, metrics);
        let slot_rect = layout.slot_rect(index, &slot, metrics);
        if response.dnd_hover_payload::<TaskPayload>().is_some() {
            ui.painter().rect_filled(slot_rect, Rounding::same(3.0), palette.drop_overlay);
        } else if response.hovered() && !capturing {
            ui.painter().rect_filled(slot_rect, Rounding::same(3.0), palette.hover_overlay);
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            commands.push(Command::OpenModal(Some(layout.slot_at(pos, day, metrics))));
        }
    }

    if let Some(payload) = response.dnd_release_payload::<TaskPayload>() {
        if let Some(pos) = pointer.or_else(|| ui.input(|i| i.pointer.interact_pos())) {
            let slot = layout.slot_at(pos, day, metrics);
            log::debug!("Task {} dropped on {} {:02}:{:02}", payload.task_id, day, slot.hour, slot.minute);
            commands.push(Command::CreateEventFromTask {
                task_id: payload.task_id.clone(),
                slot,
            });
        }
    }
}

/// Starts gestures and opens the editor on click.
fn block_interactions(
    ui: &mut egui::Ui,
    event: &CalendarEvent,
    rect: Rect,
    layout: &GridLayout,
    engine: &mut InteractionEngine,
    commands: &mut Vec<Command>,
) {
    let id = Id::new(("event_block", &event.id));
    let body = ui.interact(rect, id, Sense::click_and_drag());
    let handle_rect = Rect::from_min_max(pos2(rect.left(), rect.bottom() - HANDLE_SIZE), rect.max);
    let handle = ui.interact(handle_rect, id.with("resize"), Sense::drag());

    let press_origin = || ui.input(|i| i.pointer.press_origin());

    if handle.drag_started() {
        if let Some(pos) = press_origin().or_else(|| handle.interact_pointer_pos()) {
            engine.begin_resize(event, pos, rect.height());
        }
    } else if body.drag_started() {
        if let Some(pos) = press_origin().or_else(|| body.interact_pointer_pos()) {
            engine.begin_move(event, pos, layout.column_pitch());
        }
    } else if body.clicked() {
        commands.extend(engine.click(event));
    }

    if handle.hovered() || handle.dragged() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
    } else if body.dragged() {
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    } else if body.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }
}

/// Routes pointer motion and release into the active gesture.
fn drive_gesture(ui: &egui::Ui, engine: &mut InteractionEngine, commands: &mut Vec<Command>) {
    let (latest, release_pos, released, any_down) = ui.input(|i| {
        let pointer = &i.pointer;
        let release_pos = pointer
            .latest_pos()
            .or_else(|| pointer.interact_pos())
            .or_else(|| pointer.press_origin());
        (pointer.latest_pos(), release_pos, pointer.any_released(), pointer.any_down())
    });

    if let Some(pos) = latest {
        engine.pointer_moved(pos);
    }
    ui.ctx().request_repaint();

    // Still held. A button that is up with no release event ends the gesture below.
    if !released && any_down {
        return;
    }

    let outcome = match release_pos {
        Some(pos) if released => engine.pointer_released(pos),
        _ => engine.pointer_lost(),
    };
    match outcome {
        GestureOutcome::Committed(command) => commands.push(command),
        GestureOutcome::Rejected {
            event_id,
            revert_height,
        } => {
            log::debug!("Reverted {} to {:.1}px", event_id, revert_height);
        }
        GestureOutcome::Unchanged { .. } | GestureOutcome::Idle => {}
    }
}

fn paint_blocks(
    ui: &egui::Ui,
    hits: &[BlockHit<'_>],
    preview: Option<&Preview>,
    palette: &TimeGridPalette,
    use_24h: bool,
) {
    let mut detached = None;

    for hit in hits {
        let color = hit.event.display_color().to_color32();
        match preview.filter(|p| p.event_id() == hit.event.id) {
            Some(Preview::Detached { offset, .. }) => {
                paint_block(ui, hit.event, hit.rect, with_alpha(color, GHOST_ALPHA), palette, use_24h);
                detached = Some((hit, hit.rect.translate(*offset)));
            }
            Some(Preview::Height { height, .. }) => {
                let rect = Rect::from_min_size(hit.rect.min, vec2(hit.rect.width(), *height));
                paint_block(ui, hit.event, rect, color, palette, use_24h);
            }
            None => paint_block(ui, hit.event, hit.rect, color, palette, use_24h),
        }
    }

    // Drawn last so it floats above the other blocks
    if let Some((hit, rect)) = detached {
        let color = with_alpha(hit.event.display_color().to_color32(), DRAG_ALPHA);
        paint_block(ui, hit.event, rect, color, palette, use_24h);
        log::trace!("Dragging {} over column {}", hit.event.id, hit.day_index);
    }
}

fn paint_block(
    ui: &egui::Ui,
    event: &CalendarEvent,
    rect: Rect,
    fill: egui::Color32,
    palette: &TimeGridPalette,
    use_24h: bool,
) {
    let painter = ui.painter().with_clip_rect(rect.intersect(ui.clip_rect()));
    painter.rect_filled(rect, Rounding::same(4.0), fill);

    let text_pos = rect.min + vec2(6.0, 3.0);
    painter.text(
        text_pos,
        Align2::LEFT_TOP,
        &event.title,
        FontId::proportional(12.0),
        palette.block_text,
    );

    if rect.height() > TIME_RANGE_MIN_HEIGHT {
        painter.text(
            text_pos + vec2(0.0, 15.0),
            Align2::LEFT_TOP,
            time_range_label(event.start, event.end, use_24h),
            FontId::proportional(10.0),
            with_alpha(palette.block_text, 210),
        );
    }

    // Grip for the resize handle
    let grip_y = rect.bottom() - HANDLE_SIZE / 2.0;
    let grip = rect.center().x;
    painter.hline(
        (grip - 8.0)..=(grip + 8.0),
        grip_y,
        Stroke::new(1.5, with_alpha(palette.block_text, 120)),
    );
}

fn paint_now_indicator(
    ui: &egui::Ui,
    layout: &GridLayout,
    day_index: usize,
    now: NaiveDateTime,
    metrics: &GridMetrics,
    palette: &TimeGridPalette,
) {
    let column = layout.column_rect(day_index);
    let y = layout.origin.y + metrics.offset_for_time(now.time());
    let painter = ui.painter();

    painter.circle_filled(pos2(column.left(), y), 4.0, palette.now_line);
    painter.line_segment(
        [pos2(column.left(), y), pos2(column.right(), y)],
        Stroke::new(2.0, palette.now_line),
    );
}

/// "9:00 AM - 10:30 AM"
pub fn time_range_label(start: NaiveDateTime, end: NaiveDateTime, use_24h: bool) -> String {
    format!(
        "{} - {}",
        format_time(start.time(), use_24h),
        format_time(end.time(), use_24h)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_time_range_label() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let start = day.and_hms_opt(9, 0, 0).unwrap();
        let end = day.and_hms_opt(13, 30, 0).unwrap();
        assert_eq!(time_range_label(start, end, false), "9:00 AM - 1:30 PM");
        assert_eq!(time_range_label(start, end, true), "09:00 - 13:30");
    }
}
