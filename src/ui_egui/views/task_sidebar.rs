use egui::{Id, Margin, RichText, Rounding, Stroke};

use super::palette::SidebarPalette;
use super::TaskPayload;
use crate::models::goal::Task;
use crate::services::store::{CalendarState, Command};

/// Goal picker and the draggable tasks of the selected goal.
pub struct TaskSidebar;

impl TaskSidebar {
    pub fn show(ui: &mut egui::Ui, state: &CalendarState) -> Vec<Command> {
        let mut commands = Vec::new();
        let palette = SidebarPalette::from_visuals(ui.visuals());
        let selected_goal = state.selection.selected_goal.as_deref();

        ui.heading("Goals");
        ui.add_space(4.0);

        if state.goals.is_empty() {
            ui.label(RichText::new("No goals").italics());
        }

        for goal in &state.goals {
            let is_selected = selected_goal == Some(goal.id.as_str());
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(goal.color.to_color32()));
                let label = ui.selectable_label(is_selected, &goal.title);
                if label.clicked() && !is_selected {
                    commands.push(Command::SelectGoal(goal.id.clone()));
                }
            });
        }

        ui.add_space(12.0);
        ui.separator();
        ui.heading("Tasks");
        ui.add_space(4.0);

        if selected_goal.is_none() {
            ui.label(RichText::new("Select a goal to see its tasks").italics());
            return commands;
        }

        let tasks = state.filtered_tasks();
        if tasks.is_empty() {
            ui.label(RichText::new("No tasks for this goal").italics());
        }
        for task in tasks {
            Self::task_card(ui, task, &palette);
            ui.add_space(4.0);
        }

        commands
    }

    /// A drag source whose payload is the task id.
    fn task_card(ui: &mut egui::Ui, task: &Task, palette: &SidebarPalette) {
        let payload = TaskPayload {
            task_id: task.id.clone(),
        };
        let response = ui
            .dnd_drag_source(Id::new(("task_card", &task.id)), payload, |ui| {
                egui::Frame::none()
                    .fill(palette.task_bg)
                    .rounding(Rounding::same(6.0))
                    .stroke(Stroke::new(2.0, task.color.to_color32()))
                    .inner_margin(Margin::symmetric(8.0, 6.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(&task.title).color(palette.text));
                    });
            })
            .response;

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }
}
