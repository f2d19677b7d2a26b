//! Goals and the tasks tagged with them.
//!
//! Tasks are templates: dropping one on the grid drafts an event from it.
//! The calendar core never mutates either.

use serde::{Deserialize, Serialize};

use crate::models::color::Rgb;

pub type GoalId = String;
pub type TaskId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub color: Rgb,
}

impl Goal {
    pub fn new(id: impl Into<GoalId>, title: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub goal_id: GoalId,
    pub color: Rgb,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        goal_id: impl Into<GoalId>,
        color: Rgb,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            goal_id: goal_id.into(),
            color,
        }
    }
}

/// Tasks belonging to `goal_id`, in catalog order.
pub fn tasks_for_goal<'a>(tasks: &'a [Task], goal_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.goal_id == goal_id).collect()
}

const LEARN: Rgb = Rgb::new(0x9b, 0x87, 0xf5);
const HEALTH: Rgb = Rgb::new(0x65, 0xc4, 0x66);
const PERSONAL: Rgb = Rgb::new(0xf9, 0x73, 0x16);

/// Goals that ship with the application.
pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal::new("g1", "Learn", LEARN),
        Goal::new("g2", "Health", HEALTH),
        Goal::new("g3", "Personal", PERSONAL),
    ]
}

/// Tasks that ship with the application, tagged with [`default_goals`].
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new("t1", "AI based agents", "g1", LEARN),
        Task::new("t2", "MLE", "g1", LEARN),
        Task::new("t3", "DE related", "g1", LEARN),
        Task::new("t4", "Basics", "g1", LEARN),
        Task::new("t5", "Gym workout", "g2", HEALTH),
        Task::new("t6", "Meditation", "g2", HEALTH),
        Task::new("t7", "Reading", "g3", PERSONAL),
        Task::new("t8", "Family time", "g3", PERSONAL),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_for_goal_preserves_order() {
        let tasks = default_tasks();
        let ids: Vec<&str> = tasks_for_goal(&tasks, "g1").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_tasks_for_unknown_goal() {
        assert!(tasks_for_goal(&default_tasks(), "g9").is_empty());
    }

    #[test]
    fn test_default_tasks_reference_default_goals() {
        let goals = default_goals();
        for task in default_tasks() {
            let goal = goals.iter().find(|g| g.id == task.goal_id).unwrap();
            assert_eq!(goal.color, task.color);
        }
    }

    #[test]
    fn test_task_json_uses_goal_id_key() {
        let task: Task = serde_json::from_str(
            r##"{"id":"t5","title":"Gym workout","goalId":"g2","color":"#65C466"}"##,
        )
        .unwrap();
        assert_eq!(task.goal_id, "g2");
        assert_eq!(task.color, HEALTH);
    }
}
