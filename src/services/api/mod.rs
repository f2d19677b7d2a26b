//! REST data access for events, goals and tasks.
//!
//! Entities travel as JSON in the same shape as the models. Create requests
//! omit the `id` field and the server answers with the stored entity.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::thread;
use std::time::Duration;

use crate::models::event::CalendarEvent;
use crate::models::goal::{Goal, Task};
use crate::models::settings::Settings;

#[cfg_attr(test, mockall::automock)]
pub trait CalendarApi {
    fn fetch_events(&self) -> Result<Vec<CalendarEvent>>;
    fn fetch_events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarEvent>>;
    fn create_event(&self, event: &CalendarEvent) -> Result<CalendarEvent>;
    fn update_event(&self, event: &CalendarEvent) -> Result<CalendarEvent>;
    fn delete_event(&self, id: &str) -> Result<()>;

    fn fetch_goals(&self) -> Result<Vec<Goal>>;
    fn create_goal(&self, goal: &Goal) -> Result<Goal>;
    fn update_goal(&self, goal: &Goal) -> Result<Goal>;
    fn delete_goal(&self, id: &str) -> Result<()>;

    fn fetch_tasks(&self) -> Result<Vec<Task>>;
    fn fetch_tasks_by_goal(&self, goal_id: &str) -> Result<Vec<Task>>;
    fn create_task(&self, task: &Task) -> Result<Task>;
    fn update_task(&self, task: &Task) -> Result<Task>;
    fn delete_task(&self, id: &str) -> Result<()>;
}

pub struct HttpCalendarApi {
    client: Client,
    base_url: String,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpCalendarApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build calendar API HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 2,
            retry_delay_ms: 400,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.api_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs are idempotent, so transient failures are retried.
    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.max_retries {
            match self.send(self.client.get(&url).query(query)) {
                Ok(body) => return Ok(body),
                Err(err) => {
                    if attempt == self.max_retries {
                        last_error = Some(err.context(format!(
                            "GET {} failed after {} attempts",
                            url,
                            attempt + 1
                        )));
                    } else {
                        log::warn!("GET {} attempt {} failed: {}", url, attempt + 1, err);
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown error fetching {}", url)))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let payload = without_id(body)?;
        self.send(self.client.post(&url).json(&payload))
            .with_context(|| format!("POST {} failed", url))
    }

    fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        self.send(self.client.put(&url).json(body))
            .with_context(|| format!("PUT {} failed", url))
    }

    fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.client
            .delete(&url)
            .send()
            .context("Network error during DELETE")?
            .error_for_status()
            .with_context(|| format!("DELETE {} failed", url))?;
        Ok(())
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .context("Network error during calendar API request")?
            .error_for_status()
            .context("Calendar API returned an error status")?;

        response
            .json::<T>()
            .context("Calendar API response did not match the expected shape")
    }
}

/// JSON body for create requests: the entity minus its `id`.
fn without_id<T: Serialize>(entity: &T) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(entity).context("Failed to encode request body")?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(value)
}

impl CalendarApi for HttpCalendarApi {
    fn fetch_events(&self) -> Result<Vec<CalendarEvent>> {
        self.get("/events", &[])
    }

    fn fetch_events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarEvent>> {
        self.get(
            "/events/range",
            &[
                ("startDate", start.format("%Y-%m-%d").to_string()),
                ("endDate", end.format("%Y-%m-%d").to_string()),
            ],
        )
    }

    fn create_event(&self, event: &CalendarEvent) -> Result<CalendarEvent> {
        self.post("/events", event)
    }

    fn update_event(&self, event: &CalendarEvent) -> Result<CalendarEvent> {
        self.put(&format!("/events/{}", event.id), event)
    }

    fn delete_event(&self, id: &str) -> Result<()> {
        self.delete(&format!("/events/{}", id))
    }

    fn fetch_goals(&self) -> Result<Vec<Goal>> {
        self.get("/goals", &[])
    }

    fn create_goal(&self, goal: &Goal) -> Result<Goal> {
        self.post("/goals", goal)
    }

    fn update_goal(&self, goal: &Goal) -> Result<Goal> {
        self.put(&format!("/goals/{}", goal.id), goal)
    }

    fn delete_goal(&self, id: &str) -> Result<()> {
        self.delete(&format!("/goals/{}", id))
    }

    fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.get("/tasks", &[])
    }

    fn fetch_tasks_by_goal(&self, goal_id: &str) -> Result<Vec<Task>> {
        self.get(&format!("/tasks/goal/{}", goal_id), &[])
    }

    fn create_task(&self, task: &Task) -> Result<Task> {
        self.post("/tasks", task)
    }

    fn update_task(&self, task: &Task) -> Result<Task> {
        self.put(&format!("/tasks/{}", task.id), task)
    }

    fn delete_task(&self, id: &str) -> Result<()> {
        self.delete(&format!("/tasks/{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Rgb;

    #[test]
    fn test_url_joining() {
        let api = HttpCalendarApi::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/events"), "http://localhost:5000/api/events");
        assert_eq!(api.url("tasks/goal/g1"), "http://localhost:5000/api/tasks/goal/g1");
    }

    #[test]
    fn test_create_body_omits_id() {
        let task = Task::new("t1", "MLE", "g1", Rgb::new(0x9b, 0x87, 0xf5));
        let body = without_id(&task).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "MLE", "goalId": "g1", "color": "#9b87f5"})
        );
    }
}
