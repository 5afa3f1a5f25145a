use chrono::{DateTime, Utc};

use std::sync::Arc;

use crate::data::SharedClock;
use crate::identity::data::{Session, SessionView, UserDirectory};
use crate::identity::helpers::require_field;
use crate::internal_error::{InternalResult, Rejection};
use crate::notify::data::{Notifier, Sound};
use crate::store::data::TaskRepository;

use super::data::*;
use super::helpers::*;

/// Owns the user directory, the session and the active user's tasks.
///
/// Every task mutation builds the new collection, persists it and only then
/// replaces the in-memory copy, so a failed save leaves state untouched.
pub struct TaskManager {
    users: UserDirectory,
    session: Session,
    tasks: Vec<Task>,
    editing: Option<TaskID>,
    repository: Box<dyn TaskRepository>,
    clock: SharedClock,
    notifier: Arc<dyn Notifier>,
}

impl TaskManager {
    pub fn new(
        repository: impl TaskRepository + 'static,
        clock: SharedClock,
        notifier: Arc<dyn Notifier>,
    ) -> TaskManager {
        TaskManager {
            users: UserDirectory::default(),
            session: Session::default(),
            tasks: vec![],
            editing: None,
            repository: Box::new(repository),
            clock,
            notifier,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn active_user(&self) -> Result<String, Rejection> {
        self.session.user().map(str::to_string)
    }

    fn surface(&self, rejection: Rejection) -> Rejection {
        // empty form fields are dropped silently
        if !matches!(rejection, Rejection::MissingField(_)) {
            self.notifier.announce(rejection.to_string());
        }
        rejection
    }

    fn open_session(&mut self, username: &str, message: &str) -> SessionView {
        self.session.start(username);
        self.tasks = self.repository.load(username);
        self.editing = None;

        tracing::info!(user = username, tasks = self.tasks.len(), "session started");
        self.notifier.announce(message.to_string());

        self.session_view(Some(message))
    }

    pub fn session_view(&self, message: Option<&str>) -> SessionView {
        SessionView {
            user: self.current_user().map(str::to_string),
            editing: self.editing(),
            message: message.map(str::to_string),
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.user.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn editing(&self) -> Option<TaskID> {
        self.editing
    }

    pub fn register(&mut self, username: &str, password: &str) -> InternalResult<SessionView> {
        self.users
            .register(username, password)
            .map_err(|r| self.surface(r))?;

        Ok(self.open_session(username, "Registered successfully"))
    }

    pub fn login(&mut self, username: &str, password: &str) -> InternalResult<SessionView> {
        if let Err(rejection) = self.users.authenticate(username, password) {
            tracing::debug!(user = username, "login refused");
            return Err(self.surface(rejection).into());
        }

        Ok(self.open_session(username, "Logged in"))
    }

    /// Persisted tasks are left in place.
    pub fn logout(&mut self) -> SessionView {
        if let Some(user) = self.session.user.as_deref() {
            tracing::info!(user, "session ended");
        }

        self.session.end();
        self.tasks.clear();
        self.editing = None;

        self.session_view(None)
    }

    fn commit(&mut self, username: &str, tasks: Vec<Task>) -> InternalResult<()> {
        self.repository.save(username, &tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    pub fn add_or_update_task(
        &mut self,
        text: &str,
        deadline: &str,
        editing_id: Option<TaskID>,
    ) -> InternalResult<Task> {
        let user = self.active_user()?;
        require_field(text, "task text")?;
        require_field(deadline, "deadline")?;
        let deadline = parse_deadline(deadline).map_err(|r| self.surface(r))?;

        let editing_id = editing_id.or(self.editing);
        let mut updated = self.tasks.clone();
        let existing = editing_id.and_then(|id| updated.iter().position(|t| t.id == id));

        let (task, message) = match existing {
            Some(index) => {
                let task = &mut updated[index];
                task.text = text.to_string();
                task.deadline = deadline;
                task.notified = false;

                (task.clone(), "Task updated")
            }
            None => {
                let now = self.now();
                let task = Task {
                    id: next_task_id(&updated, now),
                    text: text.to_string(),
                    deadline,
                    created_at: now,
                    done: false,
                    favorite: false,
                    notified: false,
                };
                updated.push(task.clone());

                (task, "Task added")
            }
        };

        self.commit(&user, updated)?;
        self.editing = None;

        tracing::debug!(user = %user, task_id = task.id, message, "task saved");
        self.notifier.play(Sound::TaskSaved);
        self.notifier.announce(message.to_string());

        Ok(task)
    }

    pub fn delete_task(&mut self, id: TaskID) -> InternalResult<bool> {
        let user = self.active_user()?;

        if !self.tasks.iter().any(|t| t.id == id) {
            return Ok(false);
        }

        let updated: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.commit(&user, updated)?;

        if self.editing == Some(id) {
            self.editing = None;
        }

        self.notifier.announce("Task deleted".to_string());

        Ok(true)
    }

    fn modify_task(&mut self, id: TaskID, change: impl FnOnce(&mut Task)) -> InternalResult<Option<Task>> {
        let user = self.active_user()?;

        let mut updated = self.tasks.clone();
        let task = match updated.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                change(task);
                task.clone()
            }
            None => return Ok(None),
        };

        self.commit(&user, updated)?;

        Ok(Some(task))
    }

    pub fn toggle_complete(&mut self, id: TaskID) -> InternalResult<Option<Task>> {
        self.modify_task(id, |task| task.done = !task.done)
    }

    pub fn toggle_favorite(&mut self, id: TaskID) -> InternalResult<Option<Task>> {
        self.modify_task(id, |task| task.favorite = !task.favorite)
    }

    /// Not a mutation: remembers which task the form is editing.
    pub fn edit_request(&mut self, id: TaskID) -> InternalResult<Option<TaskForm>> {
        self.active_user()?;

        let form = self.tasks.iter().find(|t| t.id == id).map(|t| TaskForm {
            id: t.id,
            text: t.text.clone(),
            deadline: t.deadline,
        });

        if form.is_some() {
            self.editing = Some(id);
        }

        Ok(form)
    }

    pub fn filtered_tasks(&self, filter: Filter) -> Vec<Task> {
        filter_tasks(self.tasks(), filter)
    }

    pub fn task_views(&self, filter: Filter) -> Vec<TaskView> {
        let now = self.now();

        self.filtered_tasks(filter)
            .iter()
            .map(|t| task_view(t, now))
            .collect()
    }

    pub fn daily_summary(&self) -> DailySummary {
        daily_summary(self.tasks())
    }

    /// One pass of the deadline monitor. Returns how many reminders fired.
    pub fn check_deadlines(&mut self) -> usize {
        let now = self.now();
        let mut fired = 0;

        for task in self.tasks.iter_mut() {
            if !task.notified && now >= task.deadline {
                self.notifier.play(Sound::Alarm);
                self.notifier.announce(format!("🔔 Reminder: {}", task.text));
                task.notified = true;
                fired += 1;
            }
        }

        if fired > 0 {
            if let Some(user) = self.session.user.as_deref() {
                // keep the flags in memory even if the write fails, or the
                // alarm would repeat on every tick
                if let Err(e) = self.repository.save(user, &self.tasks) {
                    tracing::error!(user, error = %e, "could not persist reminder state");
                }
            }
        }

        fired
    }
}
