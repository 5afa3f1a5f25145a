use crate::internal_error::InternalResult;
use crate::tasks::data::Task;

pub const THEME_KEY: &str = "theme";

pub fn tasks_key(username: &str) -> String {
    format!("tasks_{}", username)
}

/// String-to-string storage shaped like the browser's local storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> InternalResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> InternalResult<()>;
    fn remove(&self, key: &str) -> InternalResult<()>;
}

/// Per-user task collections.
pub trait TaskRepository: Send {
    /// Never fails: unreadable or corrupt collections load as empty.
    fn load(&self, username: &str) -> Vec<Task>;
    fn save(&self, username: &str, tasks: &[Task]) -> InternalResult<()>;
}
