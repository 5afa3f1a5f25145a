use mockable::Clock;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::tasks::manager::TaskManager;

pub type DBConnection = Arc<Mutex<Connection>>;
pub type SharedClock = Arc<dyn Clock + Send + Sync>;
pub type SharedManager = Arc<Mutex<TaskManager>>;
