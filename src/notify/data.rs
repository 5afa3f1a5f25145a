use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Alarm,
    TaskSaved,
}

impl Sound {
    pub fn url(self) -> &'static str {
        match self {
            Sound::Alarm => "https://actions.google.com/sounds/v1/alarms/alarm_clock.ogg",
            Sound::TaskSaved => "https://actions.google.com/sounds/v1/cartoon/clang_and_wobble.ogg",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    Sound { sound: Sound, url: &'static str },
    Message { text: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: NotificationEvent,
}

/// Fire-and-forget side effects: audible alerts and short user-facing messages.
pub trait Notifier: Send + Sync {
    fn play(&self, sound: Sound);
    fn announce(&self, message: String);
}
