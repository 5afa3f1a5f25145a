use std::collections::VecDeque;
use std::sync::Mutex;

use crate::data::SharedClock;

use super::data::*;

pub const DEFAULT_FEED_CAPACITY: usize = 64;

/// Keeps the most recent notifications until the front-end drains them.
pub struct NotificationFeed {
    events: Mutex<VecDeque<Notification>>,
    capacity: usize,
    clock: SharedClock,
}

impl NotificationFeed {
    pub fn new(clock: SharedClock, capacity: usize) -> NotificationFeed {
        NotificationFeed {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            clock,
        }
    }

    fn push(&self, event: NotificationEvent) {
        let notification = Notification {
            at: self.clock.utc(),
            event,
        };

        match self.events.lock() {
            Ok(mut events) => {
                if events.len() == self.capacity {
                    events.pop_front();
                }
                events.push_back(notification);
            }
            Err(e) => tracing::error!(error = %e, "notification feed unavailable"),
        }
    }

    pub fn drain(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(e) => {
                tracing::error!(error = %e, "notification feed unavailable");
                vec![]
            }
        }
    }
}

#[cfg(test)]
impl NotificationFeed {
    pub fn messages(&self) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter_map(|n| match n.event {
                NotificationEvent::Message { text } => Some(text),
                NotificationEvent::Sound { .. } => None,
            })
            .collect()
    }
}

impl Notifier for NotificationFeed {
    fn play(&self, sound: Sound) {
        tracing::debug!(?sound, "playing sound");
        self.push(NotificationEvent::Sound {
            sound,
            url: sound.url(),
        });
    }

    fn announce(&self, message: String) {
        tracing::info!(%message, "notification");
        self.push(NotificationEvent::Message { text: message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::DefaultClock;
    use std::sync::Arc;

    use crate::tasks::manager::testing::MutableClock;

    #[test]
    fn feed_drops_oldest_when_full() {
        let feed = NotificationFeed::new(Arc::new(DefaultClock), 2);

        feed.announce("one".to_string());
        feed.announce("two".to_string());
        feed.announce("three".to_string());

        assert_eq!(feed.messages(), vec!["two".to_string(), "three".to_string()]);
        assert!(feed.drain().is_empty());
    }

    #[test]
    fn events_are_stamped_and_carry_sound_urls() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let feed = NotificationFeed::new(Arc::new(MutableClock::new(now)), 8);

        feed.play(Sound::Alarm);

        let events = feed.drain();
        assert_eq!(
            events,
            vec![Notification {
                at: now,
                event: NotificationEvent::Sound {
                    sound: Sound::Alarm,
                    url: "https://actions.google.com/sounds/v1/alarms/alarm_clock.ogg",
                },
            }]
        );
    }
}
