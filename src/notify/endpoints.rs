use rocket::serde::json::Json;
use rocket::{get, State};

use std::sync::Arc;

use super::data::Notification;
use super::helpers::NotificationFeed;

#[get("/notifications")]
pub fn get_notifications(feed: &State<Arc<NotificationFeed>>) -> Json<Vec<Notification>> {
    Json(feed.drain())
}
