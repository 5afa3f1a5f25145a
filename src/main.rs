use clap::Parser;
use mockable::DefaultClock;
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod config;
mod data;
mod identity;
mod internal_error;
mod monitor;
mod notify;
mod store;
mod suggestions;
mod tasks;
mod theme;

#[macro_use]
extern crate rocket;

use config::Config;
use data::{SharedClock, SharedManager};
use monitor::helpers::MonitorFairing;
use notify::helpers::{NotificationFeed, DEFAULT_FEED_CAPACITY};
use store::data::KeyValueStore;
use store::helpers::{SqliteStore, StoreRepository};
use tasks::manager::TaskManager;
use theme::helpers::ThemeSettings;

fn build_rocket<S>(
    figment: Figment,
    store: S,
    clock: SharedClock,
    tick: Duration,
    static_dir: Option<PathBuf>,
) -> Rocket<Build>
where
    S: KeyValueStore + Clone + Sync + 'static,
{
    let feed = Arc::new(NotificationFeed::new(clock.clone(), DEFAULT_FEED_CAPACITY));
    let manager: SharedManager = Arc::new(Mutex::new(TaskManager::new(
        StoreRepository::new(store.clone()),
        clock,
        feed.clone(),
    )));

    let rocket = rocket::custom(figment)
        .manage(manager.clone())
        .manage(feed)
        .manage(ThemeSettings::new(store))
        .attach(MonitorFairing::new(manager, tick))
        .mount(
            "/api",
            routes![
                identity::endpoints::register,
                identity::endpoints::login,
                identity::endpoints::logout,
                identity::endpoints::get_session,
                tasks::endpoints::get_tasks,
                tasks::endpoints::add_task,
                tasks::endpoints::delete_task,
                tasks::endpoints::toggle_complete,
                tasks::endpoints::toggle_favorite,
                tasks::endpoints::edit_task,
                tasks::endpoints::get_summary,
                suggestions::endpoints::get_suggestions,
                suggestions::endpoints::post_apply_suggestion,
                theme::endpoints::get_theme,
                theme::endpoints::set_theme,
                theme::endpoints::toggle_theme,
                notify::endpoints::get_notifications,
            ],
        );

    match static_dir {
        Some(dir) => rocket.mount("/", FileServer::from(dir).rank(15)),
        None => rocket,
    }
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    tracing::info!(db = %config.db_path.display(), "opening local storage");

    let store = SqliteStore::open(&config.db_path)?;

    build_rocket(
        config.figment(),
        store,
        Arc::new(DefaultClock),
        config.tick(),
        config.static_dir.clone(),
    )
    .launch()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as TimeDelta, Utc};
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};

    use crate::store::helpers::MemoryStore;

    use super::*;

    fn client() -> Client {
        let rocket = build_rocket(
            rocket::Config::figment(),
            MemoryStore::default(),
            Arc::new(DefaultClock),
            Duration::from_secs(3600),
            None,
        );

        Client::tracked(rocket).unwrap()
    }

    fn post(client: &Client, uri: &str, body: Value) -> (Status, Value) {
        let response = client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = response.status();

        (status, response.into_json().unwrap_or(Value::Null))
    }

    fn get(client: &Client, uri: &str) -> (Status, Value) {
        let response = client.get(uri.to_string()).dispatch();
        let status = response.status();

        (status, response.into_json().unwrap_or(Value::Null))
    }

    fn in_an_hour() -> String {
        (Utc::now() + TimeDelta::hours(1)).to_rfc3339()
    }

    #[test]
    fn register_add_and_list() {
        let client = client();

        let (status, session) = post(
            &client,
            "/api/register",
            json!({ "username": "alice", "password": "pw1" }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(session["user"], "alice");

        let (status, task) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Buy milk", "deadline": in_an_hour() }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(task["done"], false);
        assert_eq!(task["favorite"], false);

        let (_, favorite) = post(
            &client,
            "/api/toggle_favorite",
            json!({ "taskId": task["id"] }),
        );
        assert_eq!(favorite["favorite"], true);

        let (status, listed) = get(&client, "/api/tasks?filter=favorite");
        assert_eq!(status, Status::Ok);
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["text"], "Buy milk");
        assert_eq!(listed[0]["timeLeft"], "0d 0h 59m");

        let (_, summary) = get(&client, "/api/summary");
        assert_eq!(summary["message"], "You completed 0 of 1 tasks – 0%");
    }

    #[test]
    fn logout_and_login_restore_tasks() {
        let client = client();
        post(
            &client,
            "/api/register",
            json!({ "username": "alice", "password": "pw1" }),
        );
        let (_, task) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Buy milk", "deadline": in_an_hour() }),
        );

        let (_, session) = post(&client, "/api/logout", json!({}));
        assert_eq!(session["user"], Value::Null);
        let (_, listed) = get(&client, "/api/tasks");
        assert_eq!(listed, json!([]));

        let (status, _) = post(
            &client,
            "/api/login",
            json!({ "username": "alice", "password": "pw1" }),
        );
        assert_eq!(status, Status::Ok);

        let (_, listed) = get(&client, "/api/tasks");
        assert_eq!(listed[0]["id"], task["id"]);
        assert_eq!(listed[0]["createdAt"], task["createdAt"]);
    }

    #[test]
    fn rejections_map_to_statuses() {
        let client = client();
        let credentials = json!({ "username": "alice", "password": "pw1" });

        let (status, _) = post(&client, "/api/add_task", json!({ "text": "x", "deadline": in_an_hour() }));
        assert_eq!(status, Status::Unauthorized);

        post(&client, "/api/register", credentials.clone());
        let (status, body) = post(&client, "/api/register", credentials);
        assert_eq!(status, Status::Conflict);
        assert_eq!(body["message"], "User already exists");

        let (status, body) = post(
            &client,
            "/api/login",
            json!({ "username": "alice", "password": "wrong" }),
        );
        assert_eq!(status, Status::Unauthorized);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, _) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Buy milk", "deadline": "whenever" }),
        );
        assert_eq!(status, Status::BadRequest);
    }

    #[test]
    fn edit_task_prefills_the_form() {
        let client = client();
        post(
            &client,
            "/api/register",
            json!({ "username": "alice", "password": "pw1" }),
        );
        let (_, task) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Read book", "deadline": in_an_hour() }),
        );

        let (status, form) = get(&client, &format!("/api/edit_task/{}", task["id"]));
        assert_eq!(status, Status::Ok);
        assert_eq!(form["text"], "Read book");
        let (_, session) = get(&client, "/api/session");
        assert_eq!(session["editing"], task["id"]);

        let (_, updated) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Read docs", "deadline": in_an_hour() }),
        );
        assert_eq!(updated["id"], task["id"]);

        let (_, updated) = post(
            &client,
            "/api/add_task",
            json!({ "text": "Read papers", "deadline": in_an_hour(), "editingId": task["id"] }),
        );
        assert_eq!(updated["id"], task["id"]);
        assert_eq!(updated["text"], "Read papers");

        let (status, _) = get(&client, "/api/edit_task/1");
        assert_eq!(status, Status::NotFound);
    }

    #[test]
    fn suggestions_and_theme() {
        let client = client();

        let (_, body) = get(&client, "/api/suggestions?text=call");
        assert_eq!(body["suggestions"], json!(["mom", "dad", "boss", "client"]));
        let (_, body) = get(&client, "/api/suggestions?text=xyz");
        assert_eq!(body["suggestions"], json!([]));

        let (_, body) = post(
            &client,
            "/api/apply_suggestion",
            json!({ "text": "call", "suggestion": "mom" }),
        );
        assert_eq!(body["text"], "call mom");

        let (_, body) = get(&client, "/api/theme");
        assert_eq!(body["theme"], "light");
        let (_, body) = post(&client, "/api/set_theme", json!({ "theme": "ocean" }));
        assert_eq!(body["theme"], "ocean");
        let (_, body) = post(&client, "/api/toggle_theme", json!({}));
        assert_eq!(body["theme"], "dark");
        let (status, _) = post(&client, "/api/set_theme", json!({ "theme": "neon" }));
        assert_eq!(status, Status::BadRequest);
    }

    #[test]
    fn notifications_are_drained() {
        let client = client();
        post(
            &client,
            "/api/register",
            json!({ "username": "alice", "password": "pw1" }),
        );

        let (_, events) = get(&client, "/api/notifications");
        assert_eq!(events[0]["kind"], "message");
        assert_eq!(events[0]["text"], "Registered successfully");

        let (_, events) = get(&client, "/api/notifications");
        assert_eq!(events, json!([]));
    }
}
