use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::SharedManager;
use crate::internal_error::InternalResult;

use super::data::*;

#[get("/tasks?<filter>")]
pub fn get_tasks(
    filter: Option<Filter>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<Vec<TaskView>>> {
    let manager = manager.lock()?;

    Ok(Json(manager.task_views(filter.unwrap_or_default())))
}

#[post("/add_task", format = "json", data = "<add_task_request>")]
pub fn add_task(
    add_task_request: Json<AddTaskRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<Task>> {
    let mut manager = manager.lock()?;

    let task = manager.add_or_update_task(
        &add_task_request.text,
        &add_task_request.deadline,
        add_task_request.editing_id,
    )?;

    Ok(Json(task))
}

#[post("/delete_task", format = "json", data = "<task_id_request>")]
pub fn delete_task(
    task_id_request: Json<TaskIdRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<ChangedResponse>> {
    let mut manager = manager.lock()?;

    let changed = manager.delete_task(task_id_request.task_id)?;

    Ok(Json(ChangedResponse { changed }))
}

#[post("/toggle_complete", format = "json", data = "<task_id_request>")]
pub fn toggle_complete(
    task_id_request: Json<TaskIdRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<Option<Task>>> {
    let mut manager = manager.lock()?;

    Ok(Json(manager.toggle_complete(task_id_request.task_id)?))
}

#[post("/toggle_favorite", format = "json", data = "<task_id_request>")]
pub fn toggle_favorite(
    task_id_request: Json<TaskIdRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<Option<Task>>> {
    let mut manager = manager.lock()?;

    Ok(Json(manager.toggle_favorite(task_id_request.task_id)?))
}

#[get("/edit_task/<task_id>")]
pub fn edit_task(
    task_id: TaskID,
    manager: &State<SharedManager>,
) -> InternalResult<Option<Json<TaskForm>>> {
    let mut manager = manager.lock()?;

    Ok(manager.edit_request(task_id)?.map(Json))
}

#[get("/summary")]
pub fn get_summary(manager: &State<SharedManager>) -> InternalResult<Json<DailySummary>> {
    let manager = manager.lock()?;

    Ok(Json(manager.daily_summary()))
}
