use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::SharedManager;
use crate::internal_error::InternalResult;

use super::data::*;

#[post("/register", format = "json", data = "<credentials>")]
pub fn register(
    credentials: Json<CredentialsRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<SessionView>> {
    let mut manager = manager.lock()?;

    let view = manager.register(&credentials.username, &credentials.password)?;

    Ok(Json(view))
}

#[post("/login", format = "json", data = "<credentials>")]
pub fn login(
    credentials: Json<CredentialsRequest>,
    manager: &State<SharedManager>,
) -> InternalResult<Json<SessionView>> {
    let mut manager = manager.lock()?;

    let view = manager.login(&credentials.username, &credentials.password)?;

    Ok(Json(view))
}

#[post("/logout")]
pub fn logout(manager: &State<SharedManager>) -> InternalResult<Json<SessionView>> {
    let mut manager = manager.lock()?;

    Ok(Json(manager.logout()))
}

#[get("/session")]
pub fn get_session(manager: &State<SharedManager>) -> InternalResult<Json<SessionView>> {
    let manager = manager.lock()?;

    Ok(Json(manager.session_view(None)))
}
