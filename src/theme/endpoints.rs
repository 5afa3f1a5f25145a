use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::internal_error::InternalResult;

use super::helpers::*;

#[get("/theme")]
pub fn get_theme(settings: &State<ThemeSettings>) -> Json<ThemeResponse> {
    Json(settings.response())
}

#[post("/set_theme", format = "json", data = "<set_theme_request>")]
pub fn set_theme(
    set_theme_request: Json<SetThemeRequest>,
    settings: &State<ThemeSettings>,
) -> InternalResult<Json<ThemeResponse>> {
    settings.set(&set_theme_request.theme)?;

    Ok(Json(settings.response()))
}

#[post("/toggle_theme")]
pub fn toggle_theme(settings: &State<ThemeSettings>) -> InternalResult<Json<ThemeResponse>> {
    settings.toggle_dark()?;

    Ok(Json(settings.response()))
}
