use rocket::serde::json::Json;
use rocket::{get, post};

use super::data::*;
use super::helpers::*;

#[get("/suggestions?<text>")]
pub fn get_suggestions(text: Option<&str>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: suggestions_for(text.unwrap_or_default()).to_vec(),
    })
}

#[post("/apply_suggestion", format = "json", data = "<apply_suggestion_request>")]
pub fn post_apply_suggestion(
    apply_suggestion_request: Json<ApplySuggestionRequest>,
) -> Json<ApplySuggestionResponse> {
    Json(ApplySuggestionResponse {
        text: apply_suggestion(
            &apply_suggestion_request.text,
            &apply_suggestion_request.suggestion,
        ),
    })
}
