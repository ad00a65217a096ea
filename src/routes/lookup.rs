use crate::error::AppError;
use crate::lookup::{channel_info, videos};
use crate::models::VideoCategory;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/get_videos", post(get_videos))
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {}", field)))
}

#[derive(Deserialize)]
struct SearchForm {
    api_key: Option<String>,
    channel_input: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Value>, AppError> {
    let api_key = required(form.api_key, "api_key")?;
    let channel_input = required(form.channel_input, "channel_input")?;

    let channel =
        channel_info::get_channel_info(&state.youtube, &state.db, &api_key, &channel_input)
            .await?
            .ok_or_else(|| AppError::NotFound("Channel not found".to_string()))?;

    Ok(Json(json!({ "channel_info": channel })))
}

#[derive(Deserialize)]
struct VideosForm {
    api_key: Option<String>,
    channel_id: Option<String>,
    video_type: Option<String>,
}

async fn get_videos(
    State(state): State<AppState>,
    Form(form): Form<VideosForm>,
) -> Result<Json<Value>, AppError> {
    let api_key = required(form.api_key, "api_key")?;
    let channel_id = required(form.channel_id, "channel_id")?;
    let category: VideoCategory = required(form.video_type, "video_type")?
        .parse()
        .map_err(|e: crate::models::UnknownCategory| AppError::BadRequest(e.to_string()))?;

    let videos =
        videos::get_videos(&state.youtube, &state.db, &api_key, &channel_id, category).await?;

    Ok(Json(json!({ "videos": videos })))
}
