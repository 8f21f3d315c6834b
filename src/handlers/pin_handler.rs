use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

use crate::config::AppState;
use crate::middleware::auth_middleware::OptionalCurrentUser;
use crate::models::auth_model::CurrentUser;
use crate::models::pin_model::{
    HomeFeedResponse, PinDetailResponse, PinListItem, PinSearchParams, PinUpload,
};
use crate::services::pin_service::PinService;
use crate::utils::api_response::ResponseBuilder;

// Home feed: all pins, annotated with ownership/admin flags for the viewer
pub async fn home_feed_handler(
    State(state): State<AppState>,
    OptionalCurrentUser(viewer): OptionalCurrentUser,
) -> impl IntoResponse {
    match PinService::home_feed(&state.db, viewer.as_ref()).await {
        Ok(feed) => ResponseBuilder::success("PINS_FETCHED", "Success", feed),
        Err((status, code, message)) => {
            ResponseBuilder::error::<HomeFeedResponse>(status, code, &message)
        }
    }
}

pub async fn view_pin_handler(
    State(state): State<AppState>,
    OptionalCurrentUser(viewer): OptionalCurrentUser,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match PinService::get_pin(&state.db, id, viewer.as_ref()).await {
        Ok(pin) => ResponseBuilder::success("PIN_FETCHED", "Success", pin),
        Err((status, code, message)) => {
            ResponseBuilder::error::<PinDetailResponse>(status, code, &message)
        }
    }
}

pub async fn search_pins_handler(
    State(state): State<AppState>,
    OptionalCurrentUser(viewer): OptionalCurrentUser,
    Query(params): Query<PinSearchParams>,
) -> impl IntoResponse {
    match PinService::search_by_title(&state.db, &params.query, viewer.as_ref()).await {
        Ok(pins) => ResponseBuilder::success("PINS_FETCHED", "Success", pins),
        Err((status, code, message)) => {
            ResponseBuilder::error::<Vec<PinListItem>>(status, code, &message)
        }
    }
}

pub async fn create_pin_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match read_pin_upload(multipart).await {
        Ok(upload) => upload,
        Err((status, code, message)) => {
            return ResponseBuilder::error::<PinListItem>(status, code, &message).into_response()
        }
    };

    match PinService::create_pin(&state.db, &user, upload).await {
        Ok(pin) => ResponseBuilder::created("PIN_CREATED", "Pin created", pin).into_response(),
        Err((status, code, message)) => {
            ResponseBuilder::error::<PinListItem>(status, code, &message).into_response()
        }
    }
}

pub async fn update_pin_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match read_pin_upload(multipart).await {
        Ok(upload) => upload,
        Err((status, code, message)) => {
            return ResponseBuilder::error::<PinDetailResponse>(status, code, &message)
                .into_response()
        }
    };

    match PinService::update_pin(&state.db, id, &user, upload).await {
        Ok(pin) => ResponseBuilder::success("PIN_UPDATED", "Pin updated", pin).into_response(),
        Err((status, code, message)) => {
            ResponseBuilder::error::<PinDetailResponse>(status, code, &message).into_response()
        }
    }
}

pub async fn delete_pin_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match PinService::delete_pin(&state.db, id, &user).await {
        Ok(()) => ResponseBuilder::success("PIN_DELETED", "Pin deleted", ()),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}

// --- Helpers ---

// Collect the multipart form: text fields plus the raw image payload, read
// fully into memory
async fn read_pin_upload(
    mut multipart: Multipart,
) -> Result<PinUpload, (StatusCode, &'static str, String)> {
    let mut upload = PinUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, "UPLOAD_ERR", e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, "UPLOAD_ERR", e.to_string()))?;
                upload.title = Some(value);
            }
            "description" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, "UPLOAD_ERR", e.to_string()))?;
                upload.description = Some(value);
            }
            "board_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, "UPLOAD_ERR", e.to_string()))?;
                let parsed = value.trim().parse::<i64>().map_err(|_| {
                    (
                        StatusCode::BAD_REQUEST,
                        "BOARD_ID_INVALID",
                        "board_id must be a number".to_string(),
                    )
                })?;
                upload.board_id = Some(parsed);
            }
            "image" => {
                upload.content_type = field.content_type().map(|ct| ct.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, "UPLOAD_ERR", e.to_string()))?;
                upload.image = Some(data.to_vec());
            }
            _ => {}
        }
    }

    Ok(upload)
}
