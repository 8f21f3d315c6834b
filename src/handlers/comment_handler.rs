use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension,
};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::comment_model::{AddCommentRequest, CommentResponse};
use crate::services::comment_service::CommentService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn add_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pin_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AddCommentRequest>,
) -> impl IntoResponse {
    match CommentService::add_comment(&state.db, pin_id, &user, payload.text).await {
        Ok(comment) => ResponseBuilder::created("COMMENT_ADDED", "Comment added", comment),
        Err((status, code, message)) => {
            ResponseBuilder::error::<CommentResponse>(status, code, &message)
        }
    }
}

pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((pin_id, comment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match CommentService::delete_comment(&state.db, pin_id, comment_id, &user).await {
        Ok(()) => ResponseBuilder::success("COMMENT_DELETED", "Comment deleted", ()),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}
