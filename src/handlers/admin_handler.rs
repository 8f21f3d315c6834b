use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::config::AppState;
use crate::models::user_model::{AdminUserDetailResponse, AdminUserResponse};
use crate::services::user_service::UserService;
use crate::utils::api_response::ResponseBuilder;

// The admin middleware already gates these routes

pub async fn list_users_handler(State(state): State<AppState>) -> impl IntoResponse {
    match UserService::list_users(&state.db).await {
        Ok(users) => ResponseBuilder::success("USERS_FETCHED", "Success", users),
        Err((status, code, message)) => {
            ResponseBuilder::error::<Vec<AdminUserResponse>>(status, code, &message)
        }
    }
}

pub async fn get_user_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match UserService::get_user_detail(&state.db, id).await {
        Ok(user) => ResponseBuilder::success("USER_FETCHED", "Success", user),
        Err((status, code, message)) => {
            ResponseBuilder::error::<AdminUserDetailResponse>(status, code, &message)
        }
    }
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match UserService::delete_user(&state.db, id).await {
        Ok(()) => ResponseBuilder::success("USER_DELETED", "User deleted successfully", ()),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}
