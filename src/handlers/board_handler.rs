use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension,
};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::board_model::{BoardDetailResponse, BoardRequest, BoardResponse};
use crate::services::board_service::BoardService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_boards_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match BoardService::list_own_boards(&state.db, &user).await {
        Ok(boards) => ResponseBuilder::success("BOARDS_FETCHED", "Success", boards),
        Err((status, code, message)) => {
            ResponseBuilder::error::<Vec<BoardResponse>>(status, code, &message)
        }
    }
}

pub async fn create_board_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<BoardRequest>,
) -> impl IntoResponse {
    match BoardService::create_board(&state.db, &user, payload.name).await {
        Ok(board) => ResponseBuilder::created("BOARD_CREATED", "Board created", board),
        Err((status, code, message)) => {
            ResponseBuilder::error::<BoardResponse>(status, code, &message)
        }
    }
}

pub async fn get_board_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match BoardService::get_board(&state.db, id, &user).await {
        Ok(board) => ResponseBuilder::success("BOARD_FETCHED", "Success", board),
        Err((status, code, message)) => {
            ResponseBuilder::error::<BoardDetailResponse>(status, code, &message)
        }
    }
}

pub async fn update_board_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<BoardRequest>,
) -> impl IntoResponse {
    match BoardService::update_board(&state.db, id, &user, payload.name).await {
        Ok(board) => ResponseBuilder::success("BOARD_UPDATED", "Board updated", board),
        Err((status, code, message)) => {
            ResponseBuilder::error::<BoardResponse>(status, code, &message)
        }
    }
}

pub async fn delete_board_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match BoardService::delete_board(&state.db, id, &user).await {
        Ok(()) => ResponseBuilder::success("BOARD_DELETED", "Board deleted", ()),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}
