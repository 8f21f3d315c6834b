use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::user_model::ProfileResponse;
use crate::services::user_service::UserService;
use crate::utils::api_response::ResponseBuilder;

pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match UserService::get_profile(&state.db, &user).await {
        Ok(profile) => ResponseBuilder::success("PROFILE_FETCHED", "Success", profile),
        Err((status, code, message)) => {
            ResponseBuilder::error::<ProfileResponse>(status, code, &message)
        }
    }
}

// Self-service account deletion funnels through the same operation as the
// admin panel, so the admin-protection and orphaning rules hold either way
pub async fn delete_own_account_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match UserService::delete_user(&state.db, user.id).await {
        Ok(()) => ResponseBuilder::success("ACCOUNT_DELETED", "Your account has been deleted", ()),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}
