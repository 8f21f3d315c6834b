use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::config::AppState;
use crate::models::auth_model::{
    AuthorizationUrlResponse, ForgotPasswordRequest, LoginRequest, LoginResponse,
    OAuthCallbackQuery, RegisterRequest, RegisterResponse, ResetPasswordRequest, ResetTokenQuery,
};
use crate::services::auth_service::AuthService;
use crate::services::oauth_service::OAuthService;
use crate::services::password_reset_service::PasswordResetService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

// 1. REGISTER
pub async fn register_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    match AuthService::register_user(&state.db, payload.username, payload.email, payload.password)
        .await
    {
        Ok(user) => ResponseBuilder::created(
            "AUTH_REGISTER_SUCCESS",
            "User registered successfully",
            RegisterResponse {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<RegisterResponse>(status, code, &message)
        }
    }
}

// 2. LOGIN
pub async fn login_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login_user(&state.db, payload.username, payload.password).await {
        Ok((token, user, roles)) => ResponseBuilder::success(
            "AUTH_LOGIN_SUCCESS",
            "Login successful",
            LoginResponse {
                token,
                token_type: "Bearer".to_string(),
                username: user.username,
                roles,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<LoginResponse>(status, code, &message)
        }
    }
}

// 3. LOGOUT (bearer tokens are stateless; the client discards the token)
pub async fn logout_handler() -> impl IntoResponse {
    ResponseBuilder::success("AUTH_LOGOUT_SUCCESS", "Logged out", ())
}

// 4. FORGOT PASSWORD: same reply whether or not the email is registered
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> impl IntoResponse {
    match PasswordResetService::create_token(&state, payload.email).await {
        Ok(()) => ResponseBuilder::success(
            "RESET_EMAIL_SENT",
            "If the email is registered, a password reset message has been sent",
            (),
        ),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}

// 5. RESET PASSWORD (GET: validate the token behind the emailed link)
pub async fn validate_reset_token_handler(
    State(state): State<AppState>,
    Query(params): Query<ResetTokenQuery>,
) -> impl IntoResponse {
    match PasswordResetService::validate_token(&state.db, &params.token).await {
        Ok(_user) => ResponseBuilder::success(
            "TOKEN_VALID",
            "Token is valid",
            serde_json::json!({ "valid": true }),
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<serde_json::Value>(status, code, &message)
        }
    }
}

// 6. RESET PASSWORD (POST: consume the token)
pub async fn reset_password_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> impl IntoResponse {
    match PasswordResetService::consume(&state.db, &payload.token, payload.password).await {
        Ok(()) => ResponseBuilder::success(
            "PASSWORD_RESET_SUCCESS",
            "Password updated successfully. You can now log in.",
            (),
        ),
        Err((status, code, message)) => ResponseBuilder::error::<()>(status, code, &message),
    }
}

// 7. GOOGLE OAUTH: authorization URL
pub async fn google_auth_url_handler() -> impl IntoResponse {
    match OAuthService::get_authorization_url() {
        Ok(url) => ResponseBuilder::success(
            "OAUTH_URL_CREATED",
            "Authorization URL created",
            AuthorizationUrlResponse {
                authorization_url: url,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<AuthorizationUrlResponse>(status, code, &message)
        }
    }
}

// 8. GOOGLE OAUTH: callback
pub async fn google_callback_handler(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallbackQuery>,
) -> impl IntoResponse {
    match OAuthService::login_with_google(&state.db, params.code).await {
        Ok((token, user, roles)) => ResponseBuilder::success(
            "AUTH_LOGIN_SUCCESS",
            "Login successful",
            LoginResponse {
                token,
                token_type: "Bearer".to_string(),
                username: user.username,
                roles,
            },
        ),
        Err((status, code, message)) => {
            ResponseBuilder::error::<LoginResponse>(status, code, &message)
        }
    }
}
