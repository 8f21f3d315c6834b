use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::EntityTrait;

use crate::config::AppState;
use crate::entities::user;
use crate::models::auth_model::CurrentUser;
use crate::repositories::user_repository::UserRepository;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::jwt_utils::JwtUtils;

/// Require a valid bearer token, resolve it to a `CurrentUser` and inject
/// it into the request extensions before the handler body runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Get token from header
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(header) => header,
        None => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authorization header is missing",
            )
            .into_response());
        }
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_FORMAT",
                "Invalid Authorization header format",
            )
            .into_response());
        }
    };

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Ok(ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )
        .into_response());
    };

    // 2. Validate JWT
    let token_data = match JwtUtils::validate_jwt(token) {
        Ok(data) => data,
        Err(e) => {
            let (code, message) = match e.kind() {
                ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
                ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
                ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
                _ => ("AUTH_FAILED", "Authentication failed"),
            };

            return Ok(
                ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, code, message)
                    .into_response(),
            );
        }
    };

    // 3. Resolve the user and its roles from the database
    let current_user = match fetch_current_user(&state.db, token_data.claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "Account behind this token no longer exists",
            )
            .into_response());
        }
        Err(_) => {
            return Ok(ResponseBuilder::error::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "An internal error occurred during authentication",
            )
            .into_response());
        }
    };

    // 4. Inject CurrentUser into the request
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

/// Admin gate for `/api/admin`. Must be layered after `auth_middleware`.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let is_admin = req
        .extensions()
        .get::<CurrentUser>()
        .map(|u| u.is_admin())
        .unwrap_or(false);

    if !is_admin {
        tracing::warn!("Admin access denied for {}", req.uri().path());
        return Ok(ResponseBuilder::error::<()>(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "You do not have permission to access this resource",
        )
        .into_response());
    }

    Ok(next.run(req).await)
}

/// Best-effort identity for public endpoints that annotate ownership and
/// admin flags. A missing or invalid token simply resolves to `None`.
pub struct OptionalCurrentUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalCurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Self(None));
        };
        let Ok(auth_str) = auth_header.to_str() else {
            return Ok(Self(None));
        };
        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Ok(Self(None));
        };
        let Ok(token_data) = JwtUtils::validate_jwt(token) else {
            return Ok(Self(None));
        };

        match fetch_current_user(&state.db, token_data.claims.sub).await {
            Ok(user) => Ok(Self(user)),
            Err(_) => Ok(Self(None)),
        }
    }
}

async fn fetch_current_user(
    db: &sea_orm::DatabaseConnection,
    user_id: i64,
) -> Result<Option<CurrentUser>, sea_orm::DbErr> {
    let Some(user) = user::Entity::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    let roles = UserRepository::roles_for(db, &user)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();

    Ok(Some(CurrentUser {
        id: user.id,
        username: user.username,
        email: user.email,
        roles,
    }))
}
