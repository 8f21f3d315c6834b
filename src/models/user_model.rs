use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::board_model::BoardResponse;

/// Minimal user shape embedded in pins, comments and search results
#[derive(Serialize, Debug)]
pub struct PublicUserResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub boards: Vec<BoardResponse>,
}

#[derive(Serialize)]
pub struct AdminUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AdminUserDetailResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub boards: Vec<BoardResponse>,
}
