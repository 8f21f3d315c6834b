use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::comment_model::CommentResponse;
use crate::models::user_model::PublicUserResponse;

/// Pin as rendered in feeds, board views and search results. The image is
/// shipped inline as base64 like the original server did.
#[derive(Serialize, Debug)]
pub struct PinListItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub img_base64: String,
    pub owner: Option<PublicUserResponse>,
    pub board_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub is_owner: bool,
}

#[derive(Serialize)]
pub struct HomeFeedResponse {
    pub pins: Vec<PinListItem>,
    pub is_admin: bool,
}

#[derive(Serialize)]
pub struct PinDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub img_base64: String,
    pub owner: Option<PublicUserResponse>,
    pub board_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
    pub is_owner: bool,
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct PinSearchParams {
    #[serde(default)]
    pub query: String,
}

/// Fields collected from the multipart create/edit forms
#[derive(Default)]
pub struct PinUpload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub board_id: Option<i64>,
    pub image: Option<Vec<u8>>,
    pub content_type: Option<String>,
}
