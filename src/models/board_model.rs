use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::pin_model::PinListItem;

#[derive(Deserialize, Validate)]
pub struct BoardRequest {
    #[serde(default)]
    #[validate(
        custom(function = "crate::utils::validator_utils::validate_required"),
        length(max = 128, message = "Board name must be at most 128 characters")
    )]
    pub name: String,
}

#[derive(Serialize, Debug)]
pub struct BoardResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct BoardDetailResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub pins: Vec<PinListItem>,
}
