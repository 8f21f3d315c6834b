use serde::{Deserialize, Serialize};

use crate::models::board_model::BoardResponse;
use crate::models::pin_model::PinListItem;
use crate::models::user_model::PublicUserResponse;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResultsResponse {
    pub query: String,
    pub users: Vec<PublicUserResponse>,
    pub boards: Vec<BoardResponse>,
    pub pins: Vec<PinListItem>,
}
