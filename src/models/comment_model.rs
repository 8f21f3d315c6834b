use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user_model::PublicUserResponse;

#[derive(Deserialize, Validate)]
pub struct AddCommentRequest {
    #[serde(default)]
    #[validate(
        custom(function = "crate::utils::validator_utils::validate_required"),
        length(max = 2000, message = "Comment must be at most 2000 characters")
    )]
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    // None once the author account has been deleted
    pub author: Option<PublicUserResponse>,
    pub created_at: DateTime<Utc>,
}
