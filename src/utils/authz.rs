use axum::http::StatusCode;

use crate::models::auth_model::CurrentUser;

/// The admin-or-owner rule used by every mutating board/pin/comment
/// operation. Runs before the mutation; a `None` owner (orphaned content)
/// denies everyone except admins.
pub fn ensure_owner_or_admin(
    owner_id: Option<i64>,
    user: &CurrentUser,
) -> Result<(), (StatusCode, &'static str, String)> {
    if user.is_admin() {
        return Ok(());
    }
    match owner_id {
        Some(id) if id == user.id => Ok(()),
        _ => Err((
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "You are not the owner of this resource".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        assert!(ensure_owner_or_admin(Some(1), &user(1, &["user"])).is_ok());
    }

    #[test]
    fn admin_is_allowed_on_any_resource() {
        assert!(ensure_owner_or_admin(Some(99), &user(1, &["admin"])).is_ok());
        assert!(ensure_owner_or_admin(None, &user(1, &["admin"])).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let err = ensure_owner_or_admin(Some(2), &user(1, &["user"])).unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
        assert_eq!(err.1, "ACCESS_DENIED");
    }

    #[test]
    fn orphaned_resource_denies_non_admins_without_panicking() {
        let err = ensure_owner_or_admin(None, &user(1, &["user"])).unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }
}
