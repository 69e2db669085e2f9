//! Handlers for the read-only user directory.

use axum::{extract::Path, Json};
use tracing::instrument;

use crate::error::AppError;
use crate::users::{self, User};

/// Lists every user in directory order.
#[instrument(name = "users::list")]
pub async fn list() -> Result<Json<&'static [User]>, AppError> {
    let users = users::all();
    tracing::debug!(count = users.len(), "Listing users");
    Ok(Json(users))
}

/// Fetches a single user by id.
///
/// Ids that do not parse as an integer are reported as not found rather than
/// as a bad request.
#[instrument(name = "users::show")]
pub async fn show(Path(id): Path<String>) -> Result<Json<&'static User>, AppError> {
    users::find(users::parse_id(&id))
        .map(Json)
        .ok_or(AppError::UserNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_directory() {
        let Json(users) = list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].id, 2);
    }

    #[tokio::test]
    async fn test_show_found() {
        let Json(user) = show(Path("2".to_string())).await.unwrap();
        assert_eq!(user.name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_show_not_found_keeps_raw_id() {
        match show(Path("abc".to_string())).await {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "abc"),
            other => panic!("expected UserNotFound, got {:?}", other.map(|j| j.0)),
        }
    }
}
