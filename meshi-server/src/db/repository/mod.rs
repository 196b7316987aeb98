//! Repository Module
//!
//! Free functions over `&SqlitePool`, one module per table.

pub mod category;
pub mod company;
pub mod favorite;
pub mod member;
pub mod reservation;
pub mod review;
pub mod shop;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_check_violation() => {
                RepoError::Validation(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row".into()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// 1-based page number to `(limit, offset)`
pub fn page_bounds(page: u32, per_page: u32) -> (i64, i64) {
    let page = page.max(1) as i64;
    let per_page = per_page as i64;
    (per_page, (page - 1) * per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(1, 9), (9, 0));
        assert_eq!(page_bounds(3, 10), (10, 20));
        assert_eq!(page_bounds(0, 9), (9, 0));
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate() {
        let pool = test_support::pool().await;
        sqlx::query("INSERT INTO categories (id, name) VALUES (1, 'Ramen')")
            .execute(&pool)
            .await
            .unwrap();
        let err: RepoError = sqlx::query("INSERT INTO categories (id, name) VALUES (2, 'Ramen')")
            .execute(&pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_check_violation_maps_to_validation() {
        let pool = test_support::pool().await;
        let err: RepoError = sqlx::query(
            "INSERT INTO shops (id, name, created_at, updated_at) VALUES (1, '', 0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap_err()
        .into();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
