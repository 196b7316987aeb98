//! Shop categories

use shared::error::{AppError, ErrorCode};
use shared::models::{Category, CategoryCreate};
use sqlx::SqlitePool;

use crate::booking::Actor;
use crate::db::repository::{RepoError, category};
use crate::error::ServiceResult;

pub async fn list(pool: &SqlitePool) -> ServiceResult<Vec<Category>> {
    Ok(category::find_all(pool).await?)
}

pub async fn create(
    pool: &SqlitePool,
    actor: &Actor,
    mut data: CategoryCreate,
) -> ServiceResult<Category> {
    actor.require_staff()?;
    data.name = data.name.trim().to_string();
    if data.name.is_empty() {
        return Err(AppError::field(
            "name",
            ErrorCode::RequiredField,
            "Category name is required",
        )
        .into());
    }

    let name = data.name.clone();
    match category::create(pool, data).await {
        Ok(created) => {
            tracing::info!(category_id = created.id, "Category created");
            Ok(created)
        }
        Err(RepoError::Duplicate(_)) => Err(AppError::field(
            "name",
            ErrorCode::CategoryNameExists,
            format!("Category '{name}' already exists"),
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
