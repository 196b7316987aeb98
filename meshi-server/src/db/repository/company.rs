//! Company Repository

use super::RepoResult;
use shared::models::Company;
use sqlx::SqlitePool;

/// The company shown on the about page is the first row
pub async fn find_first(pool: &SqlitePool) -> RepoResult<Option<Company>> {
    let company = sqlx::query_as::<_, Company>(
        "SELECT id, name, founded_year, description, headquarters FROM companies ORDER BY id LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(company)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    founded_year: i32,
    description: &str,
    headquarters: &str,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO companies (name, founded_year, description, headquarters) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(name)
    .bind(founded_year)
    .bind(description)
    .bind(headquarters)
    .fetch_one(pool)
    .await?;
    Ok(id)
}
