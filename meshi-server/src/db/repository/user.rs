//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use sqlx::{Sqlite, SqlitePool, Transaction};

const USER_SELECT: &str = "SELECT id, username, email, first_name, last_name, hashed_password, is_staff, created_at FROM users";

/// Insert payload; the password is already hashed
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub hashed_password: &'a str,
    pub is_staff: bool,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE username = ? LIMIT 1"))
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert inside an open transaction, returning the new id
pub async fn insert(tx: &mut Transaction<'_, Sqlite>, data: &NewUser<'_>) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, first_name, last_name, hashed_password, is_staff, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(data.username)
    .bind(data.email)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.hashed_password)
    .bind(data.is_staff)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

pub async fn create(pool: &SqlitePool, data: &NewUser<'_>) -> RepoResult<User> {
    let mut tx = pool.begin().await?;
    let id = insert(&mut tx, data).await?;
    tx.commit().await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn set_staff(pool: &SqlitePool, id: i64, is_staff: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET is_staff = ? WHERE id = ?")
        .bind(is_staff)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}
